//! The homepage, behind the session gate.

use std::sync::Arc;

use log::{debug, warn};

use crate::backend::AuthCollaborator;
use crate::router::{Navigator, Route};
use crate::view::{Element, View};

pub const HOMEPAGE_TEXT: &str = "THIS IS THE HOMEPAGE";
pub const LOADING_TEXT: &str = "Loading...";
pub const NOT_AUTHENTICATED_TEXT: &str = "You are not authenticated.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// The session query has not resolved yet
    Loading,
    Authenticated,
    Unauthenticated,
}

/// Checks for a session once per mount and redirects when there is none.
pub struct SessionGate {
    auth: Arc<dyn AuthCollaborator>,
    state: GateState,
}

impl SessionGate {
    pub fn new(auth: Arc<dyn AuthCollaborator>) -> Self {
        Self {
            auth,
            state: GateState::Loading,
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    /// Ask for the current session and act on the answer.
    ///
    /// A failed query is handled like a missing session: the visitor is
    /// sent to [`Route::Restricted`]. Calling this again after it resolved
    /// does not query again.
    pub async fn activate(&mut self, nav: &mut Navigator) -> GateState {
        if self.state != GateState::Loading {
            return self.state;
        }

        let session = match self.auth.get_current_session().await {
            Ok(session) => session,
            Err(err) => {
                warn!("session query failed, treating as signed out: {}", err);
                None
            }
        };

        self.state = match session {
            Some(session) => {
                debug!("session found for user {}", session.user.id);
                GateState::Authenticated
            }
            None => {
                nav.replace(Route::Restricted);
                GateState::Unauthenticated
            }
        };
        self.state
    }

    pub fn view(&self) -> View {
        let text = match self.state {
            GateState::Loading => LOADING_TEXT,
            GateState::Authenticated => HOMEPAGE_TEXT,
            GateState::Unauthenticated => NOT_AUTHENTICATED_TEXT,
        };
        let mut view = View::new();
        view.push(Element::Title(text.to_string()));
        view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Identity, Session, User};
    use crate::error::{Error, Result};
    use crate::router::NavEvent;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    enum Answer {
        Session,
        Nothing,
        Failure,
    }

    struct StubAuth {
        answer: Answer,
        queries: AtomicUsize,
    }

    #[async_trait]
    impl AuthCollaborator for StubAuth {
        async fn get_current_session(&self) -> Result<Option<Session>> {
            self.queries.fetch_add(1, Ordering::SeqCst);
            match self.answer {
                Answer::Session => Ok(Some(Session {
                    access_token: "access".to_string(),
                    refresh_token: "refresh".to_string(),
                    token_type: "bearer".to_string(),
                    expires_in: 3600,
                    expires_at: None,
                    user: User {
                        id: "user-1".to_string(),
                        ..Default::default()
                    },
                })),
                Answer::Nothing => Ok(None),
                Answer::Failure => Err(Error::general("network unreachable")),
            }
        }

        async fn sign_in(&self, _email: &str, _password: &str) -> Result<Session> {
            unreachable!()
        }

        async fn sign_up(&self, _email: &str, _password: &str) -> Result<Identity> {
            unreachable!()
        }
    }

    fn gate(answer: Answer) -> (SessionGate, Arc<StubAuth>) {
        let auth = Arc::new(StubAuth {
            answer,
            queries: AtomicUsize::new(0),
        });
        (SessionGate::new(auth.clone()), auth)
    }

    #[tokio::test]
    async fn session_shows_homepage() {
        let (mut gate, auth) = gate(Answer::Session);
        let mut nav = Navigator::new(Route::Homepage);
        assert!(gate.view().contains_text(LOADING_TEXT));

        assert_eq!(gate.activate(&mut nav).await, GateState::Authenticated);
        assert!(gate.view().contains_text(HOMEPAGE_TEXT));
        assert!(nav.events().is_empty());

        gate.activate(&mut nav).await;
        assert_eq!(auth.queries.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn no_session_redirects() {
        let (mut gate, _) = gate(Answer::Nothing);
        let mut nav = Navigator::new(Route::Homepage);

        assert_eq!(gate.activate(&mut nav).await, GateState::Unauthenticated);
        assert_eq!(nav.events(), &[NavEvent::Replace(Route::Restricted)]);
        assert!(!gate.view().contains_text(HOMEPAGE_TEXT));
    }

    #[tokio::test]
    async fn query_error_redirects_like_no_session() {
        let (mut gate, _) = gate(Answer::Failure);
        let mut nav = Navigator::new(Route::Homepage);

        assert_eq!(gate.activate(&mut nav).await, GateState::Unauthenticated);
        assert_eq!(nav.current(), &Route::Restricted);
    }
}
