//! Login form: validate, sign in, go to the homepage.

use std::sync::Arc;

use log::{error, info};

use super::form::{render_field, shown_password, Field, FormStatus, SubmitOutcome};
use super::validation::{EMAIL_RULES, PASSWORD_RULES};
use crate::auth::Session;
use crate::backend::AuthCollaborator;
use crate::error::Result;
use crate::router::{Navigator, Route};
use crate::view::{Element, View};

pub const LOGIN_SUCCESS: &str = "Logged in successfully!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Email,
    Password,
}

/// A validated sign in request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

pub struct LoginForm {
    auth: Arc<dyn AuthCollaborator>,
    email: Field,
    password: Field,
    password_visible: bool,
    status: FormStatus,
}

impl LoginForm {
    pub fn new(auth: Arc<dyn AuthCollaborator>) -> Self {
        Self {
            auth,
            email: Field::new(EMAIL_RULES),
            password: Field::new(PASSWORD_RULES),
            password_visible: false,
            status: FormStatus::default(),
        }
    }

    pub fn field(&self, field: LoginField) -> &Field {
        match field {
            LoginField::Email => &self.email,
            LoginField::Password => &self.password,
        }
    }

    fn field_mut(&mut self, field: LoginField) -> &mut Field {
        match field {
            LoginField::Email => &mut self.email,
            LoginField::Password => &mut self.password,
        }
    }

    pub fn change(&mut self, field: LoginField, value: &str) {
        self.field_mut(field).set(value);
    }

    pub fn blur(&mut self, field: LoginField) {
        self.field_mut(field).blur();
    }

    pub fn toggle_password_visibility(&mut self) {
        self.password_visible = !self.password_visible;
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    /// Touch every field, validate, and take the submit latch.
    ///
    /// Returns the request to send, or why nothing should be sent.
    pub fn begin_submit(&mut self) -> std::result::Result<Credentials, SubmitOutcome> {
        if self.status.is_submitting() {
            return Err(SubmitOutcome::Ignored);
        }

        self.email.blur();
        self.password.blur();
        if self.email.error().is_some() || self.password.error().is_some() {
            return Err(SubmitOutcome::Invalid);
        }

        self.status.latch();
        Ok(Credentials {
            email: self.email.value().to_string(),
            password: self.password.value().to_string(),
        })
    }

    /// Record the sign in result and release the latch
    pub fn complete(&mut self, result: Result<Session>, nav: &mut Navigator) -> SubmitOutcome {
        match result {
            Ok(session) => {
                info!("user {} logged in", session.user.id);
                self.status.succeed(LOGIN_SUCCESS);
                nav.push(Route::Homepage);
                SubmitOutcome::Succeeded
            }
            Err(err) => {
                error!("login failed: {}", err);
                self.status.fail(err.to_string());
                SubmitOutcome::Failed
            }
        }
    }

    /// Validate and sign in; one attempt, no retry
    pub async fn submit(&mut self, nav: &mut Navigator) -> SubmitOutcome {
        let credentials = match self.begin_submit() {
            Ok(credentials) => credentials,
            Err(outcome) => return outcome,
        };

        let result = self
            .auth
            .sign_in(&credentials.email, &credentials.password)
            .await;
        self.complete(result, nav)
    }

    pub fn view(&self) -> View {
        let mut view = View::new();
        view.push(Element::Title("Login".to_string()));
        render_field(&mut view, "Email", self.email.value(), &self.email);
        render_field(
            &mut view,
            "Password",
            &shown_password(self.password.value(), self.password_visible),
            &self.password,
        );
        self.status.render(&mut view, "SIGN IN", "Signing In...");
        view.push(Element::Text("New on our platform?".to_string()));
        view.push(Element::Link {
            label: "Create an account".to_string(),
            path: Route::Register.path().to_string(),
        });
        view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Identity, User};
    use crate::error::Error;
    use crate::router::NavEvent;
    use crate::screens::validation::{EMAIL_INVALID, PASSWORD_TOO_SHORT};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubAuth {
        reply: std::result::Result<(), String>,
        calls: AtomicUsize,
    }

    impl StubAuth {
        fn ok() -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(()),
                calls: AtomicUsize::new(0),
            })
        }

        fn failing(message: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(message.to_string()),
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    fn session() -> Session {
        Session {
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
            token_type: "bearer".to_string(),
            expires_in: 3600,
            expires_at: None,
            user: User {
                id: "user-1".to_string(),
                email: Some("a@b.com".to_string()),
                ..Default::default()
            },
        }
    }

    #[async_trait]
    impl AuthCollaborator for StubAuth {
        async fn get_current_session(&self) -> Result<Option<Session>> {
            Ok(None)
        }

        async fn sign_in(&self, _email: &str, _password: &str) -> Result<Session> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.reply {
                Ok(()) => Ok(session()),
                Err(message) => Err(Error::auth(message)),
            }
        }

        async fn sign_up(&self, _email: &str, _password: &str) -> Result<Identity> {
            unreachable!("login never signs up")
        }
    }

    fn filled(auth: Arc<StubAuth>, email: &str, password: &str) -> LoginForm {
        let mut form = LoginForm::new(auth);
        form.change(LoginField::Email, email);
        form.change(LoginField::Password, password);
        form
    }

    #[tokio::test]
    async fn malformed_email_never_reaches_the_backend() {
        let auth = StubAuth::ok();
        let mut form = filled(auth.clone(), "no-at-sign.com", "secret1");
        let mut nav = Navigator::default();

        assert_eq!(form.submit(&mut nav).await, SubmitOutcome::Invalid);
        assert_eq!(auth.calls(), 0);
        assert_eq!(form.field(LoginField::Email).visible_error(), Some(EMAIL_INVALID));
        assert!(form.view().contains_text(EMAIL_INVALID));
    }

    #[tokio::test]
    async fn short_password_never_reaches_the_backend() {
        let auth = StubAuth::ok();
        let mut form = filled(auth.clone(), "a@b.com", "12345");
        let mut nav = Navigator::default();

        assert_eq!(form.submit(&mut nav).await, SubmitOutcome::Invalid);
        assert_eq!(auth.calls(), 0);
        assert_eq!(
            form.field(LoginField::Password).visible_error(),
            Some(PASSWORD_TOO_SHORT)
        );
        assert!(nav.events().is_empty());
    }

    #[tokio::test]
    async fn success_navigates_to_homepage() {
        let auth = StubAuth::ok();
        let mut form = filled(auth.clone(), "a@b.com", "secret1");
        let mut nav = Navigator::default();

        assert_eq!(form.submit(&mut nav).await, SubmitOutcome::Succeeded);
        assert_eq!(auth.calls(), 1);
        assert_eq!(nav.events(), &[NavEvent::Push(Route::Homepage)]);
        assert!(form.view().contains_text(LOGIN_SUCCESS));
    }

    #[tokio::test]
    async fn backend_error_is_shown_and_latch_released() {
        let auth = StubAuth::failing("Invalid login credentials");
        let mut form = filled(auth.clone(), "a@b.com", "secret1");
        let mut nav = Navigator::default();

        assert_eq!(form.submit(&mut nav).await, SubmitOutcome::Failed);
        assert_eq!(form.status().error_message(), Some("Invalid login credentials"));
        assert!(!form.status().is_submitting());
        assert!(nav.events().is_empty());

        // the form stays usable
        assert_eq!(form.submit(&mut nav).await, SubmitOutcome::Failed);
        assert_eq!(auth.calls(), 2);
    }

    #[test]
    fn second_submit_while_in_flight_is_ignored() {
        let mut form = filled(StubAuth::ok(), "a@b.com", "secret1");
        assert!(form.begin_submit().is_ok());
        assert_eq!(form.begin_submit(), Err(SubmitOutcome::Ignored));

        let view = form.view();
        assert!(view.contains_text("Signing In..."));
        assert!(view.contains_text("(disabled)"));
    }

    #[test]
    fn errors_only_after_interaction() {
        let mut form = LoginForm::new(StubAuth::ok());
        assert!(!form.view().contains_text("Email is required"));
        form.blur(LoginField::Email);
        assert!(form.view().contains_text("Email is required"));
        assert!(!form.view().contains_text("Password is required"));
    }

    #[test]
    fn password_visibility_toggle() {
        let mut form = filled(StubAuth::ok(), "a@b.com", "secret1");
        assert!(form.view().contains_text("Password: *******"));
        form.toggle_password_visibility();
        assert!(form.view().contains_text("Password: secret1"));
    }
}
