//! The application shell: navigation plus the mounted screen.
//!
//! A screen is mounted when its route becomes current and dropped when
//! the route changes, taking its form state with it.

use log::debug;

use crate::backend::Collaborators;
use crate::router::{Navigator, Route};
use crate::screens::{not_found, GateState, LoginForm, RegisterForm, SessionGate, SubmitOutcome};
use crate::view::View;

pub enum Screen {
    Login(LoginForm),
    Register(RegisterForm),
    Homepage(SessionGate),
    Fallback,
}

/// What a submit did, and the form as it looked right after it resolved
#[derive(Debug, Clone)]
pub struct Submission {
    pub outcome: SubmitOutcome,
    pub form_view: View,
}

pub struct App {
    backend: Collaborators,
    navigator: Navigator,
    mounted: Route,
    screen: Screen,
}

impl App {
    /// Start on the login form
    pub fn new(backend: Collaborators) -> Self {
        let screen = Screen::Login(LoginForm::new(backend.auth.clone()));
        Self {
            backend,
            navigator: Navigator::default(),
            mounted: Route::Login,
            screen,
        }
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn login_form(&mut self) -> Option<&mut LoginForm> {
        match &mut self.screen {
            Screen::Login(form) => Some(form),
            _ => None,
        }
    }

    pub fn register_form(&mut self) -> Option<&mut RegisterForm> {
        match &mut self.screen {
            Screen::Register(form) => Some(form),
            _ => None,
        }
    }

    /// Navigate to `path`, or stay if it is already the current route
    pub async fn open(&mut self, path: &str) {
        let route = Route::resolve(path);
        if route != *self.navigator.current() {
            self.navigator.push(route);
        }
        self.settle().await;
    }

    /// Go back one entry; false when there is nowhere to go
    pub async fn back(&mut self) -> bool {
        let moved = self.navigator.back();
        self.settle().await;
        moved
    }

    /// Submit the mounted form; `None` when the screen has no form.
    ///
    /// The returned view is captured before any navigation the submit
    /// caused unmounts the form.
    pub async fn submit(&mut self) -> Option<Submission> {
        let submission = match &mut self.screen {
            Screen::Login(form) => Submission {
                outcome: form.submit(&mut self.navigator).await,
                form_view: form.view(),
            },
            Screen::Register(form) => Submission {
                outcome: form.submit().await,
                form_view: form.view(),
            },
            Screen::Homepage(_) | Screen::Fallback => return None,
        };
        self.settle().await;
        Some(submission)
    }

    /// Mount the screen for the current route and run the session gate
    /// until navigation stops moving.
    async fn settle(&mut self) {
        loop {
            let current = self.navigator.current().clone();
            if current != self.mounted {
                debug!("mounting {}", current);
                self.screen = self.mount(&current);
                self.mounted = current;
            }

            if let Screen::Homepage(gate) = &mut self.screen {
                if gate.state() == GateState::Loading {
                    gate.activate(&mut self.navigator).await;
                    continue;
                }
            }
            break;
        }
    }

    fn mount(&self, route: &Route) -> Screen {
        match route {
            Route::Login => Screen::Login(LoginForm::new(self.backend.auth.clone())),
            Route::Register => Screen::Register(RegisterForm::new(self.backend.clone())),
            Route::Homepage => Screen::Homepage(SessionGate::new(self.backend.auth.clone())),
            Route::Restricted | Route::NotFound(_) => Screen::Fallback,
        }
    }

    /// The mounted screen, with the tab bar when the route is a tab
    pub fn render(&self) -> View {
        let view = match &self.screen {
            Screen::Login(form) => form.view(),
            Screen::Register(form) => form.view(),
            Screen::Homepage(gate) => gate.view(),
            Screen::Fallback => not_found::view(),
        };
        if self.navigator.active_tab().is_some() {
            view.with_tab_bar(&self.navigator)
        } else {
            view
        }
    }
}
