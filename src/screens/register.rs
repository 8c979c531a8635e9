//! Registration form: create the credential, then the profile row.
//!
//! The two writes are independent. When the insert fails after the sign
//! up went through, the credential stays and the insert error is shown.

use log::{error, info};

use super::form::{render_field, shown_password, Field, FormStatus, SubmitOutcome};
use super::validation::{EMAIL_RULES, PASSWORD_RULES, USERNAME_RULES};
use crate::auth::Identity;
use crate::backend::{Collaborators, Profile, USERS_TABLE};
use crate::error::{Error, Result};
use crate::router::Route;
use crate::view::{Element, View};

pub const REGISTRATION_SUCCESS: &str = "Registration successful!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterField {
    Username,
    Email,
    Password,
}

/// A validated registration request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

pub struct RegisterForm {
    backend: Collaborators,
    username: Field,
    email: Field,
    password: Field,
    password_visible: bool,
    status: FormStatus,
}

impl RegisterForm {
    pub fn new(backend: Collaborators) -> Self {
        Self {
            backend,
            username: Field::new(USERNAME_RULES),
            email: Field::new(EMAIL_RULES),
            password: Field::new(PASSWORD_RULES),
            password_visible: false,
            status: FormStatus::default(),
        }
    }

    pub fn field(&self, field: RegisterField) -> &Field {
        match field {
            RegisterField::Username => &self.username,
            RegisterField::Email => &self.email,
            RegisterField::Password => &self.password,
        }
    }

    fn field_mut(&mut self, field: RegisterField) -> &mut Field {
        match field {
            RegisterField::Username => &mut self.username,
            RegisterField::Email => &mut self.email,
            RegisterField::Password => &mut self.password,
        }
    }

    pub fn change(&mut self, field: RegisterField, value: &str) {
        self.field_mut(field).set(value);
    }

    pub fn blur(&mut self, field: RegisterField) {
        self.field_mut(field).blur();
    }

    pub fn toggle_password_visibility(&mut self) {
        self.password_visible = !self.password_visible;
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    /// Touch every field, validate, and take the submit latch
    pub fn begin_submit(&mut self) -> std::result::Result<Registration, SubmitOutcome> {
        if self.status.is_submitting() {
            return Err(SubmitOutcome::Ignored);
        }

        let fields = [&mut self.username, &mut self.email, &mut self.password];
        let mut valid = true;
        for field in fields {
            field.blur();
            valid &= field.error().is_none();
        }
        if !valid {
            return Err(SubmitOutcome::Invalid);
        }

        self.status.latch();
        Ok(Registration {
            username: self.username.value().to_string(),
            email: self.email.value().to_string(),
            password: self.password.value().to_string(),
        })
    }

    /// Sign up, then insert the profile row. The insert only runs once
    /// the sign up has succeeded.
    async fn run(&self, registration: &Registration) -> Result<Identity> {
        let identity = self
            .backend
            .auth
            .sign_up(&registration.email, &registration.password)
            .await
            .map_err(|err| {
                error!("error during registration: {}", err);
                err
            })?;

        let profile = Profile {
            username: registration.username.clone(),
            email: registration.email.clone(),
        };
        let rows = serde_json::to_value(vec![profile])?;
        self.backend
            .records
            .insert(USERS_TABLE, rows)
            .await
            .map_err(|err| {
                error!("error inserting user data: {}", err);
                err
            })?;

        Ok(identity)
    }

    /// Record the outcome and release the latch, whichever step failed
    pub fn complete(&mut self, result: Result<Identity>) -> SubmitOutcome {
        match result {
            Ok(identity) => {
                info!("user {} registered", identity.user.id);
                self.status.succeed(REGISTRATION_SUCCESS);
                SubmitOutcome::Succeeded
            }
            Err(err) => {
                self.status.fail(failure_message(&err));
                SubmitOutcome::Failed
            }
        }
    }

    pub async fn submit(&mut self) -> SubmitOutcome {
        let registration = match self.begin_submit() {
            Ok(registration) => registration,
            Err(outcome) => return outcome,
        };

        let result = self.run(&registration).await;
        self.complete(result)
    }

    pub fn view(&self) -> View {
        let mut view = View::new();
        view.push(Element::Title("Register".to_string()));
        render_field(&mut view, "Username", self.username.value(), &self.username);
        render_field(&mut view, "Email", self.email.value(), &self.email);
        render_field(
            &mut view,
            "Password",
            &shown_password(self.password.value(), self.password_visible),
            &self.password,
        );
        self.status.render(&mut view, "REGISTER", "Registering...");
        view.push(Element::Text("Already have an account?".to_string()));
        view.push(Element::Link {
            label: "Login".to_string(),
            path: Route::Login.path().to_string(),
        });
        view
    }
}

/// Backend messages verbatim; anything else is unexpected
fn failure_message(err: &Error) -> String {
    if err.is_reported() {
        err.to_string()
    } else {
        error!("unexpected error: {}", err);
        format!("Unexpected error: {}", err)
    }
}
