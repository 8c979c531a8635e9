//! State shared by the login and registration forms.

use super::validation::{check, Rule};
use crate::view::{Element, View};

/// Where a form is in its submit cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// What a submit attempt did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A submit was already in flight
    Ignored,
    /// Validation failed; nothing was sent
    Invalid,
    Succeeded,
    Failed,
}

/// One text input with its rules.
#[derive(Debug, Clone)]
pub struct Field {
    value: String,
    touched: bool,
    error: Option<&'static str>,
    rules: &'static [Rule],
}

impl Field {
    pub fn new(rules: &'static [Rule]) -> Self {
        Self {
            value: String::new(),
            touched: false,
            error: check("", rules),
            rules,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set(&mut self, value: &str) {
        self.value = value.to_string();
        self.error = check(&self.value, self.rules);
    }

    /// The user left the field
    pub fn blur(&mut self) {
        self.touched = true;
        self.error = check(&self.value, self.rules);
    }

    /// Current error, whether or not it is shown
    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    /// The error as displayed: only once the field has been touched
    pub fn visible_error(&self) -> Option<&'static str> {
        if self.touched {
            self.error
        } else {
            None
        }
    }
}

/// Submit latch and the last outcome message.
#[derive(Debug, Clone, Default)]
pub struct FormStatus {
    phase: Phase,
    error_message: Option<String>,
    success_message: Option<String>,
}

impl FormStatus {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == Phase::Submitting
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn success_message(&self) -> Option<&str> {
        self.success_message.as_deref()
    }

    /// Take the latch and clear old messages; false if it is already held
    pub(crate) fn latch(&mut self) -> bool {
        if self.is_submitting() {
            return false;
        }
        self.phase = Phase::Submitting;
        self.error_message = None;
        self.success_message = None;
        true
    }

    pub(crate) fn succeed(&mut self, message: &str) {
        self.phase = Phase::Succeeded;
        self.success_message = Some(message.to_string());
    }

    pub(crate) fn fail(&mut self, message: String) {
        self.phase = Phase::Failed;
        self.error_message = Some(message);
    }

    /// Messages, progress indicator and submit button
    pub(crate) fn render(&self, view: &mut View, idle_label: &str, busy_label: &str) {
        if let Some(message) = &self.error_message {
            view.push(Element::Error(message.clone()));
        }
        if let Some(message) = &self.success_message {
            view.push(Element::Success(message.clone()));
        }
        if self.is_submitting() {
            view.push(Element::Progress);
        }
        view.push(Element::Button {
            label: if self.is_submitting() { busy_label } else { idle_label }.to_string(),
            enabled: !self.is_submitting(),
        });
    }
}

/// Input plus its error line, if one is showing
pub(crate) fn render_field(view: &mut View, label: &str, shown: &str, field: &Field) {
    view.push(Element::Input {
        label: label.to_string(),
        value: shown.to_string(),
    });
    if let Some(error) = field.visible_error() {
        view.push(Element::FieldError(error.to_string()));
    }
}

/// Password as displayed, masked unless visibility is on
pub(crate) fn shown_password(password: &str, visible: bool) -> String {
    if visible {
        password.to_string()
    } else {
        "*".repeat(password.chars().count())
    }
}
