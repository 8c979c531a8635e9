//! The application's screens.

pub mod form;
pub mod homepage;
pub mod login;
pub mod not_found;
pub mod register;
pub mod validation;

pub use form::{Field, FormStatus, Phase, SubmitOutcome};
pub use homepage::{GateState, SessionGate};
pub use login::{LoginField, LoginForm};
pub use register::{RegisterField, RegisterForm};
