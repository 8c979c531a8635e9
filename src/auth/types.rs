//! Types for authentication

use serde::{Deserialize, Serialize};

use super::session::Session;

/// User data as returned by the auth service.
///
/// Only the fields the application looks at are kept; everything else in
/// the payload is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// The user ID
    pub id: String,

    /// The user's email address
    #[serde(default)]
    pub email: Option<String>,

    /// The user's phone number
    #[serde(default)]
    pub phone: Option<String>,

    /// The user's role
    #[serde(default)]
    pub role: Option<String>,

    /// When the email was confirmed, if it has been
    #[serde(default)]
    pub email_confirmed_at: Option<String>,

    /// The creation time
    #[serde(default)]
    pub created_at: Option<String>,
}

/// The identity created by a sign up.
///
/// `session` is only present when the project confirms emails
/// automatically; otherwise the user has to follow the confirmation link
/// before signing in.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    /// The new user
    pub user: User,
    /// Session issued with the sign up, if any
    pub session: Option<Session>,
}

/// Email and password body for sign up and sign in
#[derive(Debug, Serialize)]
pub(crate) struct PasswordCredentials<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Body for the refresh token grant
#[derive(Debug, Serialize)]
pub(crate) struct RefreshTokenBody<'a> {
    pub refresh_token: &'a str,
}
