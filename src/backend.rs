//! The two remote collaborators the screens talk to.
//!
//! Screens only see these traits; [`Supabase`] implements both.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::auth::{Identity, Session};
use crate::error::Result;
use crate::Supabase;

/// Table holding one profile row per registered user
pub const USERS_TABLE: &str = "users";

/// Issues and reports sessions.
#[async_trait]
pub trait AuthCollaborator: Send + Sync {
    /// The current session, `None` when signed out
    async fn get_current_session(&self) -> Result<Option<Session>>;

    /// Sign in with email and password
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session>;

    /// Create a credential for email and password
    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity>;
}

/// Stores application rows.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert `rows` (a JSON array of objects) into `table`
    async fn insert(&self, table: &str, rows: Value) -> Result<()>;
}

/// Application level profile written after sign up
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub username: String,
    pub email: String,
}

/// Handles to both collaborators, shared by every screen.
#[derive(Clone)]
pub struct Collaborators {
    pub auth: Arc<dyn AuthCollaborator>,
    pub records: Arc<dyn RecordStore>,
}

impl Collaborators {
    /// Both collaborators backed by one Supabase client
    pub fn supabase(client: Supabase) -> Self {
        let client = Arc::new(client);
        Self {
            auth: client.clone(),
            records: client,
        }
    }
}

#[async_trait]
impl AuthCollaborator for Supabase {
    async fn get_current_session(&self) -> Result<Option<Session>> {
        self.auth.get_session().await
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        self.auth.sign_in_with_password(email, password).await
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity> {
        self.auth.sign_up(email, password).await
    }
}

#[async_trait]
impl RecordStore for Supabase {
    async fn insert(&self, table: &str, rows: Value) -> Result<()> {
        self.from(table)?.insert(rows).execute_no_return().await
    }
}
