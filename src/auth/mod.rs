//! Authentication against the Supabase auth service

mod session;
mod types;

use std::sync::Arc;

use log::{debug, info, warn};
use reqwest::Client;
use serde_json::Value;

use crate::config::ClientOptions;
use crate::error::{Error, Result};
use crate::fetch::{Fetch, Service};

pub use session::*;
pub use types::*;

/// Client for Supabase Authentication
pub struct Auth {
    /// The base URL for the Supabase project
    url: String,

    /// The anonymous API key for the Supabase project
    key: String,

    /// HTTP client used for requests
    client: Client,

    /// Where the current session lives
    store: Arc<dyn SessionStore>,

    /// Client options
    options: ClientOptions,
}

impl Auth {
    /// Create a new Auth client, keeping the session where `options` says
    pub(crate) fn new(url: &str, key: &str, client: Client, options: ClientOptions) -> Self {
        let store: Arc<dyn SessionStore> = match &options.persist_session {
            Some(path) => Arc::new(FileSessionStore::new(path.clone())),
            None => Arc::new(MemorySessionStore::default()),
        };
        Self::with_store(url, key, client, options, store)
    }

    /// Create a new Auth client with an explicit session store
    pub(crate) fn with_store(
        url: &str,
        key: &str,
        client: Client,
        options: ClientOptions,
        store: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            url: url.to_string(),
            key: key.to_string(),
            client,
            store,
            options,
        }
    }

    fn get_auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1{}", self.url, path)
    }

    /// Sign up a new user with email and password
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<Identity> {
        let url = self.get_auth_url("/signup");

        let body = Fetch::post(&self.client, &url, Service::Auth)
            .header("apikey", &self.key)
            .header("X-Client-Info", &self.options.client_info)
            .timeout(self.options.request_timeout)
            .json(&PasswordCredentials { email, password })?
            .execute::<Value>()
            .await?;

        let identity = parse_sign_up(body)?;

        // Projects that auto-confirm emails sign the new user in right away
        if let Some(ref session) = identity.session {
            self.store.save(session)?;
        }

        info!("signed up user {}", identity.user.id);
        Ok(identity)
    }

    /// Sign in a user with email and password
    pub async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session> {
        let url = self.get_auth_url("/token");

        let session = Fetch::post(&self.client, &url, Service::Auth)
            .query("grant_type", "password")
            .header("apikey", &self.key)
            .header("X-Client-Info", &self.options.client_info)
            .timeout(self.options.request_timeout)
            .json(&PasswordCredentials { email, password })?
            .execute::<Session>()
            .await?
            .stamped();

        self.store.save(&session)?;

        info!("signed in user {}", session.user.id);
        Ok(session)
    }

    /// Exchange a refresh token for a new session
    pub async fn refresh_session(&self, refresh_token: &str) -> Result<Session> {
        let url = self.get_auth_url("/token");

        let session = Fetch::post(&self.client, &url, Service::Auth)
            .query("grant_type", "refresh_token")
            .header("apikey", &self.key)
            .header("X-Client-Info", &self.options.client_info)
            .timeout(self.options.request_timeout)
            .json(&RefreshTokenBody { refresh_token })?
            .execute::<Session>()
            .await?
            .stamped();

        self.store.save(&session)?;

        debug!("refreshed session for user {}", session.user.id);
        Ok(session)
    }

    /// Get the current session.
    ///
    /// An expired session is refreshed when `auto_refresh_token` is set.
    /// If the refresh is rejected the stored session is dropped and the
    /// error returned.
    pub async fn get_session(&self) -> Result<Option<Session>> {
        let session = match self.store.load()? {
            Some(session) => session,
            None => return Ok(None),
        };

        if !session.is_expired() {
            return Ok(Some(session));
        }

        if !self.options.auto_refresh_token {
            debug!("stored session expired and auto refresh is off");
            return Ok(None);
        }

        match self.refresh_session(&session.refresh_token).await {
            Ok(refreshed) => Ok(Some(refreshed)),
            Err(err) => {
                warn!("session refresh failed: {}", err);
                self.store.clear()?;
                Err(err)
            }
        }
    }

    /// The access token of the stored session, if there is one
    pub(crate) fn access_token(&self) -> Result<Option<String>> {
        Ok(self.store.load()?.map(|session| session.access_token))
    }
}

/// Sign up answers with a session when the email is confirmed
/// automatically and with the bare user object otherwise.
fn parse_sign_up(body: Value) -> Result<Identity> {
    if body.get("access_token").is_some() {
        let session = serde_json::from_value::<Session>(body)?.stamped();
        return Ok(Identity {
            user: session.user.clone(),
            session: Some(session),
        });
    }

    let user_value = match body.get("user") {
        Some(user) if user.is_object() => user.clone(),
        _ => body,
    };
    let user = serde_json::from_value::<User>(user_value)?;
    if user.id.is_empty() {
        return Err(Error::auth("Sign up returned no user"));
    }

    Ok(Identity {
        user,
        session: None,
    })
}
