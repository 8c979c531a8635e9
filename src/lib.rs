//! mobprog: login, registration and a gated homepage on top of Supabase
//!
//! The crate has two halves. [`Supabase`] is a small client for the parts
//! of the hosted backend the application talks to: the auth service and
//! inserts through PostgREST. The screens in [`screens`] are state
//! machines that validate input, call the backend through the traits in
//! [`backend`], and describe what to show as a [`view::View`]. [`app::App`]
//! ties the screens to the [`router::Navigator`].

pub mod app;
pub mod auth;
pub mod backend;
pub mod config;
pub mod error;
pub mod fetch;
pub mod postgrest;
pub mod router;
pub mod screens;
pub mod view;

use reqwest::Client;

use crate::auth::Auth;
use crate::config::{AppConfig, ClientOptions};
use crate::error::Result;
use crate::postgrest::PostgrestClient;

/// The entry point for the Supabase backend client
pub struct Supabase {
    /// The base URL for the Supabase project
    pub url: String,
    /// The anonymous API key for the Supabase project
    pub key: String,
    /// HTTP client used for requests
    pub http_client: Client,
    /// Auth client for sign up, sign in and the current session
    pub auth: Auth,
    /// Client options
    pub options: ClientOptions,
}

impl Supabase {
    /// Create a new Supabase client
    ///
    /// # Example
    ///
    /// ```
    /// use mobprog::Supabase;
    ///
    /// let supabase = Supabase::new("https://your-project-url.supabase.co", "your-anon-key");
    /// ```
    pub fn new(supabase_url: &str, supabase_key: &str) -> Self {
        Self::new_with_options(supabase_url, supabase_key, ClientOptions::default())
    }

    /// Create a new Supabase client with custom options
    ///
    /// # Example
    ///
    /// ```
    /// use mobprog::{Supabase, config::ClientOptions};
    ///
    /// let options = ClientOptions::default().with_auto_refresh_token(false);
    /// let supabase = Supabase::new_with_options(
    ///     "https://your-project-url.supabase.co",
    ///     "your-anon-key",
    ///     options
    /// );
    /// ```
    pub fn new_with_options(supabase_url: &str, supabase_key: &str, options: ClientOptions) -> Self {
        let url = supabase_url.trim_end_matches('/');
        let http_client = Client::new();

        let auth = Auth::new(url, supabase_key, http_client.clone(), options.clone());

        Self {
            url: url.to_string(),
            key: supabase_key.to_string(),
            http_client,
            auth,
            options,
        }
    }

    /// Create a client from validated application configuration
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new_with_options(&config.base_url(), &config.anon_key, config.client_options())
    }

    /// Get a reference to the auth client
    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    /// Create a PostgrestClient for a table, authorised as the signed in
    /// user when there is one
    pub fn from(&self, table: &str) -> Result<PostgrestClient> {
        let access_token = self.auth.access_token()?;
        Ok(PostgrestClient::new(
            &self.url,
            &self.key,
            table,
            self.http_client.clone(),
            access_token,
        )
        .schema(&self.options.db_schema)
        .client_info(&self.options.client_info)
        .timeout(self.options.request_timeout))
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::app::App;
    pub use crate::backend::{AuthCollaborator, Collaborators, RecordStore};
    pub use crate::config::{AppConfig, ClientOptions};
    pub use crate::error::{Error, Result};
    pub use crate::router::{Navigator, Route};
    pub use crate::Supabase;
}
