//! Configuration for the backend client and the application

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};

/// Value sent in the `X-Client-Info` header
pub const DEFAULT_CLIENT_INFO: &str = concat!("mobprog/", env!("CARGO_PKG_VERSION"));

/// Configuration options for the backend client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Whether to refresh an expired session with its refresh token
    pub auto_refresh_token: bool,

    /// Where to keep the session between processes; `None` keeps it in memory
    pub persist_session: Option<PathBuf>,

    /// The request timeout
    pub request_timeout: Option<Duration>,

    /// The database schema
    pub db_schema: String,

    /// The `X-Client-Info` header value
    pub client_info: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            auto_refresh_token: true,
            persist_session: None,
            request_timeout: Some(Duration::from_secs(30)),
            db_schema: "public".to_string(),
            client_info: DEFAULT_CLIENT_INFO.to_string(),
        }
    }
}

impl ClientOptions {
    /// Set whether to automatically refresh the token
    pub fn with_auto_refresh_token(mut self, value: bool) -> Self {
        self.auto_refresh_token = value;
        self
    }

    /// Persist the session to the given JSON file
    pub fn with_persist_session(mut self, path: impl Into<PathBuf>) -> Self {
        self.persist_session = Some(path.into());
        self
    }

    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the database schema
    pub fn with_db_schema(mut self, value: &str) -> Self {
        self.db_schema = value.to_string();
        self
    }

    /// Set the client info header
    pub fn with_client_info(mut self, value: &str) -> Self {
        self.client_info = value.to_string();
        self
    }
}

/// Project settings read from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the Supabase project
    pub url: Url,
    /// Anonymous (public) API key
    pub anon_key: String,
    /// Optional session file
    pub session_file: Option<PathBuf>,
}

impl AppConfig {
    /// Build a configuration, validating the URL and key.
    pub fn new(url: &str, anon_key: &str) -> Result<Self> {
        let url = Url::parse(url)?;
        if anon_key.trim().is_empty() {
            return Err(Error::config("anon key cannot be empty"));
        }
        // the key travels in the `apikey` header
        if !anon_key.chars().all(|c| c.is_ascii_graphic()) {
            return Err(Error::config("anon key must be printable ASCII without spaces"));
        }
        Ok(Self {
            url,
            anon_key: anon_key.to_string(),
            session_file: None,
        })
    }

    /// Read `SUPABASE_URL`, `SUPABASE_ANON_KEY` and `MOBPROG_SESSION_FILE`
    /// from the process environment. Call `dotenvy::dotenv()` first to pick
    /// up a `.env` file.
    pub fn from_env() -> Result<Self> {
        let url = std::env::var("SUPABASE_URL")
            .map_err(|_| Error::config("SUPABASE_URL environment variable not found"))?;
        let anon_key = std::env::var("SUPABASE_ANON_KEY")
            .map_err(|_| Error::config("SUPABASE_ANON_KEY environment variable not found"))?;

        let mut config = Self::new(&url, &anon_key)?;
        config.session_file = std::env::var_os("MOBPROG_SESSION_FILE").map(PathBuf::from);
        Ok(config)
    }

    /// Set the session file
    pub fn with_session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_file = Some(path.into());
        self
    }

    /// Client options derived from this configuration
    pub fn client_options(&self) -> ClientOptions {
        match &self.session_file {
            Some(path) => ClientOptions::default().with_persist_session(path.clone()),
            None => ClientOptions::default(),
        }
    }

    /// The project URL without a trailing slash
    pub fn base_url(&self) -> String {
        self.url.as_str().trim_end_matches('/').to_string()
    }
}
