//! Database writes through the PostgREST API

mod query;

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;

pub use query::*;

/// Client for database operations on one table
pub struct PostgrestClient {
    /// The base URL for the Supabase project
    url: String,

    /// The table or view name
    table: String,

    /// HTTP client
    client: Client,

    /// Headers sent with every request
    context: RequestContext,
}

impl PostgrestClient {
    /// Create a new PostgrestClient.
    ///
    /// Requests are authorised with `access_token` when a user is signed
    /// in and with the anonymous key otherwise.
    pub(crate) fn new(
        url: &str,
        key: &str,
        table: &str,
        client: Client,
        access_token: Option<String>,
    ) -> Self {
        Self {
            url: url.to_string(),
            table: table.to_string(),
            client,
            context: RequestContext {
                key: key.to_string(),
                bearer: access_token.unwrap_or_else(|| key.to_string()),
                schema: "public".to_string(),
                client_info: crate::config::DEFAULT_CLIENT_INFO.to_string(),
                timeout: None,
            },
        }
    }

    /// Address a schema other than `public`
    pub fn schema(mut self, schema: &str) -> Self {
        self.context.schema = schema.to_string();
        self
    }

    /// Set the `X-Client-Info` header
    pub fn client_info(mut self, value: &str) -> Self {
        self.context.client_info = value.to_string();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.context.timeout = timeout;
        self
    }

    /// Get the base URL for REST API requests
    fn get_url(&self) -> String {
        format!("{}/rest/v1/{}", self.url, self.table)
    }

    /// Insert data into the table
    pub fn insert<T: Serialize>(&self, values: T) -> InsertBuilder<T> {
        InsertBuilder::new(
            self.get_url(),
            values,
            self.client.clone(),
            self.context.clone(),
        )
    }
}
