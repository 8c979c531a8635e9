//! Write builders for PostgrestClient

use std::time::Duration;

use log::debug;
use reqwest::Client;
use serde::Serialize;

use crate::error::Error;
use crate::fetch::{Fetch, Service};

/// Headers shared by every request of one PostgrestClient
#[derive(Debug, Clone)]
pub(crate) struct RequestContext {
    pub key: String,
    pub bearer: String,
    pub schema: String,
    pub client_info: String,
    pub timeout: Option<Duration>,
}

/// Builder for INSERT queries
pub struct InsertBuilder<T: Serialize> {
    /// The table URL
    url: String,

    /// The rows to insert
    values: T,

    /// HTTP client
    client: Client,

    /// Shared request headers
    context: RequestContext,
}

impl<T: Serialize> InsertBuilder<T> {
    pub(crate) fn new(url: String, values: T, client: Client, context: RequestContext) -> Self {
        Self {
            url,
            values,
            client,
            context,
        }
    }

    /// Execute the insert without returning the inserted data
    pub async fn execute_no_return(&self) -> Result<(), Error> {
        debug!("insert into {}", self.url);
        Fetch::post(&self.client, &self.url, Service::Database)
            .header("apikey", &self.context.key)
            .bearer_auth(&self.context.bearer)
            .header("X-Client-Info", &self.context.client_info)
            .header("Content-Profile", &self.context.schema)
            .header("Prefer", "return=minimal")
            .timeout(self.context.timeout)
            .json(&self.values)?
            .execute_empty()
            .await
    }
}
