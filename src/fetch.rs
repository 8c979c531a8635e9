//! HTTP request helper for the auth and database services

use std::time::Duration;

use log::{debug, warn};
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client, Method, RequestBuilder, Response,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use url::Url;

use crate::error::Error;

/// The backend service a request is addressed to.
///
/// Decides which error variant a failed response turns into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    /// GoTrue, under `/auth/v1`
    Auth,
    /// PostgREST, under `/rest/v1`
    Database,
}

impl Service {
    fn error(self, message: String) -> Error {
        match self {
            Service::Auth => Error::Auth(message),
            Service::Database => Error::Database(message),
        }
    }
}

/// Helper for building and executing HTTP requests
pub struct FetchBuilder<'a> {
    client: &'a Client,
    url: String,
    method: Method,
    service: Service,
    headers: HeaderMap,
    query_params: Vec<(String, String)>,
    body: Option<Vec<u8>>,
    timeout: Option<Duration>,
}

impl<'a> FetchBuilder<'a> {
    /// Create a new FetchBuilder
    pub fn new(client: &'a Client, url: &str, method: Method, service: Service) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));

        Self {
            client,
            url: url.to_string(),
            method,
            service,
            headers,
            query_params: Vec::new(),
            body: None,
            timeout: None,
        }
    }

    /// Add a header to the request
    pub fn header(mut self, name: &'static str, value: &str) -> Self {
        match HeaderValue::from_str(value) {
            Ok(value) => {
                self.headers.insert(name, value);
            }
            Err(_) => warn!("dropping invalid {} header value", name),
        }
        self
    }

    /// Add bearer token authentication to the request
    pub fn bearer_auth(self, token: &str) -> Self {
        self.header("Authorization", &format!("Bearer {}", token))
    }

    /// Add a query parameter to the request
    pub fn query(mut self, key: &str, value: &str) -> Self {
        self.query_params.push((key.to_string(), value.to_string()));
        self
    }

    /// Add a JSON body to the request
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self, Error> {
        let json = serde_json::to_vec(body)?;
        self.body = Some(json);
        Ok(self)
    }

    /// Set a per-request timeout
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the request
    fn build(&self) -> Result<RequestBuilder, Error> {
        let mut url = Url::parse(&self.url)?;

        if !self.query_params.is_empty() {
            let mut query_pairs = url.query_pairs_mut();
            for (key, value) in &self.query_params {
                query_pairs.append_pair(key, value);
            }
        }

        debug!("{} {}", self.method, url.path());

        let mut req = self.client.request(self.method.clone(), url.as_str());
        req = req.headers(self.headers.clone());

        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }

        if let Some(body) = &self.body {
            req = req.body(body.clone());
        }

        Ok(req)
    }

    /// Send the request and turn a non-success status into a service error
    async fn send(&self) -> Result<Response, Error> {
        let response = self.build()?.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await?;
            debug!("{} {} failed with {}", self.method, self.url, status);
            return Err(self.service.error(error_message(status.as_u16(), &text)));
        }

        Ok(response)
    }

    /// Execute the request and parse the response as JSON
    pub async fn execute<T: DeserializeOwned>(&self) -> Result<T, Error> {
        let response = self.send().await?;
        let result = response.json::<T>().await?;
        Ok(result)
    }

    /// Execute the request, ignoring any response body
    pub async fn execute_empty(&self) -> Result<(), Error> {
        self.send().await?;
        Ok(())
    }
}

/// Helper for creating HTTP requests
pub struct Fetch;

impl Fetch {
    /// Create a POST request
    pub fn post<'a>(client: &'a Client, url: &str, service: Service) -> FetchBuilder<'a> {
        FetchBuilder::new(client, url, Method::POST, service)
    }
}

/// Pull the human readable message out of an error body.
///
/// GoTrue uses `msg` (newer) or `error_description` / `error` (older),
/// PostgREST uses `message`. Falls back to the raw body, then the status.
pub(crate) fn error_message(status: u16, body: &str) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        for key in ["msg", "message", "error_description", "error"] {
            if let Some(Value::String(message)) = map.get(key) {
                if !message.is_empty() {
                    return message.clone();
                }
            }
        }
    }

    let body = body.trim();
    if body.is_empty() {
        format!("Request failed with status {}", status)
    } else {
        body.to_string()
    }
}
