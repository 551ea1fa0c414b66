//! The HTTP seam scanners talk through.
//!
//! Scanners never hold a `reqwest::Client` directly; they call an
//! [`HttpTransport`], so tests can substitute a recording stub and the real
//! network is only reached through [`ReqwestTransport`].

use crate::error::{Result, TransportError};
use async_trait::async_trait;
use lookout_core::ScanningConfig;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Body of an outgoing POST.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// `application/json`
    Json(serde_json::Value),
    /// `application/x-www-form-urlencoded`
    Form(Vec<(String, String)>),
}

/// An outgoing POST request.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    /// Absolute URL
    pub url: String,
    /// Extra headers, applied in order
    pub headers: Vec<(String, String)>,
    /// Request body
    pub body: RequestBody,
}

impl HttpRequest {
    /// POST `body` as JSON.
    #[must_use]
    pub fn json(url: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
            body: RequestBody::Json(body),
        }
    }

    /// POST `fields` as a urlencoded form.
    #[must_use]
    pub fn form(url: impl Into<String>, fields: &[(&str, &str)]) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
            body: RequestBody::Form(
                fields
                    .iter()
                    .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                    .collect(),
            ),
        }
    }

    /// Add a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Value of the first header named `name` (case-insensitive).
    #[must_use]
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A received response: status code and raw body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body
    pub body: String,
}

impl HttpResponse {
    /// Whether the status is 2xx.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_str(&self.body)
    }
}

/// Sends POST requests for scanners.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send `request` and return the response, whatever its status code.
    ///
    /// # Errors
    /// Returns error only when no response was received.
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// Build an HTTP client with the configured timeout and user agent.
///
/// # Errors
/// Returns error if the HTTP client cannot be created.
pub fn build_http_client(timeout_secs: u64, user_agent: &str) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(user_agent)
        .build()
        .map_err(|e| TransportError::ClientBuild(e.to_string()))
}

/// [`HttpTransport`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport from the scanning configuration.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(config: &ScanningConfig) -> Result<Self> {
        Ok(Self {
            client: build_http_client(config.timeout_secs, &config.user_agent)?,
        })
    }

    /// Wrap an existing client.
    #[must_use]
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut builder = self.client.post(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder = match &request.body {
            RequestBody::Json(body) => builder.json(body),
            RequestBody::Form(fields) => builder.form(fields),
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!(url = %request.url, status, "received scan response");

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(30, "lookout-test");
        assert!(client.is_ok());
    }

    #[test]
    fn test_reqwest_transport_from_config() {
        let transport = ReqwestTransport::new(&ScanningConfig::default());
        assert!(transport.is_ok());
    }

    #[test]
    fn test_request_builders() {
        let request = HttpRequest::form("https://x.example/submit", &[("url", "http://a.b")])
            .header("API-Key", "secret");
        assert_eq!(request.header_value("api-key"), Some("secret"));
        assert_eq!(
            request.body,
            RequestBody::Form(vec![("url".to_string(), "http://a.b".to_string())])
        );
    }

    #[test]
    fn test_response_helpers() {
        let ok = HttpResponse {
            status: 201,
            body: r#"{"uuid":"abc"}"#.to_string(),
        };
        assert!(ok.is_success());
        let value: serde_json::Value = ok.json().expect("parse json");
        assert_eq!(value["uuid"], "abc");

        let denied = HttpResponse {
            status: 401,
            body: String::new(),
        };
        assert!(!denied.is_success());
    }
}
