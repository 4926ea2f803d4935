//! REST client for the placement-tracker backend.
//!
//! [`PlacementApi`] holds the base URL and a shared [`reqwest::Client`];
//! the route groups are implemented as further `impl PlacementApi` blocks in
//! [`crate::auth`], [`crate::departments`], [`crate::companies`],
//! [`crate::experiences`] and [`crate::admin`].

use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;

/// Bodies longer than this are not shown to users verbatim.
const MAX_PLAIN_MESSAGE_LEN: usize = 200;

/// HTTP client for one backend.
#[derive(Debug, Clone)]
pub struct PlacementApi {
    client: reqwest::Client,
    api_url: String,
    token: Option<String>,
}

/// Errors from the REST layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code.
    #[error("Placement API error ({status}): {body}")]
    Api {
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// A 2xx response whose body did not match the expected shape.
    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// A request URL could not be built from the base URL.
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            Self::Decode(_) | Self::InvalidUrl(_) => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Text suitable for a transient user notification.
    ///
    /// Prefers the backend's `message` field, then its `errors` list, then a
    /// short plain-text body; otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Api { body, .. } => message_from_body(body).unwrap_or_else(|| fallback.to_string()),
            Self::Request(e) if e.is_timeout() => "The server took too long to respond".to_string(),
            Self::Request(e) if e.is_connect() => "Could not reach the server".to_string(),
            _ => fallback.to_string(),
        }
    }
}

fn message_from_body(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
            return Some(message.to_string()).filter(|m| !m.trim().is_empty());
        }
        if let Some(errors) = value.get("errors").and_then(|e| e.as_array()) {
            let joined = errors
                .iter()
                .filter_map(|e| e.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            return Some(joined).filter(|m| !m.is_empty());
        }
        return value.as_str().map(str::to_string);
    }
    if body.len() <= MAX_PLAIN_MESSAGE_LEN && !body.starts_with('<') {
        return Some(body.to_string());
    }
    None
}

impl PlacementApi {
    /// Create a client for `api_url`, e.g. `http://host:8080/api`.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_url)
    }

    /// Reuse an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            api_url,
            token: None,
        }
    }

    /// Build a client honouring the configured URL and timeout.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self::with_client(client, config.api_url.clone()))
    }

    /// Send `Authorization: Bearer <token>` on every request.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    // ---- request plumbing shared by the route modules ----

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.api_url, path);
        tracing::debug!(%method, %url, "Placement API request");
        self.authorized(self.client.request(method, url))
    }

    /// Like [`request`](Self::request), with `segment` percent-encoded as
    /// the last path segment (company names may contain spaces or `/`).
    pub(crate) fn request_with_segment(
        &self,
        method: Method,
        path: &str,
        segment: &str,
    ) -> Result<RequestBuilder, ApiError> {
        self.request_with_segments(method, path, &[segment])
    }

    /// Append each of `segments` to `path`, percent-encoded.
    pub(crate) fn request_with_segments(
        &self,
        method: Method,
        path: &str,
        segments: &[&str],
    ) -> Result<RequestBuilder, ApiError> {
        let mut url = Url::parse(&format!("{}{}", self.api_url, path))
            .map_err(|e| ApiError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.api_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        tracing::debug!(%method, %url, "Placement API request");
        Ok(self.authorized(self.client.request(method, url)))
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub(crate) fn get(&self, path: &str) -> RequestBuilder {
        self.request(Method::GET, path)
    }

    pub(crate) fn post(&self, path: &str) -> RequestBuilder {
        self.request(Method::POST, path)
    }

    pub(crate) fn put(&self, path: &str) -> RequestBuilder {
        self.request(Method::PUT, path)
    }

    pub(crate) fn patch(&self, path: &str) -> RequestBuilder {
        self.request(Method::PATCH, path)
    }

    pub(crate) fn delete(&self, path: &str) -> RequestBuilder {
        self.request(Method::DELETE, path)
    }

    /// Send and decode a JSON body.
    pub(crate) async fn fetch<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, ApiError> {
        let response = builder.send().await?;
        Self::parse_response(response).await
    }

    /// Send and discard the body.
    pub(crate) async fn execute(builder: RequestBuilder) -> Result<(), ApiError> {
        let response = builder.send().await?;
        Self::check_status(response).await
    }

    /// Send and return the body as text (some routes answer with a bare
    /// string).
    pub(crate) async fn fetch_text(builder: RequestBuilder) -> Result<String, ApiError> {
        let response = builder.send().await?;
        let response = Self::ensure_success(response).await?;
        Ok(response.text().await?)
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the response
    /// unchanged on success, or [`ApiError::Api`] with the status and body
    /// text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::debug!(status = status.as_u16(), "Placement API returned an error status");
            return Err(ApiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let response = Self::ensure_success(response).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Assert the response has a success status code, discarding the body.
    async fn check_status(response: reqwest::Response) -> Result<(), ApiError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(body: &str) -> ApiError {
        ApiError::Api {
            status: 400,
            body: body.to_string(),
        }
    }

    #[test]
    fn user_message_prefers_backend_message() {
        let err = api_error(r#"{"message":"Roll number already registered","status":400}"#);
        assert_eq!(err.user_message("fallback"), "Roll number already registered");
    }

    #[test]
    fn user_message_joins_error_list() {
        let err = api_error(r#"{"errors":["Email is required","Password is required"]}"#);
        assert_eq!(
            err.user_message("fallback"),
            "Email is required, Password is required"
        );
    }

    #[test]
    fn user_message_uses_short_plain_bodies_only() {
        assert_eq!(api_error("Mentor not found").user_message("x"), "Mentor not found");
        assert_eq!(api_error("<html>oops</html>").user_message("x"), "x");
        assert_eq!(api_error("").user_message("x"), "x");
        assert_eq!(api_error(&"a".repeat(500)).user_message("x"), "x");
    }

    #[test]
    fn status_and_not_found() {
        let err = ApiError::Api {
            status: 404,
            body: String::new(),
        };
        assert_eq!(err.status(), Some(404));
        assert!(err.is_not_found());
    }

    #[test]
    fn path_segments_are_encoded() {
        let api = PlacementApi::new("http://localhost:8080/api");
        let request = api
            .request_with_segment(Method::GET, "/companies/name", "Acme / Sons")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(
            request.url().as_str(),
            "http://localhost:8080/api/companies/name/Acme%20%2F%20Sons"
        );
    }

    #[test]
    fn nested_segments_follow_the_path() {
        let api = PlacementApi::new("http://localhost:8080/api");
        let request = api
            .request_with_segments(Method::GET, "/departments", &["3", "related"])
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(
            request.url().as_str(),
            "http://localhost:8080/api/departments/3/related"
        );
    }

    #[test]
    fn base_url_loses_trailing_slash() {
        let api = PlacementApi::new("http://localhost:8080/api/");
        assert_eq!(api.api_url(), "http://localhost:8080/api");
    }
}
