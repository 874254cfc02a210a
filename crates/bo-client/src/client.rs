//! Core HTTP client: one round trip per call, no retry.

use base64::Engine as _;
use tracing::{debug, info, instrument};

use crate::config::ClientConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::request::{RequestBuilder, RequestMethod};
use crate::response::ApiResponse;

/// Header carrying the platform bearer token. Kept distinct from the standard
/// `Authorization` header, which is reserved for basic credentials.
pub const BEARER_HEADER: &str = "X-Api-Authorization";

/// HTTP client for platform APIs. Every operation is a single stateless
/// request/response round trip; failures are terminal for that call.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
    config: ClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .user_agent(&config.user_agent)
            .gzip(true)
            .deflate(true)
            .cookie_store(true)
            .build()
            .map_err(|e| Error::with_source(ErrorKind::Config(e.to_string()), e))?;

        Ok(Self { inner, config })
    }

    /// Create a new HTTP client with default configuration.
    pub fn default_client() -> Result<Self> {
        Self::new(ClientConfig::default())
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Create a GET request builder.
    pub fn get(&self, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(RequestMethod::Get, url)
    }

    /// Create a POST request builder.
    pub fn post(&self, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(RequestMethod::Post, url)
    }

    /// Execute a request and return the raw status/body pair.
    #[instrument(skip(self, request), fields(method = ?request.method, url = %request.url))]
    pub async fn execute(&self, request: RequestBuilder) -> Result<ApiResponse> {
        let mut req = self
            .inner
            .request(request.method.to_reqwest(), &request.url);

        // Exactly one authorization header: bearer wins over basic.
        if let Some(ref token) = request.bearer_token {
            req = req.header(BEARER_HEADER, format!("Bearer {token}"));
        } else if let Some((ref username, ref password)) = request.basic_credentials {
            let encoded = base64::engine::general_purpose::STANDARD
                .encode(format!("{username}:{password}"));
            req = req.header("Authorization", format!("Basic {encoded}"));
        }

        for (name, value) in &request.headers {
            req = req.header(name.as_str(), value.as_str());
        }

        if let Some(ref body) = request.form_body {
            req = req.body(body.clone());
        }

        if self.config.enable_tracing {
            debug!(
                method = ?request.method,
                url = %request.url,
                "Sending request"
            );
        }

        let response = req.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        if self.config.enable_tracing {
            if status == 200 {
                debug!(status, body_len = body.len(), "Response received");
            } else {
                info!(status, body_len = body.len(), "Non-success response");
            }
        }

        Ok(ApiResponse::new(status, body))
    }

    /// Execute a request and parse the platform envelope, returning the
    /// resolved payload.
    pub async fn call(&self, request: RequestBuilder) -> Result<serde_json::Value> {
        self.execute(request).await?.payload()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_client_creation() {
        let client = HttpClient::default_client().unwrap();
        assert!(client.config().enable_tracing);
    }

    #[tokio::test]
    async fn test_get_unwraps_envelope() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/json/app"))
            .and(query_param("action", "getinfo"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "type": "appinfo",
                "response": {"version": "5.0"}
            })))
            .mount(&mock_server)
            .await;

        let client = HttpClient::default_client().unwrap();
        let payload = client
            .call(client.get(format!("{}/api/json/app?action=getinfo", mock_server.uri())))
            .await
            .unwrap();

        assert_eq!(payload["version"], "5.0");
    }

    #[tokio::test]
    async fn test_bearer_header_preferred_over_basic() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/auth"))
            .and(header(BEARER_HEADER, "Bearer tok-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "type": "ok",
                "response": {}
            })))
            .mount(&mock_server)
            .await;

        let client = HttpClient::default_client().unwrap();
        let result = client
            .call(
                client
                    .get(format!("{}/auth", mock_server.uri()))
                    .basic_auth("user", "pass")
                    .bearer_auth("tok-123"),
            )
            .await;

        // The mock only matches when the bearer header is present; a basic
        // Authorization header would not satisfy it.
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_basic_auth_header() {
        let mock_server = MockServer::start().await;

        // base64("user:pass")
        Mock::given(method("GET"))
            .and(path("/auth"))
            .and(header("Authorization", "Basic dXNlcjpwYXNz"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "type": "ok",
                "response": {}
            })))
            .mount(&mock_server)
            .await;

        let client = HttpClient::default_client().unwrap();
        let result = client
            .call(
                client
                    .get(format!("{}/auth", mock_server.uri()))
                    .basic_auth("user", "pass"),
            )
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_form_body_posts_encoded_parameters() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/json/obj"))
            .and(header("Content-Type", "application/x-www-form-urlencoded; charset=utf-8"))
            .and(body_string("name=Widget%25"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "type": "list",
                "response": {"list": []}
            })))
            .mount(&mock_server)
            .await;

        let client = HttpClient::default_client().unwrap();
        let payload = client
            .call(
                client
                    .post(format!("{}/api/json/obj", mock_server.uri()))
                    .form("name=Widget%25"),
            )
            .await
            .unwrap();

        assert!(payload["list"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_server_error_envelope() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/err"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "type": "error",
                "response": {"message": "No such object", "status": 404}
            })))
            .mount(&mock_server)
            .await;

        let client = HttpClient::default_client().unwrap();
        let err = client
            .call(client.get(format!("{}/err", mock_server.uri())))
            .await
            .unwrap_err();

        assert_eq!(err.message(), Some("No such object"));
        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn test_non_200_status_synthesized() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/boom"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let client = HttpClient::default_client().unwrap();
        let err = client
            .call(client.get(format!("{}/boom", mock_server.uri())))
            .await
            .unwrap_err();

        assert_eq!(err.message(), Some("HTTP status: 503"));
        assert_eq!(err.status(), Some(503));
    }
}
