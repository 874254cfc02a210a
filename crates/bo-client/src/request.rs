//! HTTP request building for the platform's form-encoded call convention.

use std::collections::HashMap;

/// HTTP request method. The platform API only ever uses GET (no payload)
/// and POST (form-encoded payload).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    Get,
    Post,
}

impl RequestMethod {
    /// Convert to reqwest::Method.
    pub fn to_reqwest(&self) -> reqwest::Method {
        match self {
            RequestMethod::Get => reqwest::Method::GET,
            RequestMethod::Post => reqwest::Method::POST,
        }
    }
}

/// Builder for platform HTTP requests.
#[derive(Debug)]
pub struct RequestBuilder {
    pub(crate) method: RequestMethod,
    pub(crate) url: String,
    pub(crate) headers: HashMap<String, String>,
    /// Pre-encoded form body (see [`crate::encode_params`]).
    pub(crate) form_body: Option<String>,
    pub(crate) basic_credentials: Option<(String, String)>,
    pub(crate) bearer_token: Option<String>,
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new(method: RequestMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            form_body: None,
            basic_credentials: None,
            bearer_token: None,
        }
    }

    /// Set the bearer token. When present it takes precedence over basic
    /// credentials; exactly one authorization header is ever sent.
    pub fn bearer_auth(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Set basic-auth credentials, used only when no bearer token is set.
    pub fn basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.basic_credentials = Some((username.into(), password.into()));
        self
    }

    /// Add a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set a pre-encoded form body and switch the request to POST.
    pub fn form(mut self, body: impl Into<String>) -> Self {
        self.method = RequestMethod::Post;
        self.form_body = Some(body.into());
        self.headers.insert(
            "Content-Type".to_string(),
            "application/x-www-form-urlencoded; charset=utf-8".to_string(),
        );
        self
    }
}
