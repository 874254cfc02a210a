//! Session configuration: server address, credentials, timeout.

use std::time::Duration;

use serde::Deserialize;

use bizobj_client::{Error, ErrorKind, Result};

/// Which URL prefix the platform endpoints live under: the standard API
/// prefix, or the UI prefix when the client runs embedded in the platform's
/// own user interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endpoint {
    #[default]
    Api,
    Ui,
}

impl Endpoint {
    /// Prefix for the application and object JSON services.
    pub(crate) fn service_prefix(self) -> &'static str {
        match self {
            Endpoint::Api => "/api",
            Endpoint::Ui => "/ui",
        }
    }

    /// Prefix for the health-check endpoint (unprefixed on the API side).
    pub(crate) fn health_prefix(self) -> &'static str {
        match self {
            Endpoint::Api => "",
            Endpoint::Ui => "/ui",
        }
    }
}

/// Session configuration.
///
/// The server address is given either as discrete `scheme`/`host`/`port`/
/// `root` components or as a single `url` string; `url` wins when both are
/// set. Credential aliases from other client generations (`login`, `pwd`,
/// `authToken`, `token`) are accepted at deserialization time and resolved
/// onto the canonical fields.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub scheme: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub root: Option<String>,
    /// Full base URL; parsed into the component fields' equivalents.
    pub url: Option<String>,

    #[serde(alias = "login")]
    pub username: Option<String>,
    #[serde(alias = "pwd")]
    pub password: Option<String>,
    #[serde(alias = "authToken", alias = "token")]
    pub authtoken: Option<String>,

    /// Request timeout in seconds (defaults to 30).
    pub timeout: Option<u64>,
    /// Enable request/response tracing.
    pub debug: bool,
    pub endpoint: Endpoint,
}

impl std::fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionConfig")
            .field("scheme", &self.scheme)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("root", &self.root)
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("authtoken", &self.authtoken.as_ref().map(|_| "[REDACTED]"))
            .field("timeout", &self.timeout)
            .field("debug", &self.debug)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the full base URL (scheme://host[:port][/root]).
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = Some(scheme.into());
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        self.root = Some(root.into());
        self
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.authtoken = Some(token.into());
        self
    }

    /// Request timeout in seconds.
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = Some(seconds);
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoint = endpoint;
        self
    }

    /// Request timeout as a duration.
    pub(crate) fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout.unwrap_or(30))
    }
}

/// Resolved server address, derived once from a [`SessionConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerAddress {
    pub scheme: String,
    pub host: String,
    pub port: u16,
    pub root: String,
}

impl ServerAddress {
    /// Resolve the address from a config, parsing `url` when present.
    pub fn from_config(config: &SessionConfig) -> Result<Self> {
        let (scheme, host, port, root) = match &config.url {
            Some(url) => {
                let parsed = url::Url::parse(url)?;
                let scheme = parsed.scheme().to_string();
                let host = parsed
                    .host_str()
                    .ok_or_else(|| {
                        Error::new(ErrorKind::InvalidUrl(format!("no host in [{url}]")))
                    })?
                    .to_string();
                let port = parsed.port_or_known_default().ok_or_else(|| {
                    Error::new(ErrorKind::InvalidUrl(format!("no port in [{url}]")))
                })?;
                (scheme, host, port, parsed.path().to_string())
            }
            None => {
                let port = config.port.unwrap_or(8080);
                let scheme = config
                    .scheme
                    .clone()
                    .unwrap_or_else(|| if port == 443 { "https" } else { "http" }.to_string());
                (
                    scheme,
                    config.host.clone().unwrap_or_else(|| "localhost".to_string()),
                    port,
                    config.root.clone().unwrap_or_default(),
                )
            }
        };

        if scheme != "http" && scheme != "https" {
            return Err(Error::new(ErrorKind::Config(format!(
                "incorrect scheme [{scheme}]"
            ))));
        }

        let root = root.trim_matches('/');
        Ok(Self {
            scheme,
            host,
            port,
            root: root.to_string(),
        })
    }

    /// The derived base URL, eliding default ports (http:80, https:443).
    pub fn base_url(&self) -> String {
        let mut url = format!("{}://{}", self.scheme, self.host);
        let default_port = (self.scheme == "http" && self.port == 80)
            || (self.scheme == "https" && self.port == 443);
        if !default_port {
            url.push_str(&format!(":{}", self.port));
        }
        if !self.root.is_empty() {
            url.push('/');
            url.push_str(&self.root);
        }
        url
    }
}
