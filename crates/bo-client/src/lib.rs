//! # bizobj-client
//!
//! Core HTTP transport for business-object platform APIs.
//!
//! This crate provides the foundational HTTP client used by the higher-level
//! session and business-object crates:
//! - GET/POST request building with form-encoded bodies
//! - Exactly-one authorization header (bearer token preferred over basic auth)
//! - JSON envelope parsing (`{type, response}`) with synthesized errors for
//!   non-200 statuses and parse failures
//! - The platform's parameter encoding scheme (documents, object references,
//!   arrays, scalars)
//! - Request/response tracing
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Application Layer                        │
//! │                     (bizobj-session)                        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      HttpClient                             │
//! │  - One HTTP round trip per call, no retry                   │
//! │  - Auth header selection (bearer | basic | none)            │
//! │  - Envelope parsing into Result<Value>                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use bizobj_client::{HttpClient, ClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), bizobj_client::Error> {
//!     let client = HttpClient::new(ClientConfig::default())?;
//!
//!     let payload = client
//!         .call(client.get("https://host:8080/api/json/app?action=session")
//!             .basic_auth("designer", "designer"))
//!         .await?;
//!
//!     println!("session id = {}", payload["id"]);
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod encode;
mod error;
mod request;
mod response;

pub use client::{HttpClient, BEARER_HEADER};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use encode::encode_params;
pub use error::{Error, ErrorKind, Result};
pub use request::{RequestBuilder, RequestMethod};
pub use response::ApiResponse;

/// User-Agent string for the client
pub const USER_AGENT: &str = concat!("bizobj-api/", env!("CARGO_PKG_VERSION"));
