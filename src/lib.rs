//! # bizobj-api
//!
//! A client library for business-object platform HTTP/JSON APIs.
//!
//! This library provides typed access to a platform instance's application
//! services and business objects: authentication, metadata, CRUD, search,
//! custom actions, crosstabs and publications.
//!
//! ## Security
//!
//! This library is designed with security in mind:
//! - Sensitive data (passwords, tokens) are redacted in Debug output
//! - Tracing/logging skips credential parameters
//! - Exactly one authorization header is ever sent per request
//!
//! ## Crates
//!
//! - **bizobj-client** - Core HTTP transport: form-encoded requests, the
//!   platform parameter encoding, JSON envelope parsing
//! - **bizobj-session** - Session lifecycle, application services and
//!   business-object handles
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bizobj_api::{LoginOptions, SearchOptions, Session, SessionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Open a session on the platform instance
//!     let session = Session::new(
//!         SessionConfig::new()
//!             .with_url("https://demo.example.com")
//!             .with_username("designer")
//!             .with_password("designer"),
//!     )?;
//!     session.login(LoginOptions::default()).await?;
//!
//!     // Search products
//!     let products = session.get_business_object("Product", None);
//!     for item in products.search(None, SearchOptions::default()).await? {
//!         println!("{} {}", item["row_id"], item["prd_name"]);
//!     }
//!
//!     session.logout().await?;
//!     Ok(())
//! }
//! ```

// Re-export the crates for convenient access
#[cfg(feature = "client")]
pub use bizobj_client as client;
#[cfg(feature = "session")]
pub use bizobj_session as session;

// Re-export commonly used types at the top level
#[cfg(feature = "client")]
pub use bizobj_client::{ClientConfig, Error, ErrorKind, HttpClient, Result};
#[cfg(feature = "session")]
pub use bizobj_session::{
    BusinessObject, GetOptions, Grant, Item, LoginOptions, ObjectMetadata, SearchOptions, Session,
    SessionConfig,
};
