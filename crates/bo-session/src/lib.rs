//! # bizobj-session
//!
//! Session-level access to a business-object platform's JSON API: login and
//! the other application services, plus typed handles on business objects
//! for metadata, CRUD, search and custom operations.
//!
//! Each operation is one HTTP round trip through [`bizobj_client`]; there is
//! no local persistence and no retry. Sessions and the handles they hand out
//! are safe to share across tasks; under concurrent use of one handle the
//! last completed call wins.
//!
//! ## Example
//!
//! ```rust,ignore
//! use bizobj_session::{LoginOptions, SearchOptions, Session, SessionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), bizobj_session::Error> {
//!     let session = Session::new(
//!         SessionConfig::new()
//!             .with_url("https://demo.example.com")
//!             .with_username("designer")
//!             .with_password("designer"),
//!     )?;
//!     session.login(LoginOptions::default()).await?;
//!
//!     let products = session.get_business_object("Product", None);
//!     for item in products.search(None, SearchOptions::default()).await? {
//!         println!("{} {}", item["row_id"], item["prd_name"]);
//!     }
//!
//!     session.logout().await?;
//!     Ok(())
//! }
//! ```

mod config;
mod grant;
mod metadata;
mod object;
mod session;

pub use config::{Endpoint, ServerAddress, SessionConfig};
pub use grant::Grant;
pub use metadata::{
    Context, FieldDef, FieldType, ListValue, ObjectMetadata, SearchMode, Visibility,
    DEFAULT_ROW_ID, DEFAULT_ROW_ID_NAME,
};
pub use object::{
    ActionOptions, BusinessObject, CrosstabOptions, FiltersOptions, GetOptions, Item,
    MetadataOptions, PrintOptions, SearchOptions,
};
pub use session::{GrantOptions, LoginOptions, LoginResult, Session};

pub use bizobj_client::{Error, ErrorKind, Result};
