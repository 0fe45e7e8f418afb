//! scopestore - scope hierarchy storage and hierarchical configuration
//! resolution for e-commerce backends.
//!
//! The platform keeps a three-level scope hierarchy (Website → Group →
//! Store) in a concurrently readable in-memory index, rebuilt wholesale from
//! a relational data source, and resolves path-keyed configuration values
//! with scope-aware fallback: store override → website override → global
//! override → package default.
//!
//! ```no_run
//! use scopestore::config::FieldCatalog;
//! use scopestore::db::Database;
//! use scopestore::{Platform, ScopePath};
//!
//! # async fn run() -> scopestore::Result<()> {
//! let db = Database::new("platform.db").await.map_err(scopestore::Error::source)?;
//! let platform = Platform::new(FieldCatalog::default());
//! platform.reload(&db).await?;
//!
//! let store = platform.storage().store(&"eu_en").await?;
//! let path = ScopePath::parse("general/locale/code")?;
//! let locale = platform.config().get_str(&path, store.config_scope())?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod db;
pub mod error;
pub mod platform;
pub mod scope;
pub mod source;
pub mod store;

pub use error::{Error, Result};
pub use platform::Platform;
pub use scope::{Scope, ScopeKind, ScopePath, Select, Selector};
pub use source::ScopeDataSource;
pub use store::{GroupView, ScopeStorage, StoreView, WebsiteView};
