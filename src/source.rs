//! The data-source seam.
//!
//! The core never speaks a wire protocol itself; it only needs an ordered,
//! typed row scan for each of the three entity tables and for the override
//! table. Anything that can produce those four result sets can back a
//! [`crate::store::ScopeStorage`] and [`crate::config::ConfigResolver`]:
//! the bundled sqlite implementation lives in [`crate::db`], tests use
//! in-memory fixtures.

use async_trait::async_trait;

use crate::config::ConfigValueRow;
use crate::error::Result;
use crate::store::{GroupRow, StoreRow, WebsiteRow};

/// Abstract tabular query capability for the scope and config tables.
///
/// Each load is an independent query with its own error channel; the reload
/// protocol issues the three entity loads in parallel and aggregates the
/// first failure. Implementations wrap backend errors with
/// [`crate::Error::source`].
#[async_trait]
pub trait ScopeDataSource: Send + Sync {
    /// Load all website rows.
    async fn load_websites(&self) -> Result<Vec<WebsiteRow>>;

    /// Load all group rows.
    async fn load_groups(&self) -> Result<Vec<GroupRow>>;

    /// Load all store rows.
    async fn load_stores(&self) -> Result<Vec<StoreRow>>;

    /// Load all configuration override rows.
    async fn load_config_values(&self) -> Result<Vec<ConfigValueRow>>;
}
