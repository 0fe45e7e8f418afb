//! The platform context.
//!
//! Bundles the scope storage and the configuration resolver behind one
//! explicitly constructed handle with a single reload entry point. There is
//! deliberately no process-wide default instance: construct a [`Platform`],
//! share it by reference (or `Arc`), drop it to shut down.

use crate::config::{ConfigResolver, FieldCatalog};
use crate::error::Result;
use crate::source::ScopeDataSource;
use crate::store::ScopeStorage;

/// Scope storage plus configuration resolver with a shared reload boundary.
#[derive(Debug)]
pub struct Platform {
    storage: ScopeStorage,
    config: ConfigResolver,
}

impl Platform {
    /// Create an empty platform over the given field catalog. Call
    /// [`reload`](Self::reload) to populate it.
    pub fn new(catalog: FieldCatalog) -> Self {
        Self {
            storage: ScopeStorage::new(),
            config: ConfigResolver::new(catalog),
        }
    }

    /// The scope hierarchy storage.
    pub fn storage(&self) -> &ScopeStorage {
        &self.storage
    }

    /// The configuration resolver.
    pub fn config(&self) -> &ConfigResolver {
        &self.config
    }

    /// Reload the entity tables and the override map from the data source.
    ///
    /// The entity reload commits (or clears) first; the override map is
    /// rebuilt afterwards. A storage failure propagates and leaves the
    /// documented empty-storage state with the previous overrides intact —
    /// callers retry the whole reload.
    pub async fn reload(&self, source: &dyn ScopeDataSource) -> Result<()> {
        self.storage.reload(source).await?;
        self.config.reload(source).await
    }
}
