//! Concurrent scope storage.
//!
//! [`ScopeStorage`] holds the three entity tables behind one shared-read /
//! exclusive-write lock. Every query takes a single read guard and resolves
//! all of its cross-table lookups against that one snapshot, so a store is
//! never composed against a group table mid-swap. The only mutation is the
//! atomic wholesale [`ScopeStorage::reload`].

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::scope::Selector;
use crate::source::ScopeDataSource;
use crate::store::tables::EntityTables;
use crate::store::view::{
    GroupView, StoreView, WebsiteView, compose_group, compose_store, compose_website,
};

/// In-memory index over the website, group and store tables.
///
/// Starts empty; until the first successful [`reload`](Self::reload) every
/// lookup reports not-found. Reads may run concurrently with each other;
/// a reload excludes readers for the duration of the whole replacement.
#[derive(Debug, Default)]
pub struct ScopeStorage {
    tables: RwLock<EntityTables>,
}

impl ScopeStorage {
    /// Create an empty storage. Call [`reload`](Self::reload) to populate it.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a storage pre-populated with the given tables. Mainly useful
    /// for tests and non-database setups.
    pub fn with_tables(tables: EntityTables) -> Self {
        Self {
            tables: RwLock::new(tables),
        }
    }

    /// Look up a website and compose it with its groups and stores.
    /// A non-empty selector code has precedence over the id.
    pub async fn website<S: Selector + ?Sized>(&self, sel: &S) -> Result<WebsiteView> {
        let tables = self.tables.read().await;
        let website = tables
            .website_by_selector(sel)
            .ok_or(Error::WebsiteNotFound)?;
        Ok(compose_website(&tables, website))
    }

    /// All websites, each fully composed. Empty storage yields an empty
    /// vector, not an error.
    pub async fn websites(&self) -> Vec<WebsiteView> {
        let tables = self.tables.read().await;
        tables
            .websites
            .iter()
            .map(|w| compose_website(&tables, w))
            .collect()
    }

    /// Look up a group by id and compose it with its stores and parent
    /// website. Selector codes are ignored: groups have none.
    pub async fn group<S: Selector + ?Sized>(&self, sel: &S) -> Result<GroupView> {
        let tables = self.tables.read().await;
        let group = tables.group_by_selector(sel).ok_or(Error::GroupNotFound)?;
        compose_group(&tables, group)
    }

    /// All groups, fully composed. Fails with an integrity fault when any
    /// group references a missing website.
    pub async fn groups(&self) -> Result<Vec<GroupView>> {
        let tables = self.tables.read().await;
        tables
            .groups
            .iter()
            .map(|g| compose_group(&tables, g))
            .collect()
    }

    /// Look up a store and compose it with its group and website.
    /// A non-empty selector code has precedence over the id.
    pub async fn store<S: Selector + ?Sized>(&self, sel: &S) -> Result<StoreView> {
        let tables = self.tables.read().await;
        let store = tables.store_by_selector(sel).ok_or(Error::StoreNotFound)?;
        compose_store(&tables, store)
    }

    /// All stores, fully composed. Fails with an integrity fault when any
    /// store references a missing group or website.
    pub async fn stores(&self) -> Result<Vec<StoreView>> {
        let tables = self.tables.read().await;
        tables
            .stores
            .iter()
            .map(|s| compose_store(&tables, s))
            .collect()
    }

    /// The platform's single default store: the default-flagged website's
    /// default group's default store. Any hop failing to resolve reports
    /// `StoreNotFound`.
    ///
    /// The data model allows at most one default-flagged website. Should the
    /// source violate that, the first match wins and the duplicates are
    /// logged; this layer cannot repair upstream data.
    pub async fn default_store_view(&self) -> Result<StoreView> {
        let tables = self.tables.read().await;
        let defaults = tables.websites.iter().filter(|w| w.is_default).count();
        if defaults > 1 {
            warn!(
                count = defaults,
                "multiple websites flagged default; using the first"
            );
        }
        for website in &tables.websites {
            if !website.is_default {
                continue;
            }
            let group = tables
                .group_by_id(website.default_group_id)
                .ok_or(Error::StoreNotFound)?;
            let store = tables
                .store_by_id(group.default_store_id)
                .ok_or(Error::StoreNotFound)?;
            return compose_store(&tables, store);
        }
        Err(Error::StoreNotFound)
    }

    /// Replace all three entity tables atomically from the data source.
    ///
    /// Holds the write lock for the whole replacement, so concurrent readers
    /// observe either the pre-reload or post-reload state in full, and
    /// reloads are mutually exclusive. The three table loads run in
    /// parallel; if any fails, all three tables are cleared and the first
    /// failure (in website/group/store order) is returned wrapped in
    /// [`Error::Reload`].
    pub async fn reload(&self, source: &dyn ScopeDataSource) -> Result<()> {
        let mut tables = self.tables.write().await;

        let (websites, groups, stores) = tokio::join!(
            source.load_websites(),
            source.load_groups(),
            source.load_stores(),
        );

        let replacement = websites.and_then(|websites| {
            let groups = groups?;
            let stores = stores?;
            Ok(EntityTables::new(websites, groups, stores))
        });

        match replacement {
            Ok(replacement) => {
                *tables = replacement;
                info!(
                    websites = tables.websites.len(),
                    groups = tables.groups.len(),
                    stores = tables.stores.len(),
                    "scope storage reloaded"
                );
                Ok(())
            }
            Err(first) => {
                tables.clear();
                Err(Error::Reload(Box::new(first)))
            }
        }
    }

    /// Whether the storage currently holds no rows at all.
    pub async fn is_empty(&self) -> bool {
        self.tables.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::Select;
    use crate::store::tables::{GroupRow, StoreRow, WebsiteRow};

    fn storage() -> ScopeStorage {
        ScopeStorage::with_tables(EntityTables::new(
            vec![WebsiteRow {
                website_id: 1,
                code: "eu".into(),
                is_default: true,
                default_group_id: 10,
                ..Default::default()
            }],
            vec![GroupRow {
                group_id: 10,
                website_id: 1,
                name: "EU".into(),
                default_store_id: 100,
            }],
            vec![StoreRow {
                store_id: 100,
                code: "eu_en".into(),
                website_id: 1,
                group_id: 10,
                is_active: true,
                ..Default::default()
            }],
        ))
    }

    #[tokio::test]
    async fn test_empty_storage_reports_not_found() {
        let storage = ScopeStorage::new();
        assert!(matches!(
            storage.website(&1i64).await.unwrap_err(),
            Error::WebsiteNotFound
        ));
        assert!(matches!(
            storage.group(&10i64).await.unwrap_err(),
            Error::GroupNotFound
        ));
        assert!(matches!(
            storage.store(&"eu_en").await.unwrap_err(),
            Error::StoreNotFound
        ));
        assert!(matches!(
            storage.default_store_view().await.unwrap_err(),
            Error::StoreNotFound
        ));
        assert!(storage.websites().await.is_empty());
    }

    #[tokio::test]
    async fn test_absent_selector_is_not_found() {
        let storage = storage();
        let sel = Select::default();
        assert!(storage.website(&sel).await.is_err());
        assert!(storage.store(&sel).await.is_err());
    }

    #[tokio::test]
    async fn test_default_store_view_follows_the_chain() {
        let storage = storage();
        let view = storage.default_store_view().await.unwrap();
        assert_eq!(view.code(), "eu_en");
        assert_eq!(view.group.group_id, 10);
        assert_eq!(view.website.website_id, 1);
    }

    #[tokio::test]
    async fn test_default_store_view_fails_without_default_flag() {
        let storage = storage();
        {
            let mut tables = storage.tables.write().await;
            tables.websites[0].is_default = false;
        }
        assert!(matches!(
            storage.default_store_view().await.unwrap_err(),
            Error::StoreNotFound
        ));
    }

    #[tokio::test]
    async fn test_default_store_view_fails_on_dangling_default_group() {
        let storage = storage();
        {
            let mut tables = storage.tables.write().await;
            tables.websites[0].default_group_id = 999;
        }
        assert!(matches!(
            storage.default_store_view().await.unwrap_err(),
            Error::StoreNotFound
        ));
    }
}
