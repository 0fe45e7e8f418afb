//! Composed read-only views over the entity tables.
//!
//! Views are value snapshots built fresh per query by id lookup against one
//! consistent [`EntityTables`] snapshot. They are never cached and never
//! mutually-owning: a `StoreView` holds copies of its group and website rows,
//! not references back into a shared object graph.

use tracing::{error, warn};

use crate::error::{Error, Result};
use crate::scope::Scope;
use crate::store::tables::{EntityTables, GroupRow, StoreRow, WebsiteRow};

/// A website with every group and store under it attached.
#[derive(Debug, Clone)]
pub struct WebsiteView {
    pub website: WebsiteRow,
    pub groups: Vec<GroupRow>,
    pub stores: Vec<StoreRow>,
}

impl WebsiteView {
    pub fn id(&self) -> i64 {
        self.website.website_id
    }

    pub fn code(&self) -> &str {
        &self.website.code
    }

    /// The config scope this website represents.
    pub fn config_scope(&self) -> Scope {
        Scope::Website(self.website.website_id)
    }
}

/// A group with its stores and its parent website attached.
#[derive(Debug, Clone)]
pub struct GroupView {
    pub group: GroupRow,
    pub website: WebsiteRow,
    pub stores: Vec<StoreRow>,
}

impl GroupView {
    pub fn id(&self) -> i64 {
        self.group.group_id
    }

    /// The default store of this group, if it is one of the attached stores.
    pub fn default_store(&self) -> Option<&StoreRow> {
        self.stores
            .iter()
            .find(|s| s.store_id == self.group.default_store_id)
    }
}

/// A store with its parent group and that group's website attached.
#[derive(Debug, Clone)]
pub struct StoreView {
    pub store: StoreRow,
    pub group: GroupRow,
    pub website: WebsiteRow,
}

impl StoreView {
    pub fn id(&self) -> i64 {
        self.store.store_id
    }

    pub fn code(&self) -> &str {
        &self.store.code
    }

    pub fn is_active(&self) -> bool {
        self.store.is_active
    }

    /// The config scope this store represents, carrying its enclosing
    /// website id for the fallback chain.
    pub fn config_scope(&self) -> Scope {
        Scope::Store {
            store_id: self.store.store_id,
            website_id: self.website.website_id,
        }
    }
}

/// Compose a website view: attach every group whose website foreign key
/// matches and every store reachable through those groups. Infallible;
/// a website with no groups composes to empty attachments.
pub(crate) fn compose_website(tables: &EntityTables, website: &WebsiteRow) -> WebsiteView {
    let groups: Vec<GroupRow> = tables
        .groups
        .iter()
        .filter(|g| g.website_id == website.website_id)
        .cloned()
        .collect();
    let stores: Vec<StoreRow> = tables
        .stores
        .iter()
        .filter(|s| groups.iter().any(|g| g.group_id == s.group_id))
        .cloned()
        .collect();
    WebsiteView {
        website: website.clone(),
        groups,
        stores,
    }
}

/// Compose a group view: attach matching stores plus the parent website.
/// A dangling website foreign key is an integrity fault.
pub(crate) fn compose_group(tables: &EntityTables, group: &GroupRow) -> Result<GroupView> {
    let Some(website) = tables.website_by_id(group.website_id) else {
        error!(
            group_id = group.group_id,
            website_id = group.website_id,
            "group references missing website; source data is corrupt"
        );
        return Err(Error::IntegrityFault {
            entity: "group",
            id: group.group_id,
            missing: "website",
            missing_id: group.website_id,
        });
    };
    let stores: Vec<StoreRow> = tables
        .stores
        .iter()
        .filter(|s| s.group_id == group.group_id)
        .cloned()
        .collect();
    Ok(GroupView {
        group: group.clone(),
        website: website.clone(),
        stores,
    })
}

/// Compose a store view: attach the parent group and that group's website.
/// A dangling group or website foreign key is an integrity fault.
pub(crate) fn compose_store(tables: &EntityTables, store: &StoreRow) -> Result<StoreView> {
    let Some(group) = tables.group_by_id(store.group_id) else {
        error!(
            store_id = store.store_id,
            group_id = store.group_id,
            "store references missing group; source data is corrupt"
        );
        return Err(Error::IntegrityFault {
            entity: "store",
            id: store.store_id,
            missing: "group",
            missing_id: store.group_id,
        });
    };
    let Some(website) = tables.website_by_id(group.website_id) else {
        error!(
            store_id = store.store_id,
            group_id = group.group_id,
            website_id = group.website_id,
            "store's group references missing website; source data is corrupt"
        );
        return Err(Error::IntegrityFault {
            entity: "group",
            id: group.group_id,
            missing: "website",
            missing_id: group.website_id,
        });
    };
    if store.website_id != group.website_id {
        // Denormalized column drifted from the group's FK. The group is
        // authoritative; keep going but leave a trace.
        warn!(
            store_id = store.store_id,
            store_website_id = store.website_id,
            group_website_id = group.website_id,
            "store website_id disagrees with its group"
        );
    }
    Ok(StoreView {
        store: store.clone(),
        group: group.clone(),
        website: website.clone(),
    })
}
