//! Raw entity tables as loaded from the data source.
//!
//! Rows carry no behavior beyond field access; lookup helpers live on
//! [`EntityTables`] so that every query resolves against one consistent
//! snapshot of all three tables.

use crate::scope::Selector;

/// A raw website row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WebsiteRow {
    pub website_id: i64,
    pub code: String,
    pub name: String,
    pub sort_order: i64,
    pub default_group_id: i64,
    pub is_default: bool,
}

/// A raw store-group row. Groups have no code; they are addressed by id only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupRow {
    pub group_id: i64,
    pub website_id: i64,
    pub name: String,
    pub default_store_id: i64,
}

/// A raw store-view row. `website_id` is denormalized from the parent group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreRow {
    pub store_id: i64,
    pub code: String,
    pub website_id: i64,
    pub group_id: i64,
    pub name: String,
    pub sort_order: i64,
    pub is_active: bool,
}

/// The three entity tables, replaced wholesale on every reload.
#[derive(Debug, Clone, Default)]
pub struct EntityTables {
    pub websites: Vec<WebsiteRow>,
    pub groups: Vec<GroupRow>,
    pub stores: Vec<StoreRow>,
}

impl EntityTables {
    pub fn new(websites: Vec<WebsiteRow>, groups: Vec<GroupRow>, stores: Vec<StoreRow>) -> Self {
        Self {
            websites,
            groups,
            stores,
        }
    }

    /// Drop all rows. Used when a reload fails part-way: an empty storage is
    /// a valid, if degraded, state.
    pub fn clear(&mut self) {
        self.websites.clear();
        self.groups.clear();
        self.stores.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.websites.is_empty() && self.groups.is_empty() && self.stores.is_empty()
    }

    pub fn website_by_id(&self, id: i64) -> Option<&WebsiteRow> {
        self.websites.iter().find(|w| w.website_id == id)
    }

    pub fn website_by_code(&self, code: &str) -> Option<&WebsiteRow> {
        self.websites.iter().find(|w| w.code == code)
    }

    /// Resolve a website selector; a non-empty code wins over an id.
    pub fn website_by_selector<S: Selector + ?Sized>(&self, sel: &S) -> Option<&WebsiteRow> {
        match sel.code() {
            Some(code) if !code.is_empty() => self.website_by_code(code),
            _ => sel.id().and_then(|id| self.website_by_id(id)),
        }
    }

    pub fn group_by_id(&self, id: i64) -> Option<&GroupRow> {
        self.groups.iter().find(|g| g.group_id == id)
    }

    /// Resolve a group selector. Groups carry no code, so only the id part of
    /// the selector is consulted.
    pub fn group_by_selector<S: Selector + ?Sized>(&self, sel: &S) -> Option<&GroupRow> {
        sel.id().and_then(|id| self.group_by_id(id))
    }

    pub fn store_by_id(&self, id: i64) -> Option<&StoreRow> {
        self.stores.iter().find(|s| s.store_id == id)
    }

    pub fn store_by_code(&self, code: &str) -> Option<&StoreRow> {
        self.stores.iter().find(|s| s.code == code)
    }

    /// Resolve a store selector; a non-empty code wins over an id.
    pub fn store_by_selector<S: Selector + ?Sized>(&self, sel: &S) -> Option<&StoreRow> {
        match sel.code() {
            Some(code) if !code.is_empty() => self.store_by_code(code),
            _ => sel.id().and_then(|id| self.store_by_id(id)),
        }
    }
}
