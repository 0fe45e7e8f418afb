//! Scope hierarchy storage.
//!
//! Raw entity tables, composed read-only views, and the concurrent storage
//! that serves Website → Group → Store lookups with atomic bulk reload.

mod storage;
mod tables;
mod view;

pub use storage::ScopeStorage;
pub use tables::{EntityTables, GroupRow, StoreRow, WebsiteRow};
pub use view::{GroupView, StoreView, WebsiteView};
