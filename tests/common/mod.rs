//! Integration test common infrastructure.
//!
//! Provides an in-memory data source with failure and latency injection,
//! plus a canonical two-website fixture used across the suite.

use std::time::Duration;

use async_trait::async_trait;

use scopestore::Error;
use scopestore::config::{
    ConfigValueRow, FieldCatalog, FieldDecl, FieldType, GroupDecl, ScopeLevels, SectionDecl,
};
use scopestore::scope::ScopeKind;
use scopestore::source::ScopeDataSource;
use scopestore::store::{GroupRow, StoreRow, WebsiteRow};

/// In-memory `ScopeDataSource` with per-table failure injection and an
/// optional artificial load latency.
#[allow(dead_code)]
#[derive(Debug, Clone, Default)]
pub struct MockSource {
    pub websites: Vec<WebsiteRow>,
    pub groups: Vec<GroupRow>,
    pub stores: Vec<StoreRow>,
    pub config: Vec<ConfigValueRow>,
    /// Tables whose loads should fail: any of "websites", "groups", "stores".
    pub fail_tables: Vec<&'static str>,
    pub delay: Option<Duration>,
}

impl MockSource {
    async fn load<T: Clone>(&self, table: &'static str, rows: &[T]) -> Result<Vec<T>, Error> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_tables.contains(&table) {
            return Err(Error::source(std::io::Error::other(format!(
                "injected {table} load failure"
            ))));
        }
        Ok(rows.to_vec())
    }
}

#[async_trait]
impl ScopeDataSource for MockSource {
    async fn load_websites(&self) -> Result<Vec<WebsiteRow>, Error> {
        self.load("websites", &self.websites).await
    }

    async fn load_groups(&self) -> Result<Vec<GroupRow>, Error> {
        self.load("groups", &self.groups).await
    }

    async fn load_stores(&self) -> Result<Vec<StoreRow>, Error> {
        self.load("stores", &self.stores).await
    }

    async fn load_config_values(&self) -> Result<Vec<ConfigValueRow>, Error> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.config.clone())
    }
}

#[allow(dead_code)]
pub fn website(id: i64, code: &str, is_default: bool, default_group_id: i64) -> WebsiteRow {
    WebsiteRow {
        website_id: id,
        code: code.into(),
        name: code.to_uppercase(),
        sort_order: id,
        default_group_id,
        is_default,
    }
}

#[allow(dead_code)]
pub fn group(id: i64, website_id: i64, name: &str, default_store_id: i64) -> GroupRow {
    GroupRow {
        group_id: id,
        website_id,
        name: name.into(),
        default_store_id,
    }
}

#[allow(dead_code)]
pub fn store(id: i64, code: &str, website_id: i64, group_id: i64) -> StoreRow {
    StoreRow {
        store_id: id,
        code: code.into(),
        website_id,
        group_id,
        name: code.to_uppercase(),
        sort_order: 0,
        is_active: true,
    }
}

#[allow(dead_code)]
pub fn config_row(scope: ScopeKind, scope_id: i64, path: &str, value: &str) -> ConfigValueRow {
    ConfigValueRow {
        scope,
        scope_id,
        path: path.into(),
        value: value.into(),
    }
}

/// Two websites: `eu` (default; groups 10, 11) and `us` (group 20).
/// Stores: 100 `eu_en` and 101 `eu_de` in group 10, 102 `eu_b2b` in group
/// 11, 200 `us_en` in group 20. Default chain: eu → group 10 → store 100.
#[allow(dead_code)]
pub fn fixture() -> MockSource {
    MockSource {
        websites: vec![website(1, "eu", true, 10), website(2, "us", false, 20)],
        groups: vec![
            group(10, 1, "EU Retail", 100),
            group(11, 1, "EU B2B", 102),
            group(20, 2, "US Retail", 200),
        ],
        stores: vec![
            store(100, "eu_en", 1, 10),
            store(101, "eu_de", 1, 10),
            store(102, "eu_b2b", 1, 11),
            store(200, "us_en", 2, 20),
        ],
        config: vec![],
        fail_tables: vec![],
        delay: None,
    }
}

/// Field catalog used by the config-resolution tests.
#[allow(dead_code)]
pub fn catalog() -> FieldCatalog {
    FieldCatalog::new(vec![SectionDecl {
        id: "general".into(),
        groups: vec![GroupDecl {
            id: "locale".into(),
            fields: vec![
                FieldDecl {
                    id: "code".into(),
                    ty: FieldType::Str,
                    default: Some("en_US".into()),
                    scopes: ScopeLevels::STORE,
                },
                FieldDecl {
                    id: "weight_unit".into(),
                    ty: FieldType::Str,
                    default: Some("kg".into()),
                    scopes: ScopeLevels::WEBSITE,
                },
                FieldDecl {
                    id: "first_day".into(),
                    ty: FieldType::I64,
                    default: Some(scopestore::config::Value::I64(1)),
                    scopes: ScopeLevels::STORE,
                },
            ],
        }],
    }])
    .expect("valid catalog")
}
