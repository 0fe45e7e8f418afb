//! The sqlite data source feeding a full platform reload.

mod common;

use common::catalog;
use scopestore::db::Database;
use scopestore::{Error, Platform, ScopePath};

async fn seed(db: &Database) {
    sqlx::query(
        "INSERT INTO store_website (website_id, code, name, sort_order, default_group_id, is_default)
         VALUES (1, 'eu', 'Europe', 0, 10, 1), (2, 'us', 'United States', 1, 20, 0)",
    )
    .execute(db.pool())
    .await
    .unwrap();

    sqlx::query(
        "INSERT INTO store_group (group_id, website_id, name, default_store_id)
         VALUES (10, 1, 'EU Retail', 100), (20, 2, 'US Retail', 200)",
    )
    .execute(db.pool())
    .await
    .unwrap();

    sqlx::query(
        "INSERT INTO store (store_id, code, website_id, group_id, name, sort_order, is_active)
         VALUES (100, 'eu_en', 1, 10, 'EU English', 0, 1),
                (101, 'eu_de', 1, 10, 'EU German', 1, 1),
                (200, 'us_en', 2, 20, 'US English', 0, 1)",
    )
    .execute(db.pool())
    .await
    .unwrap();

    sqlx::query(
        "INSERT INTO core_config_data (scope, scope_id, path, value)
         VALUES ('websites', 1, 'general/locale/code', 'de_DE'),
                ('stores', 100, 'general/locale/code', 'en_GB')",
    )
    .execute(db.pool())
    .await
    .unwrap();
}

#[tokio::test]
async fn test_platform_reload_from_sqlite() {
    let db = Database::new(":memory:").await.unwrap();
    seed(&db).await;

    let platform = Platform::new(catalog());
    platform.reload(&db).await.unwrap();

    let default = platform.storage().default_store_view().await.unwrap();
    assert_eq!(default.code(), "eu_en");
    assert_eq!(default.website.code, "eu");

    let eu = platform.storage().website(&"eu").await.unwrap();
    assert_eq!(eu.groups.len(), 1);
    assert_eq!(eu.stores.len(), 2);

    let path = ScopePath::parse("general/locale/code").unwrap();
    let eu_en = platform.storage().store(&"eu_en").await.unwrap();
    let eu_de = platform.storage().store(&"eu_de").await.unwrap();
    let us_en = platform.storage().store(&"us_en").await.unwrap();
    assert_eq!(
        platform.config().get_str(&path, eu_en.config_scope()).unwrap(),
        "en_GB"
    );
    assert_eq!(
        platform.config().get_str(&path, eu_de.config_scope()).unwrap(),
        "de_DE"
    );
    assert_eq!(
        platform.config().get_str(&path, us_en.config_scope()).unwrap(),
        "en_US"
    );
}

#[tokio::test]
async fn test_sqlite_rows_load_in_declared_order() {
    let db = Database::new(":memory:").await.unwrap();
    seed(&db).await;

    use scopestore::source::ScopeDataSource;
    let websites = db.load_websites().await.unwrap();
    assert_eq!(websites.len(), 2);
    assert_eq!(websites[0].code, "eu");
    assert!(websites[0].is_default);

    let stores = db.load_stores().await.unwrap();
    assert_eq!(stores.len(), 3);
    assert_eq!(stores[0].code, "eu_en");

    let values = db.load_config_values().await.unwrap();
    assert_eq!(values.len(), 2);
}

#[tokio::test]
async fn test_source_row_deletion_takes_effect_on_reload() {
    let db = Database::new(":memory:").await.unwrap();
    seed(&db).await;

    let platform = Platform::new(catalog());
    platform.reload(&db).await.unwrap();
    assert_eq!(platform.storage().website(&1i64).await.unwrap().groups.len(), 1);

    sqlx::query("DELETE FROM store_group WHERE group_id = 10")
        .execute(db.pool())
        .await
        .unwrap();
    sqlx::query("DELETE FROM store WHERE group_id = 10")
        .execute(db.pool())
        .await
        .unwrap();
    platform.reload(&db).await.unwrap();

    let eu = platform.storage().website(&1i64).await.unwrap();
    assert!(eu.groups.is_empty());
    assert!(eu.stores.is_empty());
    assert!(matches!(
        platform.storage().default_store_view().await.unwrap_err(),
        Error::StoreNotFound
    ));
}

#[tokio::test]
async fn test_file_backed_database_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("platform.db");
    let path = path.to_str().unwrap();

    {
        let db = Database::new(path).await.unwrap();
        seed(&db).await;
    }

    let db = Database::new(path).await.unwrap();
    let platform = Platform::new(catalog());
    platform.reload(&db).await.unwrap();
    assert_eq!(platform.storage().stores().await.unwrap().len(), 3);
}
