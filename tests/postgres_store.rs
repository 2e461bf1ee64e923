use std::sync::Arc;

use once_cell::sync::Lazy;
use sqlx::postgres::PgPoolOptions;

use mokkan_slug::application::strategies::DbIncrementStrategy;
use mokkan_slug::infrastructure::stores::PostgresSlugStore;
use mokkan_slug::{ModelSchema, Record, SlugStrategy, SlugifyConfig};

static DB_INTEGRATION: Lazy<Option<String>> = Lazy::new(|| {
    if std::env::var("RUN_DB_INTEGRATION").unwrap_or_default() != "1" {
        return None;
    }
    std::env::var("DATABASE_URL").ok()
});

#[tokio::test]
async fn postgres_counter_lookup() {
    // Run only when explicitly enabled to avoid requiring Postgres in all environments
    let Some(database_url) = DB_INTEGRATION.as_deref() else {
        eprintln!("skipping integration test: set RUN_DB_INTEGRATION=1 and DATABASE_URL to run");
        return;
    };

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(database_url)
        .await
        .expect("connect");

    sqlx::query("CREATE TABLE IF NOT EXISTS slug_integration_posts (id BIGSERIAL PRIMARY KEY, slug TEXT)")
        .execute(&pool)
        .await
        .expect("create table");
    sqlx::query("DELETE FROM slug_integration_posts")
        .execute(&pool)
        .await
        .expect("reset table");
    sqlx::query(
        "INSERT INTO slug_integration_posts (slug) VALUES ('hello-world'), ('Hello-World-3'), ('hello-world-x'), ('hello-10-world')",
    )
    .execute(&pool)
    .await
    .expect("seed rows");

    let store = PostgresSlugStore::new(pool.clone()).await.expect("store");
    let config = SlugifyConfig::builder("dbIncrement", ["title"])
        .build()
        .unwrap();
    let strategy = DbIncrementStrategy::new(Arc::new(store), &config);
    let model = ModelSchema::new("Post", "slug_integration_posts").field("slug");

    let slug = strategy
        .make_slug_unique(&model, "slug", "hello-world".into(), &Record::new())
        .await
        .expect("unique slug");
    assert_eq!(slug, "hello-world-4");

    let fresh = strategy
        .make_slug_unique(&model, "slug", "another-post".into(), &Record::new())
        .await
        .expect("unique slug");
    assert_eq!(fresh, "another-post");

    sqlx::query("DROP TABLE slug_integration_posts")
        .execute(&pool)
        .await
        .expect("cleanup");
}
