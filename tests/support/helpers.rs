// tests/support/helpers.rs
use mokkan_slug::infrastructure::{
    database, repositories::SqliteRecordRepository, stores::SqliteSlugStore,
};
use mokkan_slug::{ModelSchema, SlugifyConfig, SlugifyServices};
use sqlx::SqlitePool;
use std::sync::Arc;

/// Fresh in-memory database with the `posts` table migrated.
pub async fn memory_pool() -> SqlitePool {
    let pool = database::init_pool("sqlite::memory:")
        .await
        .expect("init pool");
    database::run_migrations(&pool)
        .await
        .expect("run migrations");
    pool
}

pub fn post_model() -> Arc<ModelSchema> {
    Arc::new(
        ModelSchema::new("Post", "posts")
            .field("title")
            .field("category")
            .field("slug"),
    )
}

/// Same table, but the slug lives under a differently named property.
pub fn renamed_post_model() -> Arc<ModelSchema> {
    Arc::new(
        ModelSchema::new("Post", "posts")
            .field("title")
            .field("category")
            .column("permalink", "slug"),
    )
}

pub fn services(pool: &SqlitePool) -> SlugifyServices {
    SlugifyServices::new(Arc::new(SqliteSlugStore::new(pool.clone())))
}

/// Repository for `posts` with `config` attached to `property`.
pub fn posts_with(
    pool: &SqlitePool,
    model: Arc<ModelSchema>,
    property: &str,
    config: SlugifyConfig,
) -> SqliteRecordRepository {
    let services = services(pool);
    let mut repo = SqliteRecordRepository::new(pool.clone(), Arc::clone(&model));
    services
        .slugify
        .decorator(config)
        .expect("decorator")
        .apply(model, property, &mut repo);
    repo
}

pub async fn seed_slugs(pool: &SqlitePool, slugs: &[&str]) {
    for slug in slugs {
        sqlx::query("INSERT INTO posts (title, slug) VALUES (?, ?)")
            .bind(*slug)
            .bind(*slug)
            .execute(pool)
            .await
            .expect("seed slug");
    }
}

pub async fn stored_slug(pool: &SqlitePool, id: i64) -> Option<String> {
    sqlx::query_scalar::<_, Option<String>>("SELECT slug FROM posts WHERE id = ?")
        .bind(id)
        .fetch_one(pool)
        .await
        .expect("fetch slug")
}
