use anyhow::Result;
use mokkan_slug::{
    ModelSchema, Record, SlugifyServices,
    config::AppConfig,
    domain::SlugRow,
    infrastructure::{database, repositories::SqliteRecordRepository, stores::SqliteSlugStore},
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

/// Slug every title given on the command line into the `posts` table and
/// print the stored slugs.
async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;

    let pool = database::init_pool(config.database_url()).await?;
    database::run_migrations(&pool).await?;

    let store = Arc::new(SqliteSlugStore::connect(pool.clone()).await?);
    let services = SlugifyServices::new(store);

    let model = Arc::new(
        ModelSchema::new("Post", "posts")
            .field("title")
            .field("category")
            .field("slug"),
    );
    let mut posts = SqliteRecordRepository::new(pool, Arc::clone(&model));

    let decorator = services
        .slugify
        .decorator(config.slugify_config(["title"])?)?;
    decorator.apply(Arc::clone(&model), "slug", &mut posts);
    tracing::info!(strategy = config.strategy(), "slugify hooks registered");

    for title in std::env::args().skip(1) {
        let mut post = Record::new().with("title", title.as_str());
        let id = posts.create(&mut post).await?;
        let slug = post.value("slug").map(|v| v.to_string()).unwrap_or_default();
        println!("{id}\t{slug}\t{title}");
    }

    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}
