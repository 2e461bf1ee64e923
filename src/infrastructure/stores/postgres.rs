// src/infrastructure/stores/postgres.rs
use crate::application::ports::store::SlugStore;
use crate::application::query::{DialectInfo, RenderedQuery};
use crate::domain::errors::SlugResult;
use crate::infrastructure::repositories::map_sqlx;
use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

#[derive(Clone)]
pub struct PostgresSlugStore {
    pool: PgPool,
    version: String,
}

impl PostgresSlugStore {
    /// Wrap `pool`, reading the server version once up front.
    pub async fn new(pool: PgPool) -> SlugResult<Self> {
        let version: String = sqlx::query_scalar("SHOW server_version")
            .fetch_one(&pool)
            .await
            .map_err(map_sqlx)?;
        Ok(Self { pool, version })
    }

    async fn fetch(&self, query: &RenderedQuery) -> SlugResult<Vec<PgRow>> {
        let mut statement = sqlx::query(&query.sql);
        for value in &query.binds {
            statement = statement.bind(value.as_str());
        }
        statement.fetch_all(&self.pool).await.map_err(map_sqlx)
    }
}

#[async_trait]
impl SlugStore for PostgresSlugStore {
    fn dialect(&self) -> DialectInfo {
        DialectInfo::new("postgres", self.version.clone())
    }

    async fn fetch_values(&self, query: &RenderedQuery) -> SlugResult<Vec<String>> {
        let rows = self.fetch(query).await?;
        let mut values = Vec::with_capacity(rows.len());
        for row in rows {
            if let Some(value) = row.try_get::<Option<String>, _>(0).map_err(map_sqlx)? {
                values.push(value);
            }
        }
        Ok(values)
    }

    async fn fetch_counters(&self, query: &RenderedQuery) -> SlugResult<Vec<Option<i64>>> {
        let rows = self.fetch(query).await?;
        rows.iter()
            .map(|row| row.try_get::<Option<i64>, _>(0).map_err(map_sqlx))
            .collect()
    }
}
