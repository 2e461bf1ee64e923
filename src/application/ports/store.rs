// src/application/ports/store.rs
use crate::application::query::{DialectInfo, RenderedQuery};
use crate::domain::errors::SlugResult;
use async_trait::async_trait;

/// Storage engine the `dbIncrement` strategy queries for colliding slugs.
#[async_trait]
pub trait SlugStore: Send + Sync {
    /// Engine name and version, e.g. `("postgres", "16.2")`.
    fn dialect(&self) -> DialectInfo;

    /// Run a value lookup and return the matching slug column values.
    async fn fetch_values(&self, query: &RenderedQuery) -> SlugResult<Vec<String>>;

    /// Run a counter lookup and return the computed counters in query order.
    async fn fetch_counters(&self, query: &RenderedQuery) -> SlugResult<Vec<Option<i64>>>;
}
