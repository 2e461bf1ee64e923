// src/application/strategies/mod.rs
mod db_increment;
mod short_id;
mod simple;

pub use db_increment::DbIncrementStrategy;
pub use short_id::{SHORT_ID_LENGTH, ShortIdStrategy};
pub use simple::SimpleStrategy;

use crate::domain::errors::SlugResult;
use crate::domain::model::ModelSchema;
use crate::domain::row::SlugRow;
use async_trait::async_trait;

/// Turns a source value into a slug and makes that slug unique.
#[async_trait]
pub trait SlugStrategy: Send + Sync {
    /// Pure transform of the composite source value.
    fn make_slug(&self, model: &ModelSchema, field: &str, value: &str) -> String;

    /// Resolve collisions for `slug`. `row` is the row being persisted.
    async fn make_slug_unique(
        &self,
        model: &ModelSchema,
        field: &str,
        slug: String,
        row: &dyn SlugRow,
    ) -> SlugResult<String>;
}
