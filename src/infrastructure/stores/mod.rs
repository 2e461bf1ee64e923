// src/infrastructure/stores/mod.rs
mod postgres;
mod sqlite;

pub use postgres::PostgresSlugStore;
pub use sqlite::SqliteSlugStore;
