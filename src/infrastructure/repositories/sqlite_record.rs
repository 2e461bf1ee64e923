// src/infrastructure/repositories/sqlite_record.rs
use super::map_sqlx;
use crate::domain::errors::{SlugError, SlugResult};
use crate::domain::lifecycle::{HookRegistry, LifecycleEvent, LifecycleHook, ModelHooks};
use crate::domain::model::ModelSchema;
use crate::domain::row::Record;
use crate::domain::value::FieldValue;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};
use std::sync::Arc;

/// Integer primary key assigned by the database on insert.
const PRIMARY_KEY: &str = "id";

/// Persists [`Record`]s of one model, running its `before` hooks first.
pub struct SqliteRecordRepository {
    pool: SqlitePool,
    model: Arc<ModelSchema>,
    hooks: ModelHooks,
}

impl SqliteRecordRepository {
    pub fn new(pool: SqlitePool, model: Arc<ModelSchema>) -> Self {
        Self {
            pool,
            model,
            hooks: ModelHooks::new(),
        }
    }

    /// Run `before create` hooks, insert every attribute and return the new
    /// primary key.
    pub async fn create(&self, record: &mut Record) -> SlugResult<i64> {
        self.hooks.run_before(LifecycleEvent::Create, record).await?;

        let columns = self.columns(record.attributes().iter())?;
        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("INSERT INTO {} ", quote(self.model.table())));

        if columns.is_empty() {
            builder.push("DEFAULT VALUES");
        } else {
            let names: Vec<String> = columns.iter().map(|(column, _)| quote(column)).collect();
            builder.push(format!("({}) VALUES (", names.join(", ")));
            for (index, (_, value)) in columns.into_iter().enumerate() {
                if index > 0 {
                    builder.push(", ");
                }
                push_value(&mut builder, value);
            }
            builder.push(")");
        }
        builder.push(format!(" RETURNING {}", quote(PRIMARY_KEY)));

        let row = builder
            .build()
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;
        let id: i64 = row.try_get(0).map_err(map_sqlx)?;

        record.set(PRIMARY_KEY, id);
        record.sync_original();
        tracing::debug!(table = self.model.table(), id, "record created");
        Ok(id)
    }

    /// Run `before update` hooks and write the dirty attributes of a
    /// persisted record.
    pub async fn update(&self, record: &mut Record) -> SlugResult<()> {
        let id = match record.get(PRIMARY_KEY) {
            Some(FieldValue::Integer(id)) if record.is_persisted() => *id,
            _ => {
                return Err(SlugError::persistence(
                    "cannot update a record that has not been persisted",
                ));
            }
        };

        self.hooks.run_before(LifecycleEvent::Update, record).await?;

        let dirty = record.dirty();
        let columns = self.columns(dirty.into_iter())?;
        if columns.is_empty() {
            return Ok(());
        }

        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("UPDATE {} SET ", quote(self.model.table())));
        for (index, (column, value)) in columns.into_iter().enumerate() {
            if index > 0 {
                builder.push(", ");
            }
            builder.push(format!("{} = ", quote(&column)));
            push_value(&mut builder, value);
        }
        builder.push(format!(" WHERE {} = ", quote(PRIMARY_KEY)));
        builder.push_bind(id);

        builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;

        record.sync_original();
        tracing::debug!(table = self.model.table(), id, "record updated");
        Ok(())
    }

    /// Resolve field names to storage columns. The primary key maps to itself.
    fn columns<'a, K, I>(&self, attributes: I) -> SlugResult<Vec<(String, FieldValue)>>
    where
        K: AsRef<str> + 'a,
        I: Iterator<Item = (K, &'a FieldValue)>,
    {
        attributes
            .map(|(field, value)| {
                let field = field.as_ref();
                let column = if field == PRIMARY_KEY {
                    field.to_string()
                } else {
                    self.model.column_name(field)?.to_string()
                };
                Ok::<_, SlugError>((column, value.clone()))
            })
            .collect()
    }
}

impl HookRegistry for SqliteRecordRepository {
    fn before(&mut self, event: LifecycleEvent, hook: Arc<dyn LifecycleHook>) {
        self.hooks.before(event, hook);
    }
}

fn quote(identifier: &str) -> String {
    format!("\"{}\"", identifier.replace('"', "\"\""))
}

fn push_value(builder: &mut QueryBuilder<'_, Sqlite>, value: FieldValue) {
    match value {
        FieldValue::Null => builder.push_bind(None::<String>),
        FieldValue::Bool(value) => builder.push_bind(value),
        FieldValue::Integer(value) => builder.push_bind(value),
        FieldValue::Float(value) => builder.push_bind(value),
        FieldValue::Text(value) => builder.push_bind(value),
    };
}
