// src/application/strategies/db_increment.rs
use super::{SimpleStrategy, SlugStrategy};
use crate::application::config::{OnQuery, SlugifyConfig};
use crate::application::ports::store::SlugStore;
use crate::application::query::{Dialect, Projection, SlugQuery};
use crate::domain::errors::{SlugError, SlugResult};
use crate::domain::model::ModelSchema;
use crate::domain::row::SlugRow;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

/// Makes slugs unique by appending one more than the highest numeric suffix
/// already stored for the same base slug.
#[derive(Clone)]
pub struct DbIncrementStrategy {
    inner: SimpleStrategy,
    store: Arc<dyn SlugStore>,
    on_query: Option<OnQuery>,
}

impl DbIncrementStrategy {
    pub fn new(store: Arc<dyn SlugStore>, config: &SlugifyConfig) -> Self {
        Self {
            inner: SimpleStrategy::new(config),
            store,
            on_query: config.on_query.clone(),
        }
    }

    fn separator(&self) -> &str {
        self.inner.separator()
    }

    /// Pick the next slug from raw matching values.
    ///
    /// A value only counts when splitting it on `slug + separator` yields
    /// exactly two parts whose tail parses as a number.
    pub(crate) fn slug_from_values(&self, slug: &str, values: &[String]) -> String {
        if values.is_empty() {
            return slug.to_string();
        }

        let separator = self.separator();
        let needle = format!("{slug}{separator}");
        let counters: Vec<f64> = values
            .iter()
            .filter_map(|value| {
                let lowered = value.to_lowercase();
                let tokens: Vec<&str> = lowered.split(needle.as_str()).collect();
                match tokens.as_slice() {
                    [_, tail] => parse_counter(tail),
                    _ => None,
                }
            })
            .collect();

        match counters.into_iter().reduce(f64::max) {
            Some(max) => format!("{slug}{separator}{}", max + 1.0),
            None => format!("{slug}{separator}1"),
        }
    }

    /// Pick the next slug from database-computed counters, highest first.
    ///
    /// Fails instead of wrapping when the stored counter is already `i64::MAX`.
    pub(crate) fn slug_from_counters(
        &self,
        slug: &str,
        counters: &[Option<i64>],
    ) -> SlugResult<String> {
        let separator = self.separator();
        let next = match counters {
            [] => return Ok(slug.to_string()),
            [Some(first), ..] if *first != 0 => first.checked_add(1),
            [_, second, ..] => second.unwrap_or(0).checked_add(1),
            [_] => Some(1),
        };

        next.map(|counter| format!("{slug}{separator}{counter}"))
            .ok_or_else(|| SlugError::persistence(format!("slug counter overflow for {slug:?}")))
    }
}

/// Numeric reading of a suffix. Blank text reads as zero; anything that is
/// not a finite number is ignored.
fn parse_counter(token: &str) -> Option<f64> {
    let token = token.trim();
    if token.is_empty() {
        return Some(0.0);
    }
    token.parse::<f64>().ok().filter(|n| n.is_finite())
}

#[async_trait]
impl SlugStrategy for DbIncrementStrategy {
    fn make_slug(&self, model: &ModelSchema, field: &str, value: &str) -> String {
        self.inner.make_slug(model, field, value)
    }

    async fn make_slug_unique(
        &self,
        model: &ModelSchema,
        field: &str,
        slug: String,
        row: &dyn SlugRow,
    ) -> SlugResult<String> {
        let column = model.column_name(field)?;
        let info = self.store.dialect();
        let dialect = match Dialect::resolve(&info) {
            Ok(dialect) => dialect,
            Err(err) => {
                tracing::warn!(dialect = %info.name, model = model.name(), "dbIncrement cannot query this database");
                return Err(err);
            }
        };

        let mut query = SlugQuery::for_slug(dialect, model.table(), column, &slug, self.separator());
        if let Some(on_query) = &self.on_query {
            (**on_query)(&mut query, row);
        }

        let rendered = query.render();
        tracing::debug!(%dialect, sql = %rendered.sql, "looking up colliding slugs");

        let unique = match rendered.projection {
            Projection::Value => {
                let values = self.store.fetch_values(&rendered).await?;
                self.slug_from_values(&slug, &values)
            }
            Projection::Counter(_) => {
                let counters = self.store.fetch_counters(&rendered).await?;
                self.slug_from_counters(&slug, &counters)?
            }
        };

        tracing::debug!(base = %slug, slug = %unique, "resolved unique slug");
        Ok(unique)
    }
}

impl fmt::Debug for DbIncrementStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbIncrementStrategy")
            .field("inner", &self.inner)
            .field("dialect", &self.store.dialect())
            .field("on_query", &self.on_query.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::query::{DialectInfo, RenderedQuery};
    use crate::domain::row::Record;
    use std::sync::Mutex;

    struct FakeStore {
        info: DialectInfo,
        values: Vec<String>,
        counters: Vec<Option<i64>>,
        seen: Mutex<Vec<RenderedQuery>>,
    }

    impl FakeStore {
        fn new(name: &str) -> Self {
            Self {
                info: DialectInfo::new(name, "8"),
                values: Vec::new(),
                counters: Vec::new(),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl SlugStore for FakeStore {
        fn dialect(&self) -> DialectInfo {
            self.info.clone()
        }

        async fn fetch_values(&self, query: &RenderedQuery) -> SlugResult<Vec<String>> {
            self.seen.lock().unwrap().push(query.clone());
            Ok(self.values.clone())
        }

        async fn fetch_counters(&self, query: &RenderedQuery) -> SlugResult<Vec<Option<i64>>> {
            self.seen.lock().unwrap().push(query.clone());
            Ok(self.counters.clone())
        }
    }

    fn model() -> ModelSchema {
        ModelSchema::new("Post", "posts").field("title").column("slug", "post_slug")
    }

    fn strategy(store: Arc<dyn SlugStore>) -> DbIncrementStrategy {
        let config = SlugifyConfig::builder("dbIncrement", ["title"]).build().unwrap();
        DbIncrementStrategy::new(store, &config)
    }

    fn values(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_matching_values_keeps_slug() {
        let s = strategy(Arc::new(FakeStore::new("sqlite3")));
        assert_eq!(s.slug_from_values("hello-world", &[]), "hello-world");
    }

    #[test]
    fn exact_match_without_counter_gets_one() {
        let s = strategy(Arc::new(FakeStore::new("sqlite3")));
        assert_eq!(
            s.slug_from_values("hello-world", &values(&["hello-world"])),
            "hello-world-1"
        );
    }

    #[test]
    fn takes_max_counter_not_first_gap() {
        let s = strategy(Arc::new(FakeStore::new("sqlite3")));
        let rows = values(&["hello-world", "hello-world-1", "hello-world-4"]);
        assert_eq!(s.slug_from_values("hello-world", &rows), "hello-world-5");
    }

    #[test]
    fn mixed_case_values_still_collide() {
        let s = strategy(Arc::new(FakeStore::new("sqlite3")));
        let rows = values(&["Hello-World", "HELLO-WORLD-2"]);
        assert_eq!(s.slug_from_values("hello-world", &rows), "hello-world-3");
    }

    #[test]
    fn non_numeric_and_nested_suffixes_are_ignored() {
        let s = strategy(Arc::new(FakeStore::new("sqlite3")));
        let rows = values(&["post-1", "post-abc", "post-2-post-9"]);
        assert_eq!(s.slug_from_values("post", &rows), "post-2");
    }

    #[test]
    fn counter_reduction() {
        let s = strategy(Arc::new(FakeStore::new("postgres")));
        assert_eq!(s.slug_from_counters("a", &[]).unwrap(), "a");
        assert_eq!(s.slug_from_counters("a", &[None]).unwrap(), "a-1");
        assert_eq!(s.slug_from_counters("a", &[Some(4), Some(1)]).unwrap(), "a-5");
        assert_eq!(s.slug_from_counters("a", &[None, Some(4)]).unwrap(), "a-5");
        assert_eq!(s.slug_from_counters("a", &[None, None]).unwrap(), "a-1");
    }

    #[test]
    fn counter_at_i64_max_is_an_error() {
        let s = strategy(Arc::new(FakeStore::new("postgres")));
        let err = s.slug_from_counters("a", &[Some(i64::MAX)]).unwrap_err();
        assert!(matches!(err, SlugError::Persistence(_)));
        assert!(s.slug_from_counters("a", &[None, Some(i64::MAX)]).is_err());
        assert_eq!(
            s.slug_from_counters("a", &[Some(i64::MAX - 1)]).unwrap(),
            format!("a-{}", i64::MAX)
        );
    }

    #[tokio::test]
    async fn dispatches_counter_query_and_applies_on_query() {
        let mut store = FakeStore::new("postgres");
        store.counters = vec![None, Some(2)];
        let store = Arc::new(store);

        let config = SlugifyConfig::builder("dbIncrement", ["title"])
            .on_query(|query, row| {
                if let Some(tenant) = row.value("tenant_id") {
                    query.and_where_eq("tenant_id", tenant.to_string());
                }
            })
            .build()
            .unwrap();
        let strategy = DbIncrementStrategy::new(store.clone(), &config);
        let row = Record::new().with("tenant_id", 3i64);

        let slug = strategy
            .make_slug_unique(&model(), "slug", "hello".into(), &row)
            .await
            .unwrap();
        assert_eq!(slug, "hello-3");

        let seen = store.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].sql.contains("\"post_slug\" ~* $1"));
        assert!(seen[0].sql.contains("(\"tenant_id\" = $2)"));
        assert_eq!(seen[0].binds, vec!["^hello(-[0-9]*)?$", "3"]);
    }

    #[tokio::test]
    async fn unsupported_dialect_is_fatal() {
        let s = strategy(Arc::new(FakeStore::new("cockroachdb")));
        let err = s
            .make_slug_unique(&model(), "slug", "hello".into(), &Record::new())
            .await
            .unwrap_err();
        assert!(matches!(err, SlugError::UnsupportedDialect(_)));
    }

    #[tokio::test]
    async fn unknown_field_is_reported() {
        let s = strategy(Arc::new(FakeStore::new("sqlite3")));
        let err = s
            .make_slug_unique(&model(), "permalink", "hello".into(), &Record::new())
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E_UNKNOWN_SLUGIFY_FIELD");
    }
}
