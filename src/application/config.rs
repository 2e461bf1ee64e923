// src/application/config.rs
use crate::application::query::SlugQuery;
use crate::application::strategies::SlugStrategy;
use crate::domain::errors::{SlugError, SlugResult};
use crate::domain::row::SlugRow;
use crate::domain::value::FieldValue;
use std::fmt;
use std::sync::Arc;

pub const DEFAULT_SEPARATOR: &str = "-";

pub type Transformer = Arc<dyn Fn(&FieldValue) -> String + Send + Sync>;
pub type UpdatePredicate = Arc<dyn Fn(&dyn SlugRow) -> bool + Send + Sync>;
pub type OnQuery = Arc<dyn Fn(&mut SlugQuery, &dyn SlugRow) + Send + Sync>;

/// Which strategy makes slugs unique: a registered name or a ready instance.
#[derive(Clone)]
pub enum StrategyRef {
    Named(String),
    Custom(Arc<dyn SlugStrategy>),
}

impl fmt::Debug for StrategyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.debug_tuple("Named").field(name).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl From<&str> for StrategyRef {
    fn from(value: &str) -> Self {
        Self::Named(value.to_string())
    }
}

impl From<String> for StrategyRef {
    fn from(value: String) -> Self {
        Self::Named(value)
    }
}

impl From<Arc<dyn SlugStrategy>> for StrategyRef {
    fn from(value: Arc<dyn SlugStrategy>) -> Self {
        Self::Custom(value)
    }
}

/// Whether a slug is regenerated when its source fields change on update.
#[derive(Clone, Default)]
pub enum AllowUpdates {
    #[default]
    Never,
    Always,
    /// Decided per row. The predicate sees the row with the pending update
    /// already applied.
    When(UpdatePredicate),
}

impl AllowUpdates {
    pub fn when<F>(predicate: F) -> Self
    where
        F: Fn(&dyn SlugRow) -> bool + Send + Sync + 'static,
    {
        Self::When(Arc::new(predicate))
    }

    pub fn resolve(&self, row: &dyn SlugRow) -> bool {
        match self {
            Self::Never => false,
            Self::Always => true,
            Self::When(predicate) => (**predicate)(row),
        }
    }
}

impl From<bool> for AllowUpdates {
    fn from(value: bool) -> Self {
        if value { Self::Always } else { Self::Never }
    }
}

impl fmt::Debug for AllowUpdates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Never => f.write_str("Never"),
            Self::Always => f.write_str("Always"),
            Self::When(_) => f.write_str("When(..)"),
        }
    }
}

/// Immutable per-field slug configuration.
#[derive(Clone)]
pub struct SlugifyConfig {
    pub strategy: StrategyRef,
    pub fields: Vec<String>,
    pub separator: String,
    pub max_length: Option<usize>,
    pub complete_words: bool,
    pub allow_updates: AllowUpdates,
    pub transformer: Option<Transformer>,
    pub on_query: Option<OnQuery>,
}

impl SlugifyConfig {
    pub fn builder<S, I, F>(strategy: S, fields: I) -> SlugifyConfigBuilder
    where
        S: Into<StrategyRef>,
        I: IntoIterator<Item = F>,
        F: Into<String>,
    {
        SlugifyConfigBuilder {
            strategy: strategy.into(),
            fields: fields.into_iter().map(Into::into).collect(),
            separator: DEFAULT_SEPARATOR.to_string(),
            max_length: None,
            complete_words: false,
            allow_updates: AllowUpdates::Never,
            transformer: None,
            on_query: None,
        }
    }
}

impl fmt::Debug for SlugifyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlugifyConfig")
            .field("strategy", &self.strategy)
            .field("fields", &self.fields)
            .field("separator", &self.separator)
            .field("max_length", &self.max_length)
            .field("complete_words", &self.complete_words)
            .field("allow_updates", &self.allow_updates)
            .field("transformer", &self.transformer.is_some())
            .field("on_query", &self.on_query.is_some())
            .finish()
    }
}

pub struct SlugifyConfigBuilder {
    strategy: StrategyRef,
    fields: Vec<String>,
    separator: String,
    max_length: Option<usize>,
    complete_words: bool,
    allow_updates: AllowUpdates,
    transformer: Option<Transformer>,
    on_query: Option<OnQuery>,
}

impl SlugifyConfigBuilder {
    /// Word separator, `-` by default.
    ///
    /// Slugs are only stable under re-slugifying for single-character
    /// separators. A longer separator found in the input is punctuation and
    /// gets dropped, so `"a__b"` with `"__"` becomes `"ab"`.
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn complete_words(mut self, complete_words: bool) -> Self {
        self.complete_words = complete_words;
        self
    }

    pub fn allow_updates(mut self, allow_updates: impl Into<AllowUpdates>) -> Self {
        self.allow_updates = allow_updates.into();
        self
    }

    pub fn transformer<F>(mut self, transformer: F) -> Self
    where
        F: Fn(&FieldValue) -> String + Send + Sync + 'static,
    {
        self.transformer = Some(Arc::new(transformer));
        self
    }

    /// Hook to adjust the uniqueness lookup of the `dbIncrement` strategy,
    /// e.g. to scope it to the row's tenant.
    pub fn on_query<F>(mut self, on_query: F) -> Self
    where
        F: Fn(&mut SlugQuery, &dyn SlugRow) + Send + Sync + 'static,
    {
        self.on_query = Some(Arc::new(on_query));
        self
    }

    pub fn build(self) -> SlugResult<SlugifyConfig> {
        if self.fields.is_empty() {
            return Err(SlugError::config("at least one source field is required"));
        }
        if self.fields.iter().any(|f| f.trim().is_empty()) {
            return Err(SlugError::config("source field names cannot be blank"));
        }
        if self.separator.is_empty() {
            return Err(SlugError::config("separator cannot be empty"));
        }

        Ok(SlugifyConfig {
            strategy: self.strategy,
            fields: self.fields,
            separator: self.separator,
            max_length: self.max_length,
            complete_words: self.complete_words,
            allow_updates: self.allow_updates,
            transformer: self.transformer,
            on_query: self.on_query,
        })
    }
}
