// src/application/strategies/simple.rs
use super::SlugStrategy;
use crate::application::config::SlugifyConfig;
use crate::application::transform;
use crate::domain::errors::SlugResult;
use crate::domain::model::ModelSchema;
use crate::domain::row::SlugRow;
use async_trait::async_trait;

/// Slugs the value and returns it as is. Suits columns where uniqueness is
/// not wanted or is guaranteed elsewhere.
#[derive(Debug, Clone)]
pub struct SimpleStrategy {
    separator: String,
    max_length: Option<usize>,
    complete_words: bool,
    max_length_buffer: usize,
}

impl SimpleStrategy {
    pub fn new(config: &SlugifyConfig) -> Self {
        Self {
            separator: config.separator.clone(),
            max_length: config.max_length,
            complete_words: config.complete_words,
            max_length_buffer: 0,
        }
    }

    /// Reserve room at the end of `max_length` for a suffix appended later.
    pub(crate) fn with_max_length_buffer(mut self, buffer: usize) -> Self {
        self.max_length_buffer = buffer;
        self
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    pub(crate) fn slug(&self, value: &str) -> String {
        let slug = transform::slugify(value, &self.separator);
        match self.max_length {
            Some(max_length) => transform::truncate(
                &slug,
                max_length.saturating_sub(self.max_length_buffer),
                self.complete_words,
            ),
            None => slug,
        }
    }
}

#[async_trait]
impl SlugStrategy for SimpleStrategy {
    fn make_slug(&self, _model: &ModelSchema, _field: &str, value: &str) -> String {
        self.slug(value)
    }

    async fn make_slug_unique(
        &self,
        _model: &ModelSchema,
        _field: &str,
        slug: String,
        _row: &dyn SlugRow,
    ) -> SlugResult<String> {
        Ok(slug)
    }
}
