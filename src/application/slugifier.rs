// src/application/slugifier.rs
use crate::application::config::SlugifyConfig;
use crate::application::strategies::SlugStrategy;
use crate::domain::errors::SlugResult;
use crate::domain::model::ModelSchema;
use crate::domain::row::SlugRow;
use crate::domain::value::FieldValue;
use std::sync::Arc;

/// Builds the slug for one target field of one model.
#[derive(Clone)]
pub struct Slugifier {
    strategy: Arc<dyn SlugStrategy>,
    model: Arc<ModelSchema>,
    field: String,
    config: Arc<SlugifyConfig>,
}

impl Slugifier {
    pub fn new(
        strategy: Arc<dyn SlugStrategy>,
        model: Arc<ModelSchema>,
        field: impl Into<String>,
        config: Arc<SlugifyConfig>,
    ) -> Self {
        Self {
            strategy,
            model,
            field: field.into(),
            config,
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn config(&self) -> &SlugifyConfig {
        &self.config
    }

    fn to_slug_string(&self, value: &FieldValue) -> String {
        match &self.config.transformer {
            Some(transformer) => (**transformer)(value),
            None => value.to_slug_source(),
        }
    }

    /// Source fields joined by the separator, or `None` as soon as one of
    /// them has no value.
    pub fn source_value(&self, row: &dyn SlugRow) -> Option<String> {
        let parts = self
            .config
            .fields
            .iter()
            .map(|field| row.value(field).map(|value| self.to_slug_string(&value)))
            .collect::<Option<Vec<_>>>()?;

        Some(parts.join(&self.config.separator))
    }

    /// Slug for `row`, or `None` when the sources do not produce one.
    pub async fn make_slug(&self, row: &dyn SlugRow) -> SlugResult<Option<String>> {
        let Some(value) = self.source_value(row).filter(|value| !value.is_empty()) else {
            return Ok(None);
        };

        let base = self.strategy.make_slug(&self.model, &self.field, &value);
        let slug = self
            .strategy
            .make_slug_unique(&self.model, &self.field, base, row)
            .await?;

        Ok(Some(slug))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::strategies::SimpleStrategy;
    use crate::domain::row::Record;

    fn slugifier(config: SlugifyConfig) -> Slugifier {
        let strategy = Arc::new(SimpleStrategy::new(&config));
        let model = Arc::new(
            ModelSchema::new("Post", "posts")
                .field("title")
                .field("category")
                .field("slug"),
        );
        Slugifier::new(strategy, model, "slug", Arc::new(config))
    }

    #[tokio::test]
    async fn joins_fields_in_order() {
        let config = SlugifyConfig::builder("simple", ["category", "title"])
            .build()
            .unwrap();
        let row = Record::new().with("title", "Hello world").with("category", "News");
        let slug = slugifier(config).make_slug(&row).await.unwrap();
        assert_eq!(slug.as_deref(), Some("news-hello-world"));
    }

    #[tokio::test]
    async fn any_missing_field_yields_none() {
        let config = SlugifyConfig::builder("simple", ["category", "title"])
            .build()
            .unwrap();
        let s = slugifier(config);

        let missing_title = Record::new().with("category", "News");
        let null_category = Record::new()
            .with("title", "Hello")
            .with("category", FieldValue::Null);

        assert_eq!(s.make_slug(&missing_title).await.unwrap(), None);
        assert_eq!(s.make_slug(&null_category).await.unwrap(), None);
    }

    #[tokio::test]
    async fn empty_source_yields_none() {
        let config = SlugifyConfig::builder("simple", ["title"]).build().unwrap();
        let row = Record::new().with("title", "");
        assert_eq!(slugifier(config).make_slug(&row).await.unwrap(), None);
    }

    #[tokio::test]
    async fn booleans_become_digits() {
        let config = SlugifyConfig::builder("simple", ["title", "featured"])
            .build()
            .unwrap();
        let row = Record::new().with("title", "Hello").with("featured", true);
        let slug = slugifier(config).make_slug(&row).await.unwrap();
        assert_eq!(slug.as_deref(), Some("hello-1"));
    }

    #[tokio::test]
    async fn transformer_output_is_used_verbatim() {
        let config = SlugifyConfig::builder("simple", ["title", "featured"])
            .transformer(|value| match value {
                FieldValue::Bool(true) => "featured".to_string(),
                FieldValue::Bool(false) => "regular".to_string(),
                other => other.to_string(),
            })
            .build()
            .unwrap();
        let row = Record::new().with("title", "Hello").with("featured", false);
        let slug = slugifier(config).make_slug(&row).await.unwrap();
        assert_eq!(slug.as_deref(), Some("hello-regular"));
    }
}
