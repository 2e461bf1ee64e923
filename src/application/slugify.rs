// src/application/slugify.rs
use crate::application::config::{SlugifyConfig, StrategyRef};
use crate::application::manager::SlugifyManager;
use crate::application::slugifier::Slugifier;
use crate::application::strategies::SlugStrategy;
use crate::domain::errors::SlugResult;
use crate::domain::lifecycle::{HookRegistry, LifecycleEvent, LifecycleHook};
use crate::domain::model::ModelSchema;
use crate::domain::row::SlugRow;
use crate::domain::value::FieldValue;
use async_trait::async_trait;
use std::sync::Arc;

/// Entry point that turns a [`SlugifyConfig`] into lifecycle hooks.
pub struct Slugify {
    manager: Arc<SlugifyManager>,
}

impl Slugify {
    pub fn new(manager: Arc<SlugifyManager>) -> Self {
        Self { manager }
    }

    /// Resolve the configured strategy right away so a bad strategy name
    /// surfaces while the model is being set up.
    pub fn decorator(&self, config: SlugifyConfig) -> SlugResult<SlugifyDecorator> {
        let strategy = match &config.strategy {
            StrategyRef::Named(name) => self.manager.use_strategy(name, &config)?,
            StrategyRef::Custom(strategy) => Arc::clone(strategy),
        };

        Ok(SlugifyDecorator {
            strategy,
            config: Arc::new(config),
        })
    }
}

/// A resolved slug configuration, ready to be attached to a model field.
#[derive(Clone)]
pub struct SlugifyDecorator {
    strategy: Arc<dyn SlugStrategy>,
    config: Arc<SlugifyConfig>,
}

impl SlugifyDecorator {
    /// Register the `before create` and `before update` hooks that maintain
    /// `property` on `model`. Call once per field while setting the model up.
    pub fn apply<R>(&self, model: Arc<ModelSchema>, property: &str, hooks: &mut R)
    where
        R: HookRegistry + ?Sized,
    {
        let slugifier = Slugifier::new(
            Arc::clone(&self.strategy),
            model,
            property,
            Arc::clone(&self.config),
        );

        hooks.before(
            LifecycleEvent::Create,
            Arc::new(BeforeCreate {
                slugifier: slugifier.clone(),
            }),
        );
        hooks.before(LifecycleEvent::Update, Arc::new(BeforeUpdate { slugifier }));
    }
}

async fn assign_slug(slugifier: &Slugifier, row: &mut dyn SlugRow) -> SlugResult<()> {
    if let Some(slug) = slugifier.make_slug(&*row).await? {
        if !slug.is_empty() {
            tracing::debug!(field = slugifier.field(), slug = %slug, "assigning slug");
            row.set_value(slugifier.field(), FieldValue::Text(slug));
        }
    }
    Ok(())
}

struct BeforeCreate {
    slugifier: Slugifier,
}

#[async_trait]
impl LifecycleHook for BeforeCreate {
    async fn call(&self, row: &mut dyn SlugRow) -> SlugResult<()> {
        let field = self.slugifier.field();
        if row.value(field).is_some_and(|value| value.is_truthy()) {
            tracing::debug!(field, "slug set manually, skipping generation");
            return Ok(());
        }

        assign_slug(&self.slugifier, row).await
    }
}

struct BeforeUpdate {
    slugifier: Slugifier,
}

#[async_trait]
impl LifecycleHook for BeforeUpdate {
    async fn call(&self, row: &mut dyn SlugRow) -> SlugResult<()> {
        let config = self.slugifier.config();
        if !config.allow_updates.resolve(&*row) {
            return Ok(());
        }

        let field = self.slugifier.field();
        if row.is_dirty(field) {
            tracing::debug!(field, "slug changed manually, skipping regeneration");
            return Ok(());
        }

        if !config.fields.iter().any(|source| row.is_dirty(source)) {
            tracing::debug!(field, "slug sources unchanged, skipping regeneration");
            return Ok(());
        }

        assign_slug(&self.slugifier, row).await
    }
}
