// src/application/manager.rs
use crate::application::config::SlugifyConfig;
use crate::application::ports::store::SlugStore;
use crate::application::strategies::{
    DbIncrementStrategy, ShortIdStrategy, SimpleStrategy, SlugStrategy,
};
use crate::domain::errors::{SlugError, SlugResult};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

pub const SIMPLE: &str = "simple";
pub const DB_INCREMENT: &str = "dbIncrement";
pub const SHORT_ID: &str = "shortId";

/// Factory for a strategy registered through [`SlugifyManager::extend`].
pub type ExtendCallback =
    Arc<dyn Fn(&SlugifyManager, &SlugifyConfig) -> Arc<dyn SlugStrategy> + Send + Sync>;

/// Resolves strategies by name and holds the ones added at runtime.
pub struct SlugifyManager {
    store: Arc<dyn SlugStore>,
    extended: RwLock<HashMap<String, ExtendCallback>>,
}

impl SlugifyManager {
    pub fn new(store: Arc<dyn SlugStore>) -> Self {
        Self {
            store,
            extended: RwLock::new(HashMap::new()),
        }
    }

    /// Store handed to the built-in `dbIncrement` strategy. Extensions that
    /// need database access reach it from here.
    pub fn store(&self) -> Arc<dyn SlugStore> {
        Arc::clone(&self.store)
    }

    /// Build an instance of the named strategy for `config`.
    pub fn use_strategy(
        &self,
        strategy: &str,
        config: &SlugifyConfig,
    ) -> SlugResult<Arc<dyn SlugStrategy>> {
        match strategy {
            SIMPLE => Ok(Arc::new(SimpleStrategy::new(config))),
            DB_INCREMENT => Ok(Arc::new(DbIncrementStrategy::new(self.store(), config))),
            SHORT_ID => Ok(Arc::new(ShortIdStrategy::new(config))),
            other => self.make_extended(other, config),
        }
    }

    fn make_extended(
        &self,
        strategy: &str,
        config: &SlugifyConfig,
    ) -> SlugResult<Arc<dyn SlugStrategy>> {
        let callback = self
            .extended
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(strategy)
            .cloned()
            .ok_or_else(|| SlugError::InvalidStrategy(strategy.to_string()))?;

        Ok((*callback)(self, config))
    }

    /// Register a custom strategy. A later registration under the same name
    /// replaces the earlier one.
    pub fn extend<F>(&self, strategy: impl Into<String>, callback: F)
    where
        F: Fn(&SlugifyManager, &SlugifyConfig) -> Arc<dyn SlugStrategy> + Send + Sync + 'static,
    {
        let strategy = strategy.into();
        tracing::debug!(strategy = %strategy, "registering slugify strategy");
        self.extended
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(strategy, Arc::new(callback));
    }
}
