// src/application/services/mod.rs
use std::sync::Arc;

use crate::application::{manager::SlugifyManager, ports::SlugStorePort, slugify::Slugify};

/// Shared slugify services, built once at boot and handed to model setup.
pub struct SlugifyServices {
    pub manager: Arc<SlugifyManager>,
    pub slugify: Arc<Slugify>,
}

impl SlugifyServices {
    /// Binding key of the strategy manager.
    pub const MANAGER_KEY: &'static str = "slugify.manager";
    /// Binding key of the decorator entry point.
    pub const DECORATOR_KEY: &'static str = "slugify.decorator";

    pub fn new(store: Arc<SlugStorePort>) -> Self {
        let manager = Arc::new(SlugifyManager::new(store));
        let slugify = Arc::new(Slugify::new(Arc::clone(&manager)));
        Self { manager, slugify }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::config::SlugifyConfig;
    use crate::application::ports::store::SlugStore;
    use crate::application::query::{DialectInfo, RenderedQuery};
    use crate::application::strategies::{SimpleStrategy, SlugStrategy};
    use crate::domain::errors::SlugResult;
    use async_trait::async_trait;

    struct EmptyStore;

    #[async_trait]
    impl SlugStore for EmptyStore {
        fn dialect(&self) -> DialectInfo {
            DialectInfo::new("sqlite3", "3")
        }

        async fn fetch_values(&self, _query: &RenderedQuery) -> SlugResult<Vec<String>> {
            Ok(Vec::new())
        }

        async fn fetch_counters(&self, _query: &RenderedQuery) -> SlugResult<Vec<Option<i64>>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn binding_keys_are_stable() {
        assert_eq!(SlugifyServices::MANAGER_KEY, "slugify.manager");
        assert_eq!(SlugifyServices::DECORATOR_KEY, "slugify.decorator");
    }

    #[test]
    fn decorator_sees_strategies_extended_on_the_manager() {
        let services = SlugifyServices::new(Arc::new(EmptyStore));
        services
            .manager
            .extend("plain", |_, config| Arc::new(SimpleStrategy::new(config)) as Arc<dyn SlugStrategy>);

        let config = SlugifyConfig::builder("plain", ["title"]).build().unwrap();
        assert!(services.slugify.decorator(config).is_ok());
    }
}
