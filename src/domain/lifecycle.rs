// src/domain/lifecycle.rs
use crate::domain::errors::SlugResult;
use crate::domain::row::SlugRow;
use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    Create,
    Update,
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => f.write_str("create"),
            Self::Update => f.write_str("update"),
        }
    }
}

/// Callback invoked by the persistence host right before a row is written.
#[async_trait]
pub trait LifecycleHook: Send + Sync {
    async fn call(&self, row: &mut dyn SlugRow) -> SlugResult<()>;
}

/// Registration side of a model's lifecycle.
pub trait HookRegistry {
    fn before(&mut self, event: LifecycleEvent, hook: Arc<dyn LifecycleHook>);
}

/// Ordered `before` hooks for one model.
#[derive(Default, Clone)]
pub struct ModelHooks {
    before: HashMap<LifecycleEvent, Vec<Arc<dyn LifecycleHook>>>,
}

impl ModelHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, event: LifecycleEvent) -> usize {
        self.before.get(&event).map(Vec::len).unwrap_or(0)
    }

    /// Run every hook registered for `event` in registration order. The first
    /// failure aborts the chain and is returned to the caller.
    pub async fn run_before(&self, event: LifecycleEvent, row: &mut dyn SlugRow) -> SlugResult<()> {
        if let Some(hooks) = self.before.get(&event) {
            for hook in hooks {
                hook.call(&mut *row).await?;
            }
        }
        Ok(())
    }
}

impl HookRegistry for ModelHooks {
    fn before(&mut self, event: LifecycleEvent, hook: Arc<dyn LifecycleHook>) {
        self.before.entry(event).or_default().push(hook);
    }
}

impl fmt::Debug for ModelHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelHooks")
            .field("before_create", &self.count(LifecycleEvent::Create))
            .field("before_update", &self.count(LifecycleEvent::Update))
            .finish()
    }
}
