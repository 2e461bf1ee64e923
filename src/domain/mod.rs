pub mod errors;
pub mod lifecycle;
pub mod model;
pub mod row;
pub mod value;

pub use errors::{SlugError, SlugResult};
pub use lifecycle::{HookRegistry, LifecycleEvent, LifecycleHook, ModelHooks};
pub use model::ModelSchema;
pub use row::{Record, SlugRow};
pub use value::FieldValue;
