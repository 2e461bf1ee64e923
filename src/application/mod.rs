// src/application/mod.rs
pub mod config;
pub mod manager;
pub mod ports;
pub mod query;
pub mod services;
pub mod slugifier;
pub mod slugify;
pub mod strategies;
pub mod transform;

pub use config::{AllowUpdates, SlugifyConfig, StrategyRef};
pub use manager::SlugifyManager;
pub use query::{Dialect, DialectInfo, SlugQuery};
pub use services::SlugifyServices;
pub use slugifier::Slugifier;
pub use slugify::{Slugify, SlugifyDecorator};
pub use strategies::SlugStrategy;
