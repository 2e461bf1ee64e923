//! Slug generation for database rows.
//!
//! A [`SlugifyConfig`](application::SlugifyConfig) names the source fields
//! and a uniqueness strategy; [`Slugify`](application::Slugify) turns it into
//! `before create` / `before update` hooks that fill the target field right
//! before the row is persisted.
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use application::{
    AllowUpdates, Slugify, SlugifyConfig, SlugifyDecorator, SlugifyManager, SlugifyServices,
    SlugStrategy,
};
pub use domain::{FieldValue, ModelSchema, Record, SlugError, SlugResult, SlugRow};
