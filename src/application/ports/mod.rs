// src/application/ports/mod.rs
pub mod store;

// Injection sites read better without the `dyn` noise.
pub type SlugStorePort = dyn store::SlugStore;
