//! readiness-store: Record store integrations.
//!
//! Implements the `RecordStore` trait for an in-memory store, local TOML
//! content packs, and an HTTP CMS, plus the configuration that picks one.

pub mod cms;
pub mod config;
pub mod memory;
pub mod pack;

pub use config::{create_store, load_config, ReadinessConfig, StoreConfig};
pub use readiness_core::error::StoreError;
