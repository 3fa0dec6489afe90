//! # Veris Config
//!
//! Layered configuration for the eligibility engine: TOML files plus
//! `VERIS_`-prefixed environment variable overrides, deserialized into
//! typed structures with sensible defaults.

mod app_config;
mod loader;

pub use app_config::{
    AppConfig, AppMetadata, BusinessConfig, DatabaseConfig, ObservabilityConfig, RedisConfig,
};
pub use loader::ConfigLoader;
