//! Configuration for stackrot
//!
//! Provides types and loading for `stackrot.toml`.

pub mod loader;
pub mod schema;

pub use loader::{find_config_from, load_config, ConfigError};
pub use schema::*;
