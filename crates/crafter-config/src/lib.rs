//! Configuration management for the crafter system.
//!
//! This crate discovers `.crafter/` directories, loads and saves
//! `.crafter/config.yaml`, and turns configured leveling values into the
//! core's [`LevelingRules`](crafter_core::LevelingRules).

pub mod config;
pub mod crafter_dir;

pub use config::{ConfigError, CrafterConfig, LevelingConfig, load_config, save_config};
