//! Configuration types and loading for the crafter system.
//!
//! [`CrafterConfig`] mirrors `.crafter/config.yaml`. [`load_config`] layers
//! built-in defaults, the YAML file and `CRAFTER_*` environment variables
//! (`__` separates nested keys, e.g. `CRAFTER_LEVELING__PROBABILITY_STEP`).

use std::path::Path;

use crafter_core::{LevelingRules, ProbabilityTable};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File name of the configuration inside `.crafter/`.
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Prefix of environment variables that override configuration keys.
pub const ENV_PREFIX: &str = "CRAFTER_";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read or written.
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// The configuration could not be serialized to YAML.
    #[error("failed to parse config file: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Merging the configuration layers failed.
    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    /// The `.crafter/` directory was not found.
    #[error("no .crafter directory found (run 'crafter config init' first)")]
    CrafterDirNotFound,

    /// A configuration value was invalid.
    #[error("invalid configuration value for key '{key}': {reason}")]
    InvalidValue {
        /// The configuration key that had an invalid value.
        key: String,
        /// A description of why the value is invalid.
        reason: String,
    },
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Load(Box::new(err))
    }
}

/// A specialized `Result` type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

// ---------------------------------------------------------------------------
// Config sections
// ---------------------------------------------------------------------------

/// Leveling configuration section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelingConfig {
    /// Successful productions per automatic level-up.
    #[serde(default = "default_successes_per_level", rename = "successes-per-level")]
    pub successes_per_level: u32,

    /// Weight moved between tiers on each level-up.
    #[serde(default = "default_probability_step", rename = "probability-step")]
    pub probability_step: u32,

    /// Starting weights for fail, partial, full and bonus. Must sum to 100.
    #[serde(default = "default_base_probabilities", rename = "base-probabilities")]
    pub base_probabilities: [u32; 4],
}

impl Default for LevelingConfig {
    fn default() -> Self {
        Self {
            successes_per_level: default_successes_per_level(),
            probability_step: default_probability_step(),
            base_probabilities: default_base_probabilities(),
        }
    }
}

fn default_successes_per_level() -> u32 {
    LevelingRules::default().successes_per_level()
}

fn default_probability_step() -> u32 {
    LevelingRules::default().probability_step()
}

fn default_base_probabilities() -> [u32; 4] {
    ProbabilityTable::DEFAULT.weights()
}

/// The full crafter configuration, corresponding to `.crafter/config.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CrafterConfig {
    /// Sort material names alphabetically when building formulas.
    #[serde(default, rename = "sort-materials")]
    pub sort_materials: bool,

    /// Seed for reproducible production draws.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Leveling configuration.
    #[serde(default)]
    pub leveling: LevelingConfig,
}

impl CrafterConfig {
    /// Validates the leveling section and converts it into core rules.
    pub fn leveling_rules(&self) -> Result<LevelingRules> {
        let table = ProbabilityTable::new(self.leveling.base_probabilities).map_err(|e| {
            ConfigError::InvalidValue {
                key: "leveling.base-probabilities".to_string(),
                reason: e.to_string(),
            }
        })?;
        LevelingRules::new(
            self.leveling.successes_per_level,
            self.leveling.probability_step,
            table,
        )
        .map_err(|e| ConfigError::InvalidValue {
            key: "leveling.successes-per-level".to_string(),
            reason: e.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Builds the layered provider: defaults, then `<dir>/config.yaml` when a
/// directory is given, then `CRAFTER_*` environment variables.
pub fn figment(crafter_dir: Option<&Path>) -> Figment {
    let mut figment = Figment::from(Serialized::defaults(CrafterConfig::default()));
    if let Some(dir) = crafter_dir {
        figment = figment.merge(Yaml::file(dir.join(CONFIG_FILE_NAME)));
    }
    figment.merge(
        Env::prefixed(ENV_PREFIX)
            .split("__")
            .map(|key| key.as_str().replace('_', "-").into()),
    )
}

/// Load configuration for the given `.crafter/` directory.
///
/// A missing file yields the defaults (still overridable from the
/// environment).
///
/// # Errors
///
/// Returns [`ConfigError::Load`] if the file or an environment value does
/// not fit the schema.
pub fn load_config(crafter_dir: Option<&Path>) -> Result<CrafterConfig> {
    Ok(figment(crafter_dir).extract()?)
}

/// Save configuration to `config.yaml` inside the given `.crafter/` directory.
///
/// The directory is created if it does not exist.
pub fn save_config(crafter_dir: &Path, config: &CrafterConfig) -> Result<()> {
    std::fs::create_dir_all(crafter_dir)?;

    let yaml = serde_yaml::to_string(config)?;
    std::fs::write(crafter_dir.join(CONFIG_FILE_NAME), yaml)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let cfg = CrafterConfig::default();
        assert!(!cfg.sort_materials);
        assert!(cfg.seed.is_none());
        assert_eq!(cfg.leveling.successes_per_level, 5);
        assert_eq!(cfg.leveling.base_probabilities, [25, 20, 50, 5]);
        assert_eq!(cfg.leveling_rules().unwrap(), LevelingRules::default());
    }

    #[test]
    fn test_roundtrip_config() {
        let dir = tempfile::tempdir().unwrap();
        let crafter_dir = dir.path().join(".crafter");

        let mut cfg = CrafterConfig::default();
        cfg.sort_materials = true;
        cfg.seed = Some(17);
        cfg.leveling.probability_step = 2;

        save_config(&crafter_dir, &cfg).unwrap();
        let text = std::fs::read_to_string(crafter_dir.join(CONFIG_FILE_NAME)).unwrap();
        assert!(text.contains("sort-materials: true"));

        let loaded: CrafterConfig = serde_yaml::from_str(&text).unwrap();
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn test_deserialize_partial_yaml() {
        let yaml = "seed: 3\nleveling:\n  probability-step: 10\n";
        let cfg: CrafterConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.seed, Some(3));
        assert_eq!(cfg.leveling.probability_step, 10);
        assert_eq!(cfg.leveling.successes_per_level, 5);
        assert!(!cfg.sort_materials);
    }

    #[test]
    fn test_invalid_probabilities_are_reported() {
        let mut cfg = CrafterConfig::default();
        cfg.leveling.base_probabilities = [50, 50, 50, 50];
        let err = cfg.leveling_rules().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid configuration value for key 'leveling.base-probabilities': \
             probability table must sum to 100 (got 200)"
        );
    }

    #[test]
    fn test_zero_threshold_is_reported() {
        let mut cfg = CrafterConfig::default();
        cfg.leveling.successes_per_level = 0;
        assert!(matches!(
            cfg.leveling_rules().unwrap_err(),
            ConfigError::InvalidValue { .. }
        ));
    }

    #[test]
    fn test_layers_file_then_env() {
        Jail::expect_with(|jail| {
            jail.create_file(
                CONFIG_FILE_NAME,
                "sort-materials: true\nseed: 1\nleveling:\n  successes-per-level: 3\n",
            )?;
            jail.set_env("CRAFTER_SEED", 99);
            jail.set_env("CRAFTER_LEVELING__PROBABILITY_STEP", 7);

            let cfg = load_config(Some(jail.directory())).expect("config loads");
            assert!(cfg.sort_materials);
            assert_eq!(cfg.seed, Some(99));
            assert_eq!(cfg.leveling.successes_per_level, 3);
            assert_eq!(cfg.leveling.probability_step, 7);
            Ok(())
        });
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        Jail::expect_with(|jail| {
            let cfg = load_config(Some(&jail.directory().join("absent"))).expect("config loads");
            assert_eq!(cfg, CrafterConfig::default());
            Ok(())
        });
    }
}
