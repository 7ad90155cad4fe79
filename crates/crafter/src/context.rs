//! Runtime context for command execution.
//!
//! The [`RuntimeContext`] holds the global flags and the resolved
//! configuration directory. [`FormulaSettings`] carries what the loaded
//! configuration says about building formulas.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use crafter_config::crafter_dir::find_crafter_dir;
use crafter_config::{CrafterConfig, load_config};
use crafter_core::{Formula, LevelingRules};

use crate::cli::GlobalArgs;

/// Runtime context passed to every command handler.
///
/// Constructed once in `main` after CLI parsing, before command dispatch.
#[derive(Debug)]
pub struct RuntimeContext {
    /// Explicit configuration directory from `--config-dir`.
    pub config_dir: Option<PathBuf>,

    /// Seed from `--seed` / `CRAFTER_SEED`.
    pub seed: Option<u64>,

    /// Whether to produce JSON output.
    pub json: bool,

    /// Verbose output.
    pub verbose: bool,

    /// Quiet mode: suppress non-essential output.
    pub quiet: bool,
}

impl RuntimeContext {
    /// Build a `RuntimeContext` from parsed global arguments.
    pub fn from_global_args(global: &GlobalArgs) -> Self {
        Self {
            config_dir: global.config_dir.clone(),
            seed: global.seed,
            json: global.json,
            verbose: global.verbose,
            quiet: global.quiet,
        }
    }

    /// Returns the configuration directory: `--config-dir` if given,
    /// otherwise the nearest `.crafter/` above the working directory.
    pub fn resolve_config_dir(&self) -> Option<PathBuf> {
        if let Some(ref dir) = self.config_dir {
            return Some(dir.clone());
        }
        let cwd = env::current_dir().ok()?;
        find_crafter_dir(&cwd)
    }

    /// Loads the layered configuration.
    pub fn load_config(&self) -> Result<CrafterConfig> {
        let dir = self.resolve_config_dir();
        load_config(dir.as_deref()).with_context(|| match dir {
            Some(ref d) => format!("failed to load configuration from {}", d.display()),
            None => "failed to load configuration".to_string(),
        })
    }

    /// Loads the configuration and resolves the formula-building settings.
    pub fn formula_settings(&self) -> Result<FormulaSettings> {
        let config = self.load_config()?;
        let rules = config
            .leveling_rules()
            .context("invalid leveling configuration")?;
        Ok(FormulaSettings {
            rules,
            seed: self.seed.or(config.seed),
            sort_materials: config.sort_materials,
        })
    }
}

/// How formulas built by the CLI are configured.
#[derive(Debug, Clone, Default)]
pub struct FormulaSettings {
    pub rules: LevelingRules,
    pub seed: Option<u64>,
    pub sort_materials: bool,
}

impl FormulaSettings {
    /// Applies the settings to the formula at position `index` of a batch.
    ///
    /// Each position gets its own seed so that steps of a seeded run draw
    /// different but reproducible sequences.
    pub fn prepare(&self, formula: Formula, index: usize) -> Formula {
        let mut formula = formula.with_rules(self.rules);
        if let Some(seed) = self.seed {
            formula = formula.with_seed(seed.wrapping_add(index as u64));
        }
        if self.sort_materials {
            formula = formula.sorted();
        }
        formula
    }

    /// Parses `recipe` and applies the settings to it.
    pub fn parse(&self, recipe: &str, index: usize) -> Result<Formula> {
        let formula: Formula = recipe
            .parse()
            .with_context(|| format!("invalid recipe '{recipe}'"))?;
        Ok(self.prepare(formula, index))
    }
}
