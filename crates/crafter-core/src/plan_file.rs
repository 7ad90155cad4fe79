//! Parse plan definition files (TOML and JSON).
//!
//! A plan file lists recipes in order:
//!
//! ```toml
//! name = "bakery"
//! description = "Morning batch"
//!
//! [[steps]]
//! recipe = "2 butter, 10 milk -> 36 cookies"
//!
//! [[steps]]
//! recipe = "1 sugar -> 50 candy"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CraftError;
use crate::formula::Formula;
use crate::parser::parse_recipe;
use crate::plan::Plan;
use crate::validation::ValidationError;

/// Errors that can occur while loading a plan file.
#[derive(Debug, thiserror::Error)]
pub enum PlanFileError {
    #[error("parse error: {0}")]
    Parse(String),

    #[error("invalid recipe: {0}")]
    Recipe(#[from] ValidationError),

    #[error(transparent)]
    Formula(#[from] CraftError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Root structure of a `.plan.toml` / `.plan.json` file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanFile {
    /// Name of the plan.
    #[serde(default)]
    pub name: String,

    /// Human-readable description.
    #[serde(default)]
    pub description: String,

    /// Steps in execution order.
    #[serde(default)]
    pub steps: Vec<StepDef>,

    /// Where this plan was loaded from (set by the loader).
    #[serde(skip)]
    pub source: String,
}

/// One step of a plan file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepDef {
    /// Recipe in `"<qty> <name>, ... -> <qty> <name>, ..."` form.
    pub recipe: String,
}

impl PlanFile {
    /// Parses every step into a formula. Errors name the 1-based step.
    pub fn formulas(&self) -> Result<Vec<Formula>, PlanFileError> {
        self.steps
            .iter()
            .enumerate()
            .map(|(i, step)| {
                let (inputs, outputs) =
                    parse_recipe(&step.recipe).map_err(|e| e.at_step(i + 1))?;
                Ok(Formula::from_materials(inputs, outputs)?)
            })
            .collect()
    }

    /// Builds a [`Plan`] from the file's steps.
    pub fn to_plan(&self) -> Result<Plan, PlanFileError> {
        Ok(Plan::from_iter(self.formulas()?))
    }
}

/// Parse a plan from a TOML string.
pub fn parse_toml(content: &str) -> Result<PlanFile, PlanFileError> {
    toml::from_str(content).map_err(|e| PlanFileError::Parse(e.to_string()))
}

/// Parse a plan from a JSON string.
pub fn parse_json(content: &str) -> Result<PlanFile, PlanFileError> {
    serde_json::from_str(content).map_err(|e| PlanFileError::Parse(e.to_string()))
}

/// Load a plan from a file path (auto-detect TOML vs JSON by extension).
pub fn load_plan_file(path: &Path) -> Result<PlanFile, PlanFileError> {
    let content = std::fs::read_to_string(path)?;
    let mut plan = match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => parse_toml(&content)?,
        Some("json") => parse_json(&content)?,
        _ => parse_json(&content).or_else(|_| parse_toml(&content))?,
    };
    plan.source = path.display().to_string();
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const BAKERY: &str = r#"
name = "bakery"
description = "Morning batch"

[[steps]]
recipe = "2 butter, 10 milk -> 36 cookies"

[[steps]]
recipe = "1 sugar -> 50 candy"
"#;

    #[test]
    fn parse_toml_steps() {
        let file = parse_toml(BAKERY).unwrap();
        assert_eq!(file.name, "bakery");
        assert_eq!(file.steps.len(), 2);
        let plan = file.to_plan().unwrap();
        assert_eq!(
            plan.to_string(),
            "(1) 2 butter, 10 milk -> 36 cookies\n(2) 1 sugar -> 50 candy\n"
        );
    }

    #[test]
    fn parse_json_minimal() {
        let file = parse_json(r#"{"steps": [{"recipe": "1 a -> 2 b"}]}"#).unwrap();
        assert_eq!(file.name, "");
        assert_eq!(file.formulas().unwrap()[0].to_string(), "1 a -> 2 b");
    }

    #[test]
    fn bad_recipe_names_step() {
        let file = parse_json(r#"{"steps": [{"recipe": "1 a -> 2 b"}, {"recipe": "oops"}]}"#)
            .unwrap();
        let err = file.formulas().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid recipe: step 2: recipe 'oops' has no '->' separating inputs from outputs"
        );
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        assert!(matches!(
            parse_toml("steps = 3").unwrap_err(),
            PlanFileError::Parse(_)
        ));
    }

    #[test]
    fn load_detects_format_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let toml_path = dir.path().join("bakery.plan.toml");
        std::fs::write(&toml_path, BAKERY).unwrap();
        let file = load_plan_file(&toml_path).unwrap();
        assert_eq!(file.steps.len(), 2);
        assert_eq!(file.source, toml_path.display().to_string());

        let other = dir.path().join("bakery.plan");
        std::fs::write(&other, BAKERY).unwrap();
        assert_eq!(load_plan_file(&other).unwrap().name, "bakery");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_plan_file(Path::new("/nonexistent/plan.toml")).unwrap_err();
        assert!(matches!(err, PlanFileError::Io(_)));
    }
}
