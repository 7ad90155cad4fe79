//! [`Plan`] -- an ordered, owned sequence of formulas.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::error::{CraftError, Result, StateError};
use crate::formula::Formula;

/// An ordered list of formulas. Every step is a private copy: formulas are
/// cloned on the way in, and only borrowed on the way out.
///
/// `Clone` is a deep copy; mutating either plan afterwards is never visible
/// in the other.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Plan {
    steps: Vec<Formula>,
}

impl Plan {
    /// Creates an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a plan holding a copy of each formula, in order.
    pub fn from_formulas(formulas: &[Formula]) -> Self {
        Self {
            steps: formulas.to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Formula> {
        self.steps.get(index)
    }

    pub fn steps(&self) -> &[Formula] {
        &self.steps
    }

    /// Appends a copy of `formula`.
    pub fn add<'a>(&mut self, formula: impl Into<Option<&'a Formula>>) -> Result<()> {
        let formula = formula
            .into()
            .ok_or(CraftError::MissingFormula { operation: "add" })?;
        self.steps.push(formula.clone());
        debug!(len = self.steps.len(), step = %formula, "added step");
        Ok(())
    }

    /// Overwrites the step at `index` with a copy of `formula`.
    pub fn replace<'a>(
        &mut self,
        index: usize,
        formula: impl Into<Option<&'a Formula>>,
    ) -> Result<()> {
        let len = self.steps.len();
        if index >= len {
            return Err(CraftError::OutOfRange { index, len });
        }
        let formula = formula
            .into()
            .ok_or(CraftError::MissingFormula { operation: "replace" })?;
        self.steps[index] = formula.clone();
        debug!(index, step = %formula, "replaced step");
        Ok(())
    }

    /// Drops the last step.
    pub fn remove(&mut self) -> Result<()> {
        let removed = self.steps.pop().ok_or(StateError::NothingToRemove)?;
        debug!(len = self.steps.len(), step = %removed, "removed last step");
        Ok(())
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Formula> {
        self.steps.get_mut(index)
    }
}

impl FromIterator<Formula> for Plan {
    fn from_iter<T: IntoIterator<Item = Formula>>(iter: T) -> Self {
        Self {
            steps: iter.into_iter().collect(),
        }
    }
}

/// Renders `"(<n>) <formula>\n"` per step.
impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            writeln!(f, "({}) {}", i + 1, step)?;
        }
        Ok(())
    }
}
