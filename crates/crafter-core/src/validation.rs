//! Construction-time validation rules for materials and formulas.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which side of a formula a material belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Input,
    Output,
}

impl Side {
    /// Returns the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Output => "output",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for malformed construction input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{side} materials are required")]
    EmptyMaterials { side: Side },

    #[error("{side} names and quantities are not paired ({names} names, {quantities} quantities)")]
    LengthMismatch {
        side: Side,
        names: usize,
        quantities: usize,
    },

    #[error("material name is required (quantity {quantity})")]
    EmptyName { quantity: i64 },

    #[error("quantity of '{name}' must be greater than zero (got {quantity})")]
    NonPositiveQuantity { name: String, quantity: i64 },

    #[error("recipe '{recipe}' has no '->' separating inputs from outputs")]
    MissingArrow { recipe: String },

    #[error("recipe '{recipe}' has {count} '->' tokens, expected exactly one")]
    ExtraArrow { recipe: String, count: usize },

    #[error("material '{token}' must be written as '<quantity> <name>'")]
    MissingSeparator { token: String },

    #[error("quantity '{quantity}' of material '{token}' is not an integer")]
    InvalidQuantity { token: String, quantity: String },

    #[error("probability table must sum to 100 (got {sum})")]
    ProbabilitySum { sum: u32 },

    #[error("leveling rule '{rule}' must be greater than zero")]
    ZeroRule { rule: &'static str },

    #[error("step {step}: {source}")]
    Step {
        step: usize,
        #[source]
        source: Box<ValidationError>,
    },
}

impl ValidationError {
    /// Wraps this error with the 1-based plan step it came from.
    pub fn at_step(self, step: usize) -> Self {
        Self::Step {
            step,
            source: Box::new(self),
        }
    }
}

/// Checks that a name list and its quantity list are non-empty and paired.
pub fn validate_pairing<N, Q>(side: Side, names: &[N], quantities: &[Q]) -> Result<(), ValidationError> {
    if names.is_empty() {
        return Err(ValidationError::EmptyMaterials { side });
    }
    if names.len() != quantities.len() {
        return Err(ValidationError::LengthMismatch {
            side,
            names: names.len(),
            quantities: quantities.len(),
        });
    }
    Ok(())
}
