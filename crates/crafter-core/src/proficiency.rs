//! Production tiers, probability tables and leveling rules.
//!
//! A formula draws an integer in `[0, 100)` and walks the cumulative
//! probability table in tier order (fail, partial, full, bonus). Each
//! level-up moves weight out of the fail and partial tiers into the full
//! and bonus tiers, in equal amounts, so the table keeps summing to 100.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::validation::ValidationError;

/// Lowest proficiency level; every new formula starts here.
pub const MIN_LEVEL: u32 = 1;

/// Highest proficiency level.
pub const MAX_LEVEL: u32 = 5;

/// Total weight of a probability table.
pub const TOTAL_WEIGHT: u32 = 100;

/// Outcome tier of a single production draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Fail,
    Partial,
    Full,
    Bonus,
}

impl Tier {
    /// All tiers in draw order.
    pub const ALL: [Tier; 4] = [Tier::Fail, Tier::Partial, Tier::Full, Tier::Bonus];

    /// Output multiplier in thousandths (0, 0.75, 1.0, 1.1).
    pub fn rate_per_mille(&self) -> u64 {
        match self {
            Self::Fail => 0,
            Self::Partial => 750,
            Self::Full => 1000,
            Self::Bonus => 1100,
        }
    }

    /// Output multiplier as a float, for display.
    pub fn rate(&self) -> f64 {
        self.rate_per_mille() as f64 / 1000.0
    }

    /// Scales a quantity by this tier's rate, truncating toward zero.
    pub fn scale(&self, quantity: u64) -> u64 {
        quantity.saturating_mul(self.rate_per_mille()) / 1000
    }

    pub fn is_fail(&self) -> bool {
        *self == Self::Fail
    }

    fn index(&self) -> usize {
        match self {
            Self::Fail => 0,
            Self::Partial => 1,
            Self::Full => 2,
            Self::Bonus => 3,
        }
    }

    /// Returns the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fail => "fail",
            Self::Partial => "partial",
            Self::Full => "full",
            Self::Bonus => "bonus",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-tier weights in draw order, always summing to [`TOTAL_WEIGHT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[u32; 4]", into = "[u32; 4]")]
pub struct ProbabilityTable([u32; 4]);

impl ProbabilityTable {
    /// The table every formula starts from unless configured otherwise.
    pub const DEFAULT: ProbabilityTable = ProbabilityTable([25, 20, 50, 5]);

    /// Creates a table from weights in tier order.
    pub fn new(weights: [u32; 4]) -> Result<Self, ValidationError> {
        let sum = weights.iter().fold(0u32, |acc, w| acc.saturating_add(*w));
        if sum != TOTAL_WEIGHT {
            return Err(ValidationError::ProbabilitySum { sum });
        }
        Ok(Self(weights))
    }

    /// Weight of a single tier.
    pub fn weight(&self, tier: Tier) -> u32 {
        self.0[tier.index()]
    }

    /// Weights in tier order.
    pub fn weights(&self) -> [u32; 4] {
        self.0
    }

    /// Sum of all weights. Always [`TOTAL_WEIGHT`] for a valid table.
    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    /// Maps a roll in `[0, 100)` to the tier whose cumulative bucket holds it.
    pub fn select(&self, roll: u32) -> Tier {
        let mut upper = 0;
        for tier in Tier::ALL {
            upper += self.weight(tier);
            if roll < upper {
                return tier;
            }
        }
        // Unreachable for rolls below TOTAL_WEIGHT.
        Tier::Bonus
    }

    /// Moves up to `step` weight from each of fail and partial into each of
    /// full and bonus. Returns the amount actually moved per tier.
    pub fn shift(&mut self, step: u32) -> u32 {
        let [fail, partial, full, bonus] = &mut self.0;
        let moved = step.min(*fail).min(*partial);
        *fail -= moved;
        *partial -= moved;
        *full += moved;
        *bonus += moved;
        moved
    }
}

impl Default for ProbabilityTable {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<[u32; 4]> for ProbabilityTable {
    type Error = ValidationError;

    fn try_from(weights: [u32; 4]) -> Result<Self, Self::Error> {
        Self::new(weights)
    }
}

impl From<ProbabilityTable> for [u32; 4] {
    fn from(table: ProbabilityTable) -> Self {
        table.0
    }
}

impl fmt::Display for ProbabilityTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [fail, partial, full, bonus] = self.0;
        write!(
            f,
            "fail {fail}%, partial {partial}%, full {full}%, bonus {bonus}%"
        )
    }
}

/// How a formula levels up.
///
/// Always built through [`LevelingRules::new`], including when
/// deserialized, so the success threshold is never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLevelingRules")]
pub struct LevelingRules {
    successes_per_level: u32,
    probability_step: u32,
    base_table: ProbabilityTable,
}

impl LevelingRules {
    /// Validates the rules.
    pub fn new(
        successes_per_level: u32,
        probability_step: u32,
        base_table: ProbabilityTable,
    ) -> Result<Self, ValidationError> {
        if successes_per_level == 0 {
            return Err(ValidationError::ZeroRule {
                rule: "successes-per-level",
            });
        }
        Ok(Self {
            successes_per_level,
            probability_step,
            base_table,
        })
    }

    /// Successful productions needed per automatic level-up. Never zero.
    pub fn successes_per_level(&self) -> u32 {
        self.successes_per_level
    }

    /// Weight moved per tier on each level-up.
    pub fn probability_step(&self) -> u32 {
        self.probability_step
    }

    /// Table a fresh formula starts with.
    pub fn base_table(&self) -> ProbabilityTable {
        self.base_table
    }
}

#[derive(Deserialize)]
struct RawLevelingRules {
    successes_per_level: u32,
    probability_step: u32,
    base_table: ProbabilityTable,
}

impl TryFrom<RawLevelingRules> for LevelingRules {
    type Error = ValidationError;

    fn try_from(raw: RawLevelingRules) -> Result<Self, Self::Error> {
        Self::new(raw.successes_per_level, raw.probability_step, raw.base_table)
    }
}

impl Default for LevelingRules {
    fn default() -> Self {
        Self {
            successes_per_level: 5,
            probability_step: 5,
            base_table: ProbabilityTable::DEFAULT,
        }
    }
}
