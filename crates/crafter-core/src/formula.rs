//! Formula -- converts input materials into output materials with a
//! stochastic yield that improves with proficiency.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Result, StateError};
use crate::material::{self, Material};
use crate::proficiency::{LevelingRules, MAX_LEVEL, MIN_LEVEL, ProbabilityTable, TOTAL_WEIGHT, Tier};
use crate::validation::{Side, ValidationError, validate_pairing};

/// A recipe with its own proficiency, probability table and random source.
///
/// Cloning a formula copies its *current* state, including the random
/// generator, so a clone replays the same draws as the original would.
#[derive(Debug, Clone, Serialize)]
pub struct Formula {
    inputs: Vec<Material>,
    outputs: Vec<Material>,
    probabilities: ProbabilityTable,
    proficiency: u32,
    successes: u32,
    #[serde(skip)]
    rules: LevelingRules,
    #[serde(skip)]
    rng: StdRng,
}

impl Formula {
    /// Builds a formula from parallel name and quantity lists.
    ///
    /// Both sides must be non-empty, each name list must pair up with its
    /// quantity list, names must be non-blank and quantities positive.
    pub fn new<I, O>(
        in_names: &[I],
        in_quantities: &[i64],
        out_names: &[O],
        out_quantities: &[i64],
    ) -> Result<Self>
    where
        I: AsRef<str>,
        O: AsRef<str>,
    {
        validate_pairing(Side::Input, in_names, in_quantities)?;
        validate_pairing(Side::Output, out_names, out_quantities)?;

        let inputs = build_materials(in_names, in_quantities)?;
        let outputs = build_materials(out_names, out_quantities)?;
        Self::from_materials(inputs, outputs)
    }

    /// Builds a formula from already-validated materials.
    pub fn from_materials(inputs: Vec<Material>, outputs: Vec<Material>) -> Result<Self> {
        if inputs.is_empty() {
            return Err(ValidationError::EmptyMaterials { side: Side::Input }.into());
        }
        if outputs.is_empty() {
            return Err(ValidationError::EmptyMaterials { side: Side::Output }.into());
        }

        let rules = LevelingRules::default();
        Ok(Self {
            inputs,
            outputs,
            probabilities: rules.base_table(),
            proficiency: MIN_LEVEL,
            successes: 0,
            rules,
            rng: StdRng::from_entropy(),
        })
    }

    /// Reseeds the random source for reproducible draws.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Replaces the leveling rules and restarts the formula from them:
    /// lowest level, no successes, the rules' base table.
    pub fn with_rules(mut self, rules: LevelingRules) -> Self {
        self.rules = rules;
        self.probabilities = rules.base_table();
        self.proficiency = MIN_LEVEL;
        self.successes = 0;
        self
    }

    /// Sorts both material lists by name.
    pub fn sorted(mut self) -> Self {
        self.inputs.sort_by(|a, b| a.name().cmp(b.name()));
        self.outputs.sort_by(|a, b| a.name().cmp(b.name()));
        self
    }

    pub fn inputs(&self) -> &[Material] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[Material] {
        &self.outputs
    }

    pub fn proficiency(&self) -> u32 {
        self.proficiency
    }

    pub fn probabilities(&self) -> &ProbabilityTable {
        &self.probabilities
    }

    /// Number of non-failed productions so far.
    pub fn successes(&self) -> u32 {
        self.successes
    }

    pub fn rules(&self) -> &LevelingRules {
        &self.rules
    }

    pub fn is_max_level(&self) -> bool {
        self.proficiency >= MAX_LEVEL
    }

    /// `"CURRENT PROFICIENCY: LEVEL <n>"`.
    pub fn proficiency_label(&self) -> String {
        proficiency_label(self.proficiency)
    }

    /// Runs one production cycle.
    ///
    /// A failed draw yields nothing and does not count toward leveling.
    /// Every `successes_per_level` successes raise proficiency by one level,
    /// saturating at [`MAX_LEVEL`].
    pub fn apply(&mut self) -> Production {
        let roll = self.rng.gen_range(0..TOTAL_WEIGHT);
        let tier = self.probabilities.select(roll);
        debug!(roll, %tier, formula = %self, "production draw");

        if tier.is_fail() {
            return Production {
                proficiency: self.proficiency,
                tier,
                outputs: Vec::new(),
            };
        }

        let outputs = self
            .outputs
            .iter()
            .map(|m| Yield {
                name: m.name().to_owned(),
                quantity: tier.scale(m.quantity()),
            })
            .collect();

        self.successes = self.successes.saturating_add(1);
        if self.successes % self.rules.successes_per_level() == 0 {
            if self.is_max_level() {
                debug!(successes = self.successes, "proficiency already at maximum");
            } else {
                self.level_up();
            }
        }

        Production {
            proficiency: self.proficiency,
            tier,
            outputs,
        }
    }

    /// Raises proficiency by one level by hand.
    ///
    /// Returns the new level, or [`StateError::MaxProficiency`] when the
    /// formula is already at [`MAX_LEVEL`].
    pub fn increase(&mut self) -> Result<u32> {
        if self.is_max_level() {
            return Err(StateError::MaxProficiency {
                level: self.proficiency,
            }
            .into());
        }
        self.level_up();
        Ok(self.proficiency)
    }

    fn level_up(&mut self) {
        self.proficiency += 1;
        let moved = self.probabilities.shift(self.rules.probability_step());
        info!(
            level = self.proficiency,
            moved,
            probabilities = %self.probabilities,
            "proficiency increased"
        );
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {}",
            material::join(&self.inputs),
            material::join(&self.outputs)
        )
    }
}

fn build_materials<N: AsRef<str>>(names: &[N], quantities: &[i64]) -> Result<Vec<Material>> {
    let materials = names
        .iter()
        .zip(quantities)
        .map(|(name, quantity)| Material::new(name, *quantity))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(materials)
}

fn proficiency_label(level: u32) -> String {
    format!("CURRENT PROFICIENCY: LEVEL {level}")
}

/// One produced output. Unlike [`Material`] the quantity may be zero after
/// scaling down.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Yield {
    pub name: String,
    pub quantity: u64,
}

impl fmt::Display for Yield {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.quantity, self.name)
    }
}

/// Result of a single [`Formula::apply`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Production {
    /// Proficiency level after this production.
    pub proficiency: u32,
    /// The tier that was drawn.
    pub tier: Tier,
    /// Scaled outputs; empty when the tier is [`Tier::Fail`].
    pub outputs: Vec<Yield>,
}

impl Production {
    /// The output multiplier that was applied.
    pub fn rate(&self) -> f64 {
        self.tier.rate()
    }

    pub fn is_success(&self) -> bool {
        !self.tier.is_fail()
    }
}

/// Renders the three-line production report.
impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", proficiency_label(self.proficiency))?;
        writeln!(f, "PRODUCE RATE: {} NORMAL RESOURCES", self.rate())?;
        if self.is_success() {
            write!(f, "SIMULATION RESULT: {}", material::join(&self.outputs))
        } else {
            write!(f, "SIMULATION RESULT: N/A")
        }
    }
}
