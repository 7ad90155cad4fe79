//! Core types for the crafter system.
//!
//! A [`Formula`] converts input materials into output materials with a
//! random yield that improves as the formula levels up. A [`Plan`] owns an
//! ordered list of formula copies; an [`ExecutablePlan`] runs that list one
//! step at a time and locks the steps it has already run.

pub mod error;
pub mod executable;
pub mod formula;
pub mod material;
pub mod parser;
pub mod plan;
pub mod plan_file;
pub mod proficiency;
pub mod validation;

pub use error::{CraftError, ErrorKind, Result, StateError};
pub use executable::ExecutablePlan;
pub use formula::{Formula, Production, Yield};
pub use material::Material;
pub use plan::Plan;
pub use proficiency::{LevelingRules, ProbabilityTable, Tier};
pub use validation::{Side, ValidationError};
