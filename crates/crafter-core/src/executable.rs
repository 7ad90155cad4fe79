//! [`ExecutablePlan`] -- a plan that runs its steps in order and locks the
//! ones that have already run.

use std::fmt;

use serde::Serialize;
use tracing::info;

use crate::error::{Result, StateError};
use crate::formula::{Formula, Production};
use crate::plan::Plan;

/// A [`Plan`] plus a cursor counting the steps already applied.
///
/// Steps before the cursor are locked: they can be neither replaced nor
/// removed. The cursor only moves forward, one step per [`apply`].
///
/// [`apply`]: ExecutablePlan::apply
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExecutablePlan {
    plan: Plan,
    cursor: usize,
}

impl ExecutablePlan {
    /// Creates an executable plan holding a copy of each formula.
    pub fn new(formulas: &[Formula]) -> Self {
        Self::from(Plan::from_formulas(formulas))
    }

    /// Number of steps already applied; also the index of the next one.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns `true` once every step has been applied.
    pub fn is_finished(&self) -> bool {
        self.cursor >= self.plan.len()
    }

    /// The next step to apply, if any.
    pub fn pending(&self) -> Option<&Formula> {
        self.plan.get(self.cursor)
    }

    /// Read-only view of the underlying plan.
    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    pub fn len(&self) -> usize {
        self.plan.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plan.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Formula> {
        self.plan.get(index)
    }

    pub fn steps(&self) -> &[Formula] {
        self.plan.steps()
    }

    /// Applies the pending step and advances the cursor.
    pub fn apply(&mut self) -> Result<Production> {
        let len = self.plan.len();
        let index = self.cursor;
        let formula = self
            .plan
            .get_mut(index)
            .ok_or(StateError::NoMoreSteps { len })?;
        let production = formula.apply();
        self.cursor += 1;
        info!(step = index + 1, of = len, tier = %production.tier, "applied step");
        Ok(production)
    }

    /// Describes the pending step as `"(<n>). <formula>"`.
    ///
    /// Fails with [`StateError::NoPendingStep`] once every step has run.
    pub fn query(&self) -> Result<String> {
        let formula = self.pending().ok_or(StateError::NoPendingStep {
            len: self.plan.len(),
        })?;
        Ok(format!("({}). {}", self.cursor + 1, formula))
    }

    /// Appends a copy of `formula`. New steps are never locked.
    pub fn add<'a>(&mut self, formula: impl Into<Option<&'a Formula>>) -> Result<()> {
        self.plan.add(formula)
    }

    /// Replaces a step that has not run yet.
    pub fn replace<'a>(
        &mut self,
        index: usize,
        formula: impl Into<Option<&'a Formula>>,
    ) -> Result<()> {
        self.ensure_unlocked(index)?;
        self.plan.replace(index, formula)
    }

    /// Removes the last step, provided it has not run yet.
    pub fn remove(&mut self) -> Result<()> {
        if let Some(last) = self.plan.len().checked_sub(1) {
            self.ensure_unlocked(last)?;
        }
        self.plan.remove()
    }

    fn ensure_unlocked(&self, index: usize) -> Result<()> {
        if index < self.cursor {
            return Err(StateError::StepLocked {
                index,
                cursor: self.cursor,
            }
            .into());
        }
        Ok(())
    }
}

impl From<Plan> for ExecutablePlan {
    fn from(plan: Plan) -> Self {
        Self { plan, cursor: 0 }
    }
}

impl fmt::Display for ExecutablePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.plan, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CraftError, ErrorKind};
    use crate::proficiency::{LevelingRules, ProbabilityTable};
    use pretty_assertions::assert_eq;

    fn formula(recipe: &str) -> Formula {
        recipe.parse().unwrap()
    }

    fn two_steps() -> ExecutablePlan {
        ExecutablePlan::new(&[
            formula("2 butter -> 36 cookies"),
            formula("1 sugar -> 50 candy"),
        ])
    }

    fn five_steps() -> ExecutablePlan {
        ExecutablePlan::new(&[
            formula("10 flour, 2 yeast, 1 sugar -> 12 bread"),
            formula("5 chocolate -> 24 cake"),
            formula("2 butter, 10 milk -> 36 cookies"),
            formula("1 sugar -> 50 candy"),
            formula("2 apple, 10 sugar, 30 butter, 5 water -> 10 apple pie"),
        ])
    }

    fn locked(index: usize, cursor: usize) -> CraftError {
        CraftError::State(StateError::StepLocked { index, cursor })
    }

    #[test]
    fn query_tracks_cursor() {
        let mut plan = two_steps();
        assert_eq!(plan.query().unwrap(), "(1). 2 butter -> 36 cookies");
        plan.apply().unwrap();
        assert_eq!(plan.query().unwrap(), "(2). 1 sugar -> 50 candy");
        assert_eq!(plan.cursor(), 1);
    }

    #[test]
    fn query_after_last_step_fails() {
        let mut plan = two_steps();
        plan.apply().unwrap();
        plan.apply().unwrap();
        assert!(plan.is_finished());
        assert_eq!(
            plan.query().unwrap_err(),
            CraftError::State(StateError::NoPendingStep { len: 2 })
        );
    }

    #[test]
    fn apply_past_end_fails_without_moving_cursor() {
        let mut plan = two_steps();
        plan.apply().unwrap();
        plan.apply().unwrap();
        let err = plan.apply().unwrap_err();
        assert_eq!(err, CraftError::State(StateError::NoMoreSteps { len: 2 }));
        assert_eq!(plan.cursor(), 2);
    }

    #[test]
    fn apply_on_empty_plan_fails() {
        let mut plan = ExecutablePlan::default();
        assert!(plan.apply().unwrap_err().is_state());
        assert!(plan.query().is_err());
    }

    #[test]
    fn apply_returns_step_report() {
        let always_full = LevelingRules::new(5, 5, ProbabilityTable::new([0, 0, 100, 0]).unwrap())
            .unwrap();
        let cookies = formula("2 butter -> 36 cookies").with_rules(always_full);
        let mut plan = ExecutablePlan::new(&[cookies]);
        let report = plan.apply().unwrap();
        assert_eq!(
            report.to_string(),
            "CURRENT PROFICIENCY: LEVEL 1\nPRODUCE RATE: 1 NORMAL RESOURCES\nSIMULATION RESULT: 36 cookies"
        );
        assert_eq!(plan.get(0).unwrap().successes(), 1);
    }

    #[test]
    fn replace_pending_step_succeeds() {
        let mut plan = two_steps();
        plan.replace(1, &formula("1 chocolate -> 20 cake")).unwrap();
        assert_eq!(plan.get(1).unwrap().to_string(), "1 chocolate -> 20 cake");
    }

    #[test]
    fn replace_completed_step_fails() {
        let mut plan = two_steps();
        plan.apply().unwrap();
        let err = plan.replace(0, &formula("1 sugar -> 50 candy")).unwrap_err();
        assert_eq!(err, locked(0, 1));
        assert_eq!(err.kind(), ErrorKind::State);
        assert_eq!(plan.get(0).unwrap().to_string(), "2 butter -> 36 cookies");
    }

    #[test]
    fn replace_still_checks_range_and_argument() {
        let mut plan = two_steps();
        assert_eq!(
            plan.replace(5, &formula("1 a -> 1 b")).unwrap_err(),
            CraftError::OutOfRange { index: 5, len: 2 }
        );
        let missing: Option<&Formula> = None;
        assert_eq!(
            plan.replace(1, missing).unwrap_err().kind(),
            ErrorKind::NullArgument
        );
    }

    #[test]
    fn remove_completed_last_step_fails() {
        let mut plan = two_steps();
        plan.apply().unwrap();
        plan.remove().unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.remove().unwrap_err(), locked(0, 1));
        assert_eq!(plan.len(), 1);
    }

    #[test]
    fn remove_on_empty_plan_reports_nothing_to_remove() {
        let mut plan = ExecutablePlan::default();
        assert_eq!(
            plan.remove().unwrap_err(),
            CraftError::State(StateError::NothingToRemove)
        );
    }

    #[test]
    fn add_after_finishing_unlocks_new_step() {
        let mut plan = two_steps();
        plan.apply().unwrap();
        plan.apply().unwrap();
        plan.add(&formula("2 milk -> 6 pancakes")).unwrap();
        assert_eq!(plan.query().unwrap(), "(3). 2 milk -> 6 pancakes");
        plan.replace(2, &formula("3 milk -> 9 pancakes")).unwrap();
        plan.remove().unwrap();
        assert!(plan.is_finished());
    }

    #[test]
    fn locking_follows_cursor() {
        let n = 5;
        for k in 0..=n {
            let mut plan = five_steps();
            for _ in 0..k {
                plan.apply().unwrap();
            }
            for index in 0..n {
                let result = plan.replace(index, &formula("1 a -> 1 b"));
                if index < k {
                    assert_eq!(result.unwrap_err(), locked(index, k));
                } else {
                    assert!(result.is_ok(), "index {index} should be editable after {k} applies");
                }
            }
            let removal = plan.remove();
            if k == n {
                assert_eq!(removal.unwrap_err(), locked(n - 1, k));
            } else {
                assert!(removal.is_ok());
            }
        }
    }

    #[test]
    fn clone_keeps_cursor_independently() {
        let mut original = five_steps();
        original.apply().unwrap();
        let mut copy = original.clone();
        assert_eq!(copy.cursor(), 1);

        original.apply().unwrap();
        original.apply().unwrap();
        assert_eq!(copy.cursor(), 1);
        assert_eq!(copy.query().unwrap(), "(2). 5 chocolate -> 24 cake");

        copy.replace(1, &formula("1 a -> 1 b")).unwrap();
        assert_eq!(copy.replace(0, &formula("1 a -> 1 b")).unwrap_err(), locked(0, 1));
        assert_eq!(original.get(1).unwrap().to_string(), "5 chocolate -> 24 cake");
    }

    #[test]
    fn renders_like_plan() {
        let plan = two_steps();
        assert_eq!(
            plan.to_string(),
            "(1) 2 butter -> 36 cookies\n(2) 1 sugar -> 50 candy\n"
        );
        assert_eq!(plan.to_string(), plan.plan().to_string());
    }

    #[test]
    fn from_plan_starts_at_zero() {
        let plan = Plan::from_formulas(&[formula("1 sugar -> 50 candy")]);
        let exec = ExecutablePlan::from(plan);
        assert_eq!(exec.cursor(), 0);
        assert_eq!(exec.pending().unwrap().to_string(), "1 sugar -> 50 candy");
    }
}
