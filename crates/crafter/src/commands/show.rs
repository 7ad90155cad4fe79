//! `crafter show` -- parse recipes and print them as a numbered plan.

use anyhow::Result;
use crafter_core::Plan;
use tracing::debug;

use crate::cli::ShowArgs;
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `crafter show` command.
pub fn run(ctx: &RuntimeContext, args: &ShowArgs) -> Result<()> {
    let settings = ctx.formula_settings()?;

    let mut plan = Plan::new();
    for (i, recipe) in args.recipes.iter().enumerate() {
        plan.add(&settings.parse(recipe, i)?)?;
    }
    debug!(steps = plan.len(), "built plan");

    if ctx.json {
        output_json(&plan);
    } else {
        print!("{plan}");
    }
    Ok(())
}
