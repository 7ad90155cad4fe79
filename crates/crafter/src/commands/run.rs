//! `crafter run` -- execute a plan definition file step by step.

use anyhow::{Context, Result};
use crafter_core::ExecutablePlan;
use crafter_core::plan_file::load_plan_file;

use crate::cli::RunArgs;
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `crafter run` command.
pub fn run(ctx: &RuntimeContext, args: &RunArgs) -> Result<()> {
    let settings = ctx.formula_settings()?;

    let file = load_plan_file(&args.plan_file)
        .with_context(|| format!("failed to load plan file {}", args.plan_file.display()))?;
    let formulas: Vec<_> = file
        .formulas()
        .with_context(|| format!("invalid plan file {}", args.plan_file.display()))?
        .into_iter()
        .enumerate()
        .map(|(i, formula)| settings.prepare(formula, i))
        .collect();

    let mut plan = ExecutablePlan::new(&formulas);

    if !ctx.json && !ctx.quiet {
        if !file.name.is_empty() {
            println!("Plan: {}", file.name);
        }
        if !file.description.is_empty() {
            println!("{}", file.description);
        }
        print!("{plan}");
    }

    let mut steps = Vec::with_capacity(plan.len());
    while !plan.is_finished() {
        let step = plan.query()?;
        let production = plan.apply()?;
        if ctx.json {
            steps.push(serde_json::json!({
                "step": step,
                "production": production,
            }));
        } else {
            println!();
            println!("{step}");
            println!("{production}");
        }
    }

    if ctx.json {
        output_json(&serde_json::json!({
            "name": file.name,
            "description": file.description,
            "steps": steps,
        }));
    }
    Ok(())
}
