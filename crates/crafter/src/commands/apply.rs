//! `crafter apply` -- run one formula several times and report each yield.

use anyhow::Result;

use crate::cli::ApplyArgs;
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `crafter apply` command.
///
/// Text mode prints each production as it is drawn; only `--json` keeps
/// them all, to emit a single document.
pub fn run(ctx: &RuntimeContext, args: &ApplyArgs) -> Result<()> {
    let settings = ctx.formula_settings()?;
    let mut formula = settings.parse(&args.recipe, 0)?;

    if ctx.json {
        let productions: Vec<_> = (0..args.times).map(|_| formula.apply()).collect();
        output_json(&serde_json::json!({
            "formula": formula.to_string(),
            "proficiency": formula.proficiency(),
            "probabilities": formula.probabilities(),
            "productions": productions,
        }));
        return Ok(());
    }

    if !ctx.quiet {
        println!("Formula: {formula}");
        println!();
    }
    for i in 0..args.times {
        if i > 0 {
            println!();
        }
        println!("{}", formula.apply());
    }
    if !ctx.quiet {
        println!();
        println!("Probabilities: {}", formula.probabilities());
    }
    Ok(())
}
