//! `crafter config` -- inspect and initialize `.crafter/config.yaml`.

use anyhow::{Context, Result, bail};
use crafter_config::config::CONFIG_FILE_NAME;
use crafter_config::crafter_dir::{ensure_crafter_dir, find_crafter_dir_or_error};
use crafter_config::{CrafterConfig, save_config};

use crate::cli::{ConfigArgs, ConfigCommands};
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `crafter config` command.
pub fn run(ctx: &RuntimeContext, args: &ConfigArgs) -> Result<()> {
    match &args.command {
        ConfigCommands::Show => {
            let config = ctx.load_config()?;
            if ctx.json {
                output_json(&config);
            } else {
                let yaml =
                    serde_yaml::to_string(&config).context("failed to render configuration")?;
                print!("{yaml}");
            }
        }

        ConfigCommands::Init { force } => {
            let dir = match ctx.config_dir {
                Some(ref dir) => dir.clone(),
                None => {
                    let cwd = std::env::current_dir().context("cannot read working directory")?;
                    ensure_crafter_dir(&cwd)?
                }
            };
            let path = dir.join(CONFIG_FILE_NAME);
            if path.exists() && !force {
                bail!(
                    "{} already exists\nHint: pass --force to overwrite it",
                    path.display()
                );
            }
            save_config(&dir, &CrafterConfig::default())
                .with_context(|| format!("failed to write {}", path.display()))?;

            if ctx.json {
                output_json(&serde_json::json!({ "path": path }));
            } else if !ctx.quiet {
                println!("Wrote {}", path.display());
            }
        }

        ConfigCommands::Path => {
            let dir = match ctx.config_dir {
                Some(ref dir) => dir.clone(),
                None => {
                    let cwd = std::env::current_dir().context("cannot read working directory")?;
                    find_crafter_dir_or_error(&cwd)?
                }
            };
            if ctx.json {
                output_json(&serde_json::json!({ "path": dir }));
            } else {
                println!("{}", dir.display());
            }
        }
    }

    Ok(())
}
