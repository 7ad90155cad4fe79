//! Clap CLI definitions for the `crafter` command.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// crafter -- Crafting formula and plan simulator.
///
/// Formulas turn input materials into output materials with a yield that
/// improves as the formula levels up. Plans run formulas in order.
#[derive(Parser, Debug)]
#[command(
    name = "crafter",
    about = "Crafting formula and plan simulator",
    long_about = "Formulas turn input materials into output materials with a yield that improves as the formula levels up. Plans run formulas in order.",
    version,
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Global flags available to all subcommands.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Output in JSON format.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose/debug output.
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output (errors only).
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Seed for reproducible production draws (overrides the config file).
    #[arg(long, global = true, env = "CRAFTER_SEED")]
    pub seed: Option<u64>,

    /// Configuration directory (default: auto-discover .crafter/).
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,
}

/// All available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse recipes and print them as a numbered plan.
    Show(ShowArgs),

    /// Apply one formula repeatedly and print each production.
    Apply(ApplyArgs),

    /// Run every step of a plan file in order.
    Run(RunArgs),

    /// Walk through plain, executable and empty plans.
    Demo,

    /// Inspect or write the configuration file.
    Config(ConfigArgs),

    /// Generate shell completions.
    Completion(CompletionArgs),

    /// Print version information.
    Version,
}

// ---------------------------------------------------------------------------
// Show / Apply / Run
// ---------------------------------------------------------------------------

/// Arguments for `crafter show`.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Recipes in `"<qty> <name>, ... -> <qty> <name>, ..."` form.
    #[arg(required = true)]
    pub recipes: Vec<String>,
}

/// Arguments for `crafter apply`.
#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Recipe in `"<qty> <name>, ... -> <qty> <name>, ..."` form.
    pub recipe: String,

    /// Number of productions to run.
    #[arg(short = 'n', long, default_value_t = 1)]
    pub times: u32,
}

/// Arguments for `crafter run`.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Plan definition file (`.toml` or `.json`).
    pub plan_file: PathBuf,
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Arguments for `crafter config`.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration.
    Show,
    /// Write a default config.yaml into .crafter/ in the current directory.
    Init {
        /// Overwrite an existing config.yaml.
        #[arg(long)]
        force: bool,
    },
    /// Print the directory configuration is read from.
    Path,
}

// ---------------------------------------------------------------------------
// Completion
// ---------------------------------------------------------------------------

/// Arguments for `crafter completion`.
#[derive(Args, Debug)]
pub struct CompletionArgs {
    #[command(subcommand)]
    pub command: CompletionCommands,
}

/// Completion subcommands.
#[derive(Subcommand, Debug)]
pub enum CompletionCommands {
    /// Generate Bash completions.
    Bash,
    /// Generate Zsh completions.
    Zsh,
    /// Generate Fish completions.
    Fish,
    /// Generate PowerShell completions.
    Powershell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_apply_with_times() {
        let cli = Cli::parse_from(["crafter", "--seed", "7", "apply", "1 a -> 2 b", "-n", "3"]);
        assert_eq!(cli.global.seed, Some(7));
        match cli.command {
            Some(Commands::Apply(args)) => {
                assert_eq!(args.recipe, "1 a -> 2 b");
                assert_eq!(args.times, 3);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
