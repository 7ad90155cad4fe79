//! `crafter` -- crafting formula and plan simulator CLI.
//!
//! Parses CLI arguments with clap, resolves the runtime context, and
//! dispatches to command handlers.

mod cli;
mod commands;
mod context;
mod output;

use clap::Parser;

use cli::{Cli, Commands};
use context::RuntimeContext;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Build runtime context from global args
    let ctx = RuntimeContext::from_global_args(&cli.global);

    // Set up logging based on verbosity
    if ctx.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("crafter=debug,crafter_core=debug,crafter_config=debug")
            .with_writer(std::io::stderr)
            .init();
    }

    // Dispatch to command handler
    let result = match cli.command {
        Some(Commands::Show(args)) => commands::show::run(&ctx, &args),
        Some(Commands::Apply(args)) => commands::apply::run(&ctx, &args),
        Some(Commands::Run(args)) => commands::run::run(&ctx, &args),
        Some(Commands::Demo) => commands::demo::run(&ctx),
        Some(Commands::Config(args)) => commands::config_cmd::run(&ctx, &args),
        Some(Commands::Completion(args)) => commands::completion::run(&ctx, &args),
        Some(Commands::Version) => commands::version::run(&ctx),
        None => {
            // No subcommand -- print help
            use clap::CommandFactory;
            Cli::command().print_help().ok();
            println!();
            Ok(())
        }
    };

    // Handle errors: print message and exit with code 1
    if let Err(e) = result {
        // JSON mode reports the error kind alongside the message
        if cli.global.json {
            let err_json = serde_json::json!({
                "error": format!("{:#}", e),
                "kind": output::error_kind(&e),
            });
            if let Ok(s) = serde_json::to_string_pretty(&err_json) {
                eprintln!("{}", s);
            }
        } else {
            eprintln!("Error: {:#}", e);
        }
        std::process::exit(1);
    }
}
