//! Command handlers, one module per subcommand.

pub mod apply;
pub mod completion;
pub mod config_cmd;
pub mod demo;
pub mod run;
pub mod show;
pub mod version;
