//! # CLI Argument Definitions

use clap::{ArgAction, Parser, Subcommand};
use plugkit_scaffold::{ModuleName, ScaffoldError};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "plugkit")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Scaffold and retire plugin modules of a multi-plugin host project")]
pub struct Cli {
    /// Root directory of the host project
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Config file to use instead of `<root>/plugkit.toml` (must exist)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// More log output on stderr (repeat for more)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Also write logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Write the log file as JSON lines
    #[arg(long, global = true, requires = "log_file")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a plugin module and register it with the host
    #[command(alias = "c")]
    Create {
        /// Module name, used verbatim in paths, identifiers and registry lines
        #[arg(value_parser = parse_module_name)]
        name: ModuleName,
    },
    /// Unregister a plugin module and delete its directory
    #[command(alias = "d")]
    Delete {
        #[arg(value_parser = parse_module_name)]
        name: ModuleName,
    },
    /// List generated modules and where they are registered
    #[command(alias = "ls")]
    List {},
}

fn parse_module_name(value: &str) -> Result<ModuleName, ScaffoldError> {
    ModuleName::new(value)
}
