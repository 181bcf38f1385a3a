use std::path::PathBuf;

use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::{Commands, FinalizeArgs, PlanArgs, RunArgs};

/// Top-level CLI parser for the `dochub` binary.
#[derive(Debug, Parser)]
#[command(
    name = "dochub",
    version,
    about = "Assemble generated API docs into one unified reference tree"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "table")]
    pub format: OutputFormat,

    /// Quiet mode (errors only, no progress)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Extra TOML config file, layered above the project config
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Run tasks and file copies one at a time
    #[arg(long, global = true)]
    pub serial: bool,
}

impl Cli {
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            config: self.config.clone(),
            serial: self.serial,
        }
    }
}
