//! Command-line arguments.

use crate::logging::LogFormat;
use clap::{ArgAction, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "mosaic-catalog",
    version,
    about = "List and render mosaic component stories"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// More log output (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format.
    #[arg(long = "log-format", value_enum, default_value = "pretty", global = true)]
    pub log_format: LogFormat,

    /// Disable ANSI colors in log output.
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every story, marking each component's default.
    List {
        /// Print the index as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Render a story's markup to stdout.
    Render {
        /// Component name, e.g. `button`.
        component: String,
        /// Story name; the component's default when omitted.
        #[arg(long, short)]
        story: Option<String>,
    },
}
