use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "appsweep", version, about = "Find installed apps and the files they leave behind")]
pub struct Cli {
    /// Log at debug level.
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List installed applications.
    List {
        /// Emit JSON instead of a table.
        #[arg(long)]
        json: bool,

        /// Extra application directory to scan (repeatable).
        #[arg(long = "root", value_name = "DIR")]
        roots: Vec<PathBuf>,
    },
    /// Locate residual files for an application by name.
    Residue {
        /// Application name, as shown by `list`.
        name: String,

        /// Emit JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
}
