//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::ops::Op;

#[derive(Parser, Debug)]
#[command(name = "specsheet", version, about = "Inspect and edit specification document tables", long_about = None)]
pub struct Cli {
    /// Editor configuration (JSON). Defaults to config.json in the config directory.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print a document as a text table
    Show {
        /// Document to show. Defaults to the built-in sample.
        #[arg(short, long)]
        doc: Option<PathBuf>,
    },

    /// Write the built-in sample document
    Sample {
        #[arg(short, long)]
        out: PathBuf,
    },

    /// Apply operations to a document and print the result
    Apply {
        #[arg(short, long)]
        doc: PathBuf,

        /// Save the edited document here.
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Operations, e.g. `move-row:0:2` or `set:row_bob:col_status:Active`.
        #[arg(required = true)]
        ops: Vec<Op>,
    },
}
