//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::config::OutputFormat;
use crate::domain::RecordId;

/// Index parent-referencing JSON records and query them by id, parent and ancestry
#[derive(Parser, Debug)]
#[command(name = "treestore")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity: -d info, -dd debug, -ddd trace
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file, layered over the global config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Output format (overrides config)
    #[arg(short, long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print all records in input order
    All {
        /// JSON record file, `-` for stdin (default: config `default_input`)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// Print one record
    Item {
        /// Record id
        #[arg(allow_negative_numbers = true)]
        id: RecordId,
        /// JSON record file, `-` for stdin (default: config `default_input`)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// Print direct children of a record
    Children {
        /// Parent record id
        #[arg(allow_negative_numbers = true)]
        id: RecordId,
        /// JSON record file, `-` for stdin (default: config `default_input`)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// Print the ancestor chain of a record, nearest first
    Parents {
        /// Record id
        #[arg(allow_negative_numbers = true)]
        id: RecordId,
        /// JSON record file, `-` for stdin (default: config `default_input`)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// Print top-level records
    Roots {
        /// JSON record file, `-` for stdin (default: config `default_input`)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// Show the hierarchy as a tree
    Tree {
        /// JSON record file, `-` for stdin (default: config `default_input`)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
