//! # CLI Argument Definitions
//!
//! Command-line structure of the `dbm` inspection tool, defined with `clap`.

use clap::{ArgAction, Parser, Subcommand};
use dbm::Vocabulary;
use std::path::PathBuf;

/// The main CLI structure parsing command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "dbm")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Inspect the dbm client contract: enum vocabularies and store bindings")]
pub struct Cli {
    /// Configuration file; `DBM__*` environment variables override it
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Enumeration of available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Decode a wire value (name, ordinal, or JSON scalar) into ordinal and canonical name
    Decode {
        #[arg(value_parser = parse_vocabulary)]
        vocabulary: Vocabulary,
        /// e.g. `MYSQL`, `2`, `null`
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Encode an ordinal to its canonical name
    Encode {
        #[arg(value_parser = parse_vocabulary)]
        vocabulary: Vocabulary,
        #[arg(allow_negative_numbers = true)]
        ordinal: i32,
    },
    /// Print the ordinal/name table of a vocabulary
    Vocab {
        #[arg(value_parser = parse_vocabulary)]
        vocabulary: Vocabulary,
    },
    /// Initialize every store slice and list the bindings they export
    Exports {},
}

fn parse_vocabulary(key: &str) -> Result<Vocabulary, String> {
    Vocabulary::from_key(key).ok_or_else(|| {
        let known: Vec<_> = Vocabulary::ALL.iter().map(|v| v.key()).collect();
        format!("unknown vocabulary `{key}` (expected one of: {})", known.join(", "))
    })
}
