//! Command-line argument parsing for primefrag

use clap::{ArgAction, Parser, Subcommand};
use primefrag::{Direction, Format, RunSettings};
use std::path::PathBuf;

/// Primefrag - re-encode bytes as prime factorization fragments
#[derive(Parser, Debug)]
#[command(name = "primefrag")]
#[command(author, version, about = "Primefrag - re-encode bytes as prime factorization fragments", long_about = None)]
pub struct Cli {
    /// Input file
    #[arg(short, long, value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Output file (created or truncated)
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Encode the input (default)
    #[arg(short, long, conflicts_with = "decode")]
    pub encode: bool,

    /// Decode the input
    #[arg(short, long)]
    pub decode: bool,

    /// Use the text format instead of binary records
    #[arg(short, long)]
    pub ascii: bool,

    /// Enable verbose output
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Print a JSON run report after a successful run
    #[arg(long)]
    pub stats: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show factorization, fragments and text line for byte values
    Inspect {
        /// Byte values (0-255)
        #[arg(required = true)]
        values: Vec<u8>,
    },
}

impl Cli {
    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        use tracing_subscriber::{fmt, EnvFilter};

        if self.quiet {
            return;
        }

        let level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    /// Resolve flags into run settings
    pub fn settings(&self) -> RunSettings {
        RunSettings {
            input: self.input.clone().unwrap_or_default(),
            output: self.output.clone().unwrap_or_default(),
            direction: match (self.encode, self.decode) {
                (false, true) => Direction::Decode,
                _ => Direction::Encode,
            },
            format: if self.ascii { Format::Ascii } else { Format::Binary },
            verbose: self.verbose > 0,
        }
    }
}
