//! Primefrag - CLI tool for encoding files as prime factorization fragments

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use primefrag::{inspect_json, run, PrimeTable};
use std::process;

use cli::{Cli, Command};

fn main() {
    // Parse command-line arguments
    let cli = Cli::parse();

    // Initialize logging
    cli.init_logging();

    if let Err(e) = execute(&cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn execute(cli: &Cli) -> Result<()> {
    match &cli.command {
        Some(Command::Inspect { values }) => inspect(values),
        None => transform(cli),
    }
}

/// Encode or decode a file according to the flags
fn transform(cli: &Cli) -> Result<()> {
    let settings = cli.settings();

    let report = run(&settings).with_context(|| {
        format!(
            "Failed to {} {} ({})",
            settings.direction,
            settings.input.display(),
            settings.format
        )
    })?;

    if cli.stats {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{json}");
    }

    Ok(())
}

/// Print inspection reports for individual byte values
fn inspect(values: &[u8]) -> Result<()> {
    let json = inspect_json(values, PrimeTable::standard()).context("Failed to inspect bytes")?;
    println!("{json}");
    Ok(())
}
