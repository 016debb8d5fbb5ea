//! Sentinel CLI - Financial risk sentinel
//!
//! Usage:
//!   sentinel ingest --file ledger.csv      List parsed transactions
//!   sentinel analyze --file ledger.csv     Score, runway and risk mode
//!   sentinel sms "Rs.500 debited ..."      Extract a transaction from an SMS
//!   sentinel simulate --file F --sms TEXT  Apply SMS messages, then analyze

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config = cli.config.as_deref();

    match cli.command {
        Commands::Ingest { file, json } => commands::cmd_ingest(&file, json),
        Commands::Analyze {
            file,
            balance,
            score_basis,
            json,
        } => commands::cmd_analyze(config, &file, balance, &score_basis, json),
        Commands::Sms { text, json } => commands::cmd_sms(&text, json),
        Commands::Simulate {
            file,
            messages,
            score_basis,
            json,
        } => commands::cmd_simulate(config, &file, &messages, &score_basis, json),
    }
}
