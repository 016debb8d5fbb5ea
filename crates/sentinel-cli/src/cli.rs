//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Sentinel - Know how long your money lasts
#[derive(Parser)]
#[command(name = "sentinel")]
#[command(about = "Financial risk sentinel for transaction ledgers", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Risk engine config file
    ///
    /// Defaults to ~/.local/share/sentinel/config/risk.toml when present,
    /// otherwise the built-in thresholds.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a ledger CSV and list its transactions
    Ingest {
        /// CSV file (date_time,amount,txn_type,balance_after)
        #[arg(short, long)]
        file: PathBuf,

        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Analyze a ledger CSV
    Analyze {
        /// CSV file (date_time,amount,txn_type,balance_after)
        #[arg(short, long)]
        file: PathBuf,

        /// Live balance to analyze against instead of the ledger's own
        #[arg(short, long, allow_negative_numbers = true)]
        balance: Option<f64>,

        /// Balance the score is computed from: ledger, effective
        #[arg(long, default_value = "ledger")]
        score_basis: String,

        /// Print the analysis as JSON
        #[arg(long)]
        json: bool,
    },

    /// Extract a transaction from an SMS / notification text
    Sms {
        /// Message text
        text: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Load a ledger, apply SMS messages in order, then analyze
    Simulate {
        /// CSV file (date_time,amount,txn_type,balance_after)
        #[arg(short, long)]
        file: PathBuf,

        /// Message text (repeatable)
        #[arg(long = "sms", required = true)]
        messages: Vec<String>,

        /// Balance the score is computed from: ledger, effective
        #[arg(long, default_value = "effective")]
        score_basis: String,

        /// Print the analysis as JSON
        #[arg(long)]
        json: bool,
    },
}
