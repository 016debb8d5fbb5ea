//! Shared command utilities
//!
//! This module contains:
//! - `load_engine` - Build the risk engine from the resolved config
//! - `parse_score_basis` - Parse the `--score-basis` flag
//! - `print_analysis` - Human-readable analysis output

use std::path::Path;

use anyhow::{Context, Result};
use sentinel_core::{
    models::AlertKind,
    risk::{spend_by_category, RiskEngine, ScoreBasis},
    RiskAnalysis, TransactionRecord,
};

/// Build the risk engine from `--config`, the override dir, or defaults
pub fn load_engine(config_path: Option<&Path>) -> Result<RiskEngine> {
    RiskEngine::load(config_path).context("Failed to load risk config")
}

pub fn parse_score_basis(s: &str) -> Result<ScoreBasis> {
    s.parse()
        .map_err(|e: String| anyhow::anyhow!("{} (use: ledger, effective)", e))
}

fn alert_icon(kind: AlertKind) -> &'static str {
    match kind {
        AlertKind::Critical => "🔴",
        AlertKind::Warning => "🟡",
        AlertKind::Success => "🟢",
        AlertKind::LowBalance => "💸",
        AlertKind::Info => "ℹ️ ",
        AlertKind::Error => "❌",
    }
}

/// Print an analysis in the terminal layout
pub fn print_analysis(analysis: &RiskAnalysis, ledger: &[TransactionRecord], currency: &str) {
    println!();
    println!("🛡️  Sentinel Analysis");
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Score:        {}/100", analysis.score);
    println!("   Risk mode:    {}", analysis.risk_mode);
    println!(
        "   Balance:      {}{:.2}",
        currency, analysis.current_balance
    );
    println!(
        "   Burn rate:    {}{:.2}/day",
        currency, analysis.daily_burn_rate
    );
    println!("   Runway:       {:.1} days", analysis.runway_days);

    let spend = spend_by_category(ledger);
    if !spend.is_empty() {
        println!();
        println!("   Spending by category:");
        for item in spend {
            println!(
                "     {:<16} {}{:>10.2}  ({} txns)",
                item.category, currency, item.total, item.count
            );
        }
    }

    println!();
    for alert in &analysis.alerts {
        println!("   {} {}", alert_icon(alert.kind), alert.message);
        println!("      → {}", alert.action);
    }
}
