//! Ledger command implementations (ingest, analyze)

use std::path::Path;

use anyhow::{Context, Result};
use sentinel_core::{
    import::{load_transactions_from_csv, read_ledger_file},
    risk::AnalysisContext,
};
use tracing::warn;

use super::{load_engine, parse_score_basis, print_analysis, truncate};

pub fn cmd_ingest(file: &Path, json: bool) -> Result<()> {
    let ledger = read_ledger_file(file)
        .with_context(|| format!("Failed to load ledger: {}", file.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&ledger)?);
        return Ok(());
    }

    println!("📥 {} transactions in {}", ledger.len(), file.display());
    println!();
    println!(
        "   {:>4}  {:<19}  {:<7}  {:>12}  {:>12}  {:<14}  {}",
        "ID", "Timestamp", "Type", "Amount", "Balance", "Title", "Category"
    );
    println!("   {}", "─".repeat(86));

    for tx in &ledger {
        let timestamp = tx
            .timestamp
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "-".to_string());
        let balance = tx
            .balance
            .map(|b| format!("{:.2}", b))
            .unwrap_or_else(|| "-".to_string());

        println!(
            "   {:>4}  {:<19}  {:<7}  {:>12.2}  {:>12}  {:<14}  {}",
            tx.id,
            timestamp,
            tx.txn_type,
            tx.amount,
            balance,
            truncate(&tx.title, 14),
            tx.category
        );
    }

    Ok(())
}

pub fn cmd_analyze(
    config_path: Option<&Path>,
    file: &Path,
    balance: Option<f64>,
    score_basis: &str,
    json: bool,
) -> Result<()> {
    let engine = load_engine(config_path)?;
    let basis = parse_score_basis(score_basis)?;

    let ledger = load_transactions_from_csv(file);
    if ledger.is_empty() {
        warn!(path = %file.display(), "No transactions loaded, reporting neutral analysis");
    }

    let ctx = match balance {
        Some(b) => AnalysisContext::with_balance_override(b, basis),
        None => AnalysisContext::from_ledger(),
    };
    let analysis = engine.analyze_risk(&ledger, &ctx);

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        print_analysis(&analysis, &ledger, &engine.config().currency_symbol);
    }

    Ok(())
}
