//! SMS command implementations (sms, simulate)

use std::path::Path;

use anyhow::{bail, Result};
use sentinel_core::{
    account::{safe_daily_spend, AccountState},
    sms::parse_transaction_sms,
};

use super::{load_engine, parse_score_basis, print_analysis};

pub fn cmd_sms(text: &str, json: bool) -> Result<()> {
    let Some(sms) = parse_transaction_sms(text) else {
        if json {
            println!("null");
        } else {
            println!("No valid transaction found in SMS");
        }
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&sms)?);
        return Ok(());
    }

    let record = &sms.record;
    println!("📩 Transaction found");
    println!("   Amount:   {:.2}", record.amount);
    println!("   Type:     {}", record.txn_type);
    println!(
        "   Merchant: {}",
        sms.merchant.as_deref().unwrap_or("(none)")
    );
    println!("   Category: {}", record.category);
    match record.balance {
        Some(balance) => println!("   Balance:  {:.2}", balance),
        None => println!("   Balance:  (not reported)"),
    }

    Ok(())
}

pub fn cmd_simulate(
    config_path: Option<&Path>,
    file: &Path,
    messages: &[String],
    score_basis: &str,
    json: bool,
) -> Result<()> {
    let engine = load_engine(config_path)?;
    let basis = parse_score_basis(score_basis)?;

    let mut state = AccountState::new(0.0);
    if !state.load_csv(file) {
        bail!("Dataset not found or empty: {}", file.display());
    }

    for text in messages {
        match parse_transaction_sms(text) {
            Some(sms) => {
                let stored = state.apply_sms(&sms);
                if !json {
                    println!(
                        "   + {} {:.2} ({}) → balance {:.2}",
                        stored.txn_type,
                        stored.amount,
                        stored.title,
                        state.balance()
                    );
                }
            }
            None => {
                if !json {
                    println!("   · skipped: no transaction in \"{}\"", text);
                }
            }
        }
    }

    let analysis = state.analyze(&engine, basis);
    let safe_spend = safe_daily_spend(analysis.current_balance, analysis.runway_days);

    if json {
        let output = serde_json::json!({
            "dataset": state.dataset(),
            "analysis": analysis,
            "safe_daily_spend": safe_spend,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let currency = &engine.config().currency_symbol;
    print_analysis(&analysis, state.ledger(), currency);
    println!();
    println!("   Safe daily spend: {}{:.0}", currency, safe_spend);

    Ok(())
}
