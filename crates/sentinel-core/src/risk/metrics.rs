//! Ledger metrics: balance reconstruction, burn rate, category spend
//!
//! Non-finite amounts and balances (the CSV sentinel for unparseable fields)
//! are skipped rather than allowed to poison a sum.

use std::collections::HashMap;

use crate::models::{CategorySpend, TransactionRecord};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Amount usable in a sum, or `None` for zero / non-finite values
fn usable_amount(record: &TransactionRecord) -> Option<f64> {
    Some(record.amount).filter(|a| a.is_finite() && *a > 0.0)
}

/// Most recent known balance
///
/// Takes the last finite `balance` in ledger order (the ledger order is
/// assumed to reflect recency). Without one, reconstructs
/// `max(credits - debits, 0)`, which cannot represent an overdraft.
pub fn get_latest_balance(ledger: &[TransactionRecord]) -> f64 {
    if let Some(balance) = ledger
        .iter()
        .rev()
        .filter_map(|t| t.balance)
        .find(|b| b.is_finite())
    {
        return balance;
    }

    let credits: f64 = ledger
        .iter()
        .filter(|t| t.is_credit())
        .filter_map(usable_amount)
        .sum();
    let debits: f64 = ledger
        .iter()
        .filter(|t| t.is_debit())
        .filter_map(usable_amount)
        .sum();

    (credits - debits).max(0.0)
}

/// Number of calendar days covered by the ledger, first day included
///
/// `None` when no record has a parseable timestamp.
pub fn day_span(ledger: &[TransactionRecord]) -> Option<f64> {
    let min = ledger.iter().filter_map(|t| t.timestamp).min()?;
    let max = ledger.iter().filter_map(|t| t.timestamp).max()?;

    let seconds = (max - min).num_milliseconds() as f64 / 1000.0;
    Some((seconds / SECONDS_PER_DAY).ceil() + 1.0)
}

/// Average daily debit spend
///
/// Divides total debits by the ledger's day span; falls back to the number
/// of debits when no timestamps parse. Zero when there are no debits.
pub fn calculate_burn_rate(ledger: &[TransactionRecord]) -> f64 {
    let debits: Vec<f64> = ledger
        .iter()
        .filter(|t| t.is_debit())
        .filter_map(usable_amount)
        .collect();

    if debits.is_empty() {
        return 0.0;
    }

    let total_debit: f64 = debits.iter().sum();

    match day_span(ledger) {
        Some(days) => total_debit / days.max(1.0),
        None => total_debit / debits.len().max(1) as f64,
    }
}

/// Debit totals per category, largest first
pub fn spend_by_category(ledger: &[TransactionRecord]) -> Vec<CategorySpend> {
    let mut totals: HashMap<&str, (f64, usize)> = HashMap::new();

    for record in ledger.iter().filter(|t| t.is_debit()) {
        let Some(amount) = usable_amount(record) else {
            continue;
        };
        let entry = totals.entry(record.category.as_str()).or_insert((0.0, 0));
        entry.0 += amount;
        entry.1 += 1;
    }

    let mut spend: Vec<CategorySpend> = totals
        .into_iter()
        .map(|(category, (total, count))| CategorySpend {
            category: category.to_string(),
            total,
            count,
        })
        .collect();

    spend.sort_by(|a, b| {
        b.total
            .total_cmp(&a.total)
            .then_with(|| a.category.cmp(&b.category))
    });
    spend
}
