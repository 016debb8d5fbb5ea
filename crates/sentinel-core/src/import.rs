//! CSV ledger ingestion
//!
//! Layout: `date_time,amount,txn_type,balance_after`. The first non-blank
//! line is a header and is discarded without inspection. The dump carries no
//! merchant column, so titles and categories are defaulted from the
//! transaction type.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::models::{RecordSource, TransactionRecord, TransactionType};

const CREDIT_TITLE: &str = "Deposit";
const CREDIT_CATEGORY: &str = "Income";
const DEBIT_TITLE: &str = "Expenditure";
const DEBIT_CATEGORY: &str = "Reserves";

/// Load a ledger from a CSV file
///
/// Never fails: a missing file, read error or empty dump all produce an
/// empty ledger and a logged diagnostic.
pub fn load_transactions_from_csv(path: impl AsRef<Path>) -> Vec<TransactionRecord> {
    let path = path.as_ref();
    match read_ledger_file(path) {
        Ok(transactions) => {
            if transactions.is_empty() {
                warn!(path = %path.display(), "CSV contained no transactions");
            }
            transactions
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Error loading CSV");
            Vec::new()
        }
    }
}

/// Read and parse a ledger file, surfacing the failure reason
pub fn read_ledger_file(path: &Path) -> Result<Vec<TransactionRecord>> {
    if !path.exists() {
        return Err(Error::NotFound(format!(
            "CSV file not found: {}",
            path.display()
        )));
    }

    let file = File::open(path)?;
    parse_csv(file)
}

/// Parse ledger CSV data into records
///
/// Ids are 1-based positions within this load.
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<TransactionRecord>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let ingested_at = Local::now().naive_local();
    let mut seen_header = false;
    let mut transactions = Vec::new();

    for result in rdr.records() {
        let record = result?;

        if record.iter().all(str::is_empty) {
            continue;
        }
        if !seen_header {
            seen_header = true;
            continue;
        }

        let id = transactions.len() + 1;
        transactions.push(parse_row(&record, id, ingested_at));
    }

    debug!("Parsed {} ledger transactions", transactions.len());
    Ok(transactions)
}

fn parse_row(record: &StringRecord, id: usize, ingested_at: NaiveDateTime) -> TransactionRecord {
    let timestamp = match field(record, 0) {
        Some(raw) => {
            let parsed = parse_timestamp(raw);
            if parsed.is_none() {
                debug!(id, raw, "Unparseable timestamp");
            }
            parsed
        }
        None => Some(ingested_at),
    };

    let amount = field(record, 1).map(parse_number).unwrap_or(f64::NAN);

    // Explicit type wins; otherwise the sign of the amount decides
    let txn_type = field(record, 2)
        .and_then(|s| s.parse::<TransactionType>().ok())
        .unwrap_or(if amount < 0.0 {
            TransactionType::Debit
        } else {
            TransactionType::Credit
        });

    let balance = field(record, 3).map(parse_number);

    let (title, category) = match txn_type {
        TransactionType::Credit => (CREDIT_TITLE, CREDIT_CATEGORY),
        TransactionType::Debit | TransactionType::Unknown => (DEBIT_TITLE, DEBIT_CATEGORY),
    };

    TransactionRecord::new(
        id,
        timestamp,
        title,
        amount,
        txn_type,
        category,
        balance,
        RecordSource::Csv,
    )
}

/// Non-empty field at `index`
fn field(record: &StringRecord, index: usize) -> Option<&str> {
    record.get(index).filter(|s| !s.is_empty())
}

/// Parse a timestamp in the formats ledger dumps commonly use
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }

    let datetime_formats = [
        "%Y-%m-%dT%H:%M:%S%.f", // 2024-01-15T09:30:00.000
        "%Y-%m-%dT%H:%M:%S",    // 2024-01-15T09:30:00
        "%Y-%m-%d %H:%M:%S",    // 2024-01-15 09:30:00
        "%Y-%m-%d %H:%M",       // 2024-01-15 09:30
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    let date_formats = [
        "%Y-%m-%d", // 2024-01-15
        "%d-%m-%Y", // 15-01-2024
        "%d/%m/%Y", // 15/01/2024
        "%m/%d/%Y", // 01/15/2024
    ];
    for fmt in date_formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    None
}

/// Parse a numeric field; NaN marks an unparseable value
fn parse_number(s: &str) -> f64 {
    let cleaned: String = s
        .trim()
        .replace(['₹', ',', ' '], "")
        .trim_start_matches("Rs.")
        .to_string();

    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(f64::NAN)
}
