//! Caller-owned account state
//!
//! Holds the current ledger and live balance between analyses. The risk
//! engine itself is stateless; anything that needs to remember "the current
//! dataset" keeps one of these and passes it in explicitly.

use std::path::Path;

use tracing::{info, warn};

use crate::import::load_transactions_from_csv;
use crate::models::{RiskAnalysis, TransactionRecord, TransactionType};
use crate::risk::{get_latest_balance, AnalysisContext, RiskEngine, ScoreBasis};
use crate::sms::SmsTransaction;

/// Ledger plus the balance tracked alongside it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountState {
    ledger: Vec<TransactionRecord>,
    balance: f64,
    dataset: Option<String>,
}

impl AccountState {
    /// Empty ledger with an opening balance
    pub fn new(opening_balance: f64) -> Self {
        Self {
            ledger: Vec::new(),
            balance: opening_balance,
            dataset: None,
        }
    }

    /// Load a ledger CSV into a fresh state
    pub fn from_csv(path: &Path) -> Self {
        let mut state = Self::default();
        state.load_csv(path);
        state
    }

    pub fn ledger(&self) -> &[TransactionRecord] {
        &self.ledger
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    /// Name of the dataset the ledger was last loaded from
    pub fn dataset(&self) -> Option<&str> {
        self.dataset.as_deref()
    }

    /// Replace the ledger wholesale
    ///
    /// The live balance is re-derived from the new ledger: its last finite
    /// reported balance, else credits minus debits. An empty load is
    /// rejected and leaves the state untouched.
    pub fn reload(&mut self, records: Vec<TransactionRecord>, dataset: impl Into<String>) -> bool {
        let dataset = dataset.into();
        if records.is_empty() {
            warn!(dataset = dataset.as_str(), "Dataset not found or empty");
            return false;
        }

        self.balance = get_latest_balance(&records);

        info!(
            dataset = dataset.as_str(),
            transactions = records.len(),
            balance = self.balance,
            "Switched dataset"
        );

        self.ledger = records;
        self.dataset = Some(dataset);
        true
    }

    /// Reload from a CSV file; `false` when nothing could be loaded
    pub fn load_csv(&mut self, path: &Path) -> bool {
        let dataset = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.reload(load_transactions_from_csv(path), dataset)
    }

    /// Record an SMS transaction
    ///
    /// The record is prepended to the ledger with the next id, and the live
    /// balance moves by its amount (debit subtracts, credit adds, unknown
    /// leaves it alone). Returns the record as stored.
    pub fn apply_sms(&mut self, sms: &SmsTransaction) -> TransactionRecord {
        let record = sms.record.with_id(self.ledger.len() + 1);

        match record.txn_type {
            TransactionType::Debit => self.balance -= record.amount,
            TransactionType::Credit => self.balance += record.amount,
            TransactionType::Unknown => {}
        }

        self.ledger.insert(0, record.clone());
        record
    }

    /// Analyze the ledger against the live balance
    pub fn analyze(&self, engine: &RiskEngine, score_basis: ScoreBasis) -> RiskAnalysis {
        let ctx = AnalysisContext::with_balance_override(self.balance, score_basis);
        engine.analyze_risk(&self.ledger, &ctx)
    }
}

/// Amount that can be spent per day without shortening the runway
///
/// `floor(balance / max(1, ceil(runway_days)))`, never negative.
pub fn safe_daily_spend(balance: f64, runway_days: f64) -> f64 {
    if !balance.is_finite() || !runway_days.is_finite() {
        return 0.0;
    }

    let days = runway_days.ceil().max(1.0);
    (balance / days).floor().max(0.0)
}
