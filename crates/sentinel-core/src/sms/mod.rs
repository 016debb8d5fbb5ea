//! SMS transaction extraction
//!
//! Turns a single bank/UPI notification into at most one transaction record.
//! Extraction is a pipeline of independent rules, each filling one field of a
//! shared draft:
//!
//! - **Amount** - currency marker followed by a grouped number
//! - **Type** - debit/credit keywords (debit checked first)
//! - **Balance** - balance indicator followed by a currency amount
//! - **Merchant** - "at/to/from" followed by a capitalized name
//! - **Category** - keyword table lookup on the merchant
//!
//! The only hard requirement is the amount: without it nothing is returned.
//! Custom rules can be appended with [`SmsExtractor::register`].
//!
//! ```rust,ignore
//! use sentinel_core::sms::parse_transaction_sms;
//!
//! let sms = parse_transaction_sms("Rs.500 debited at Swiggy on 01-01-24.");
//! assert_eq!(sms.unwrap().record.amount, 500.0);
//! ```

pub mod rules;

use std::sync::OnceLock;

use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use tracing::debug;

use crate::categories::UNCATEGORIZED;
use crate::models::{RecordSource, TransactionRecord, TransactionType};

pub use rules::{AmountRule, BalanceRule, CategoryRule, MerchantRule, TypeRule};

/// Title used when no merchant was found
pub const UNKNOWN_MERCHANT: &str = "Unknown";

/// Fields collected so far while running the rule pipeline
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SmsDraft {
    pub amount: Option<f64>,
    pub txn_type: Option<TransactionType>,
    pub balance: Option<f64>,
    pub merchant: Option<String>,
    pub category: Option<String>,
}

/// A single extraction rule
pub trait SmsRule: Send + Sync {
    /// Short identifier used in diagnostics
    fn name(&self) -> &'static str;

    /// Inspect the message and fill in whatever this rule is responsible for.
    /// Rules run in registration order and may read fields set earlier.
    fn apply(&self, text: &str, draft: &mut SmsDraft);
}

/// Result of a successful extraction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SmsTransaction {
    pub record: TransactionRecord,
    pub merchant: Option<String>,
    pub raw_text: String,
}

/// Rule pipeline that builds a transaction from message text
pub struct SmsExtractor {
    rules: Vec<Box<dyn SmsRule>>,
}

impl Default for SmsExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl SmsExtractor {
    /// Create an extractor with the built-in rules
    pub fn new() -> Self {
        let mut extractor = Self::empty();

        extractor.register(Box::new(AmountRule::new()));
        extractor.register(Box::new(TypeRule::new()));
        extractor.register(Box::new(BalanceRule::new()));
        extractor.register(Box::new(MerchantRule::new()));
        extractor.register(Box::new(CategoryRule));

        extractor
    }

    /// Create an extractor with no rules registered
    pub fn empty() -> Self {
        Self { rules: vec![] }
    }

    /// Append a rule to the end of the pipeline
    pub fn register(&mut self, rule: Box<dyn SmsRule>) {
        self.rules.push(rule);
    }

    /// Names of registered rules, in execution order
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Run every rule and collect the draft
    pub fn draft(&self, text: &str) -> SmsDraft {
        let mut draft = SmsDraft::default();
        for rule in &self.rules {
            rule.apply(text, &mut draft);
        }
        draft
    }

    /// Extract a transaction, timestamped now
    pub fn extract(&self, text: &str) -> Option<SmsTransaction> {
        self.extract_at(text, Local::now().naive_local())
    }

    /// Extract a transaction with an explicit timestamp
    pub fn extract_at(&self, text: &str, timestamp: NaiveDateTime) -> Option<SmsTransaction> {
        let draft = self.draft(text);

        let Some(amount) = draft.amount.filter(|a| a.is_finite() && *a > 0.0) else {
            debug!("No transaction amount found in SMS");
            return None;
        };

        let record = TransactionRecord::new(
            0,
            Some(timestamp),
            draft
                .merchant
                .clone()
                .unwrap_or_else(|| UNKNOWN_MERCHANT.to_string()),
            amount,
            draft.txn_type.unwrap_or_default(),
            draft
                .category
                .unwrap_or_else(|| UNCATEGORIZED.to_string()),
            draft.balance,
            RecordSource::Sms,
        );

        debug!(
            amount,
            txn_type = %record.txn_type,
            category = record.category.as_str(),
            "Extracted SMS transaction"
        );

        Some(SmsTransaction {
            record,
            merchant: draft.merchant,
            raw_text: text.to_string(),
        })
    }
}

/// Extract a transaction using the built-in rules
pub fn parse_transaction_sms(text: &str) -> Option<SmsTransaction> {
    static EXTRACTOR: OnceLock<SmsExtractor> = OnceLock::new();
    EXTRACTOR.get_or_init(SmsExtractor::new).extract(text)
}
