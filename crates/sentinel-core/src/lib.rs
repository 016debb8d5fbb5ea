//! Sentinel Core Library
//!
//! Financial risk analysis over a transaction ledger:
//! - CSV ledger ingestion
//! - SMS / notification transaction extraction
//! - Risk engine (burn rate, runway, sentinel score, risk mode, alerts)
//! - Caller-owned account state tying the three together
//! - TOML configuration for every engine threshold

pub mod account;
pub mod categories;
pub mod config;
pub mod error;
pub mod import;
pub mod models;
pub mod risk;
pub mod sms;

pub use account::{safe_daily_spend, AccountState};
pub use config::RiskConfig;
pub use error::{Error, Result};
pub use import::{load_transactions_from_csv, parse_csv};
pub use models::{
    Alert, AlertKind, CategorySpend, RecordSource, RiskAnalysis, RiskMode, TransactionRecord,
    TransactionType,
};
pub use risk::{analyze_risk, AnalysisContext, RiskEngine, ScoreBasis};
pub use sms::{parse_transaction_sms, SmsExtractor, SmsRule, SmsTransaction};
