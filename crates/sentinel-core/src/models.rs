//! Domain models for Sentinel

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Direction of money movement for a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Credit,
    Debit,
    #[default]
    Unknown,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Credit => "credit",
            Self::Debit => "debit",
            Self::Unknown => "unknown",
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    /// Case-insensitive; any other non-empty label maps to `Unknown`
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" => Err("Empty transaction type".to_string()),
            "credit" => Ok(Self::Credit),
            "debit" => Ok(Self::Debit),
            _ => Ok(Self::Unknown),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which adapter produced a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RecordSource {
    /// Loaded from a ledger CSV dump
    #[default]
    Csv,
    /// Extracted from a bank SMS / notification
    Sms,
    /// Constructed directly by the caller
    Manual,
}

impl RecordSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Sms => "sms",
            Self::Manual => "manual",
        }
    }
}

impl std::fmt::Display for RecordSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single ledger entry
///
/// `amount` is always a non-negative magnitude; direction is carried by
/// `txn_type` alone. Records are never patched after construction, a
/// ledger is rebuilt wholesale instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Position within the ingestion batch (1-based), not globally unique
    pub id: usize,
    /// `None` when the source timestamp was absent or unparseable
    pub timestamp: Option<NaiveDateTime>,
    /// Merchant name or a default label
    pub title: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub txn_type: TransactionType,
    pub category: String,
    /// Running balance after this transaction, if the source reported one
    pub balance: Option<f64>,
    #[serde(default)]
    pub source: RecordSource,
}

impl TransactionRecord {
    /// Build a record, normalizing `amount` to its magnitude
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: usize,
        timestamp: Option<NaiveDateTime>,
        title: impl Into<String>,
        amount: f64,
        txn_type: TransactionType,
        category: impl Into<String>,
        balance: Option<f64>,
        source: RecordSource,
    ) -> Self {
        Self {
            id,
            timestamp,
            title: title.into(),
            amount: amount.abs(),
            txn_type,
            category: category.into(),
            balance,
            source,
        }
    }

    pub fn is_debit(&self) -> bool {
        self.txn_type == TransactionType::Debit
    }

    pub fn is_credit(&self) -> bool {
        self.txn_type == TransactionType::Credit
    }

    /// Copy of this record placed at a new ledger position
    pub fn with_id(&self, id: usize) -> Self {
        Self { id, ..self.clone() }
    }
}

/// Categorical risk tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskMode {
    Safe,
    Warning,
    Critical,
}

impl RiskMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Safe => "SAFE",
            Self::Warning => "WARNING",
            Self::Critical => "CRITICAL",
        }
    }
}

impl std::fmt::Display for RiskMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind of alert attached to an analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    Critical,
    Warning,
    Success,
    LowBalance,
    Info,
    Error,
}

impl AlertKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Warning => "warning",
            Self::Success => "success",
            Self::LowBalance => "low_balance",
            Self::Info => "info",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for AlertKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Human-readable alert with a suggested action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub message: String,
    pub action: String,
}

impl Alert {
    pub fn new(kind: AlertKind, message: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            action: action.into(),
        }
    }
}

/// Snapshot produced by one risk analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAnalysis {
    /// Sentinel score, 0-100
    pub score: u8,
    pub current_balance: f64,
    /// Rounded to 2 decimals
    pub daily_burn_rate: f64,
    /// Rounded to 1 decimal; 999 means no measurable burn
    pub runway_days: f64,
    pub risk_mode: RiskMode,
    pub alerts: Vec<Alert>,
}

/// Debit spend total for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySpend {
    pub category: String,
    pub total: f64,
    pub count: usize,
}
