//! Risk Engine - financial health from a ledger snapshot
//!
//! Converts a ledger into:
//!
//! - **Burn rate** - average daily debit spend over the ledger's day span
//! - **Runway** - days the current balance lasts at that burn
//! - **Sentinel score** - 0-100 index (liquidity + runway + fixed stability)
//! - **Risk mode** - SAFE / WARNING / CRITICAL tier from balance and runway
//! - **Alerts** - human-readable messages with suggested actions
//!
//! The engine holds no state between calls. A live balance tracked by the
//! caller is passed in through [`AnalysisContext`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sentinel_core::risk::{AnalysisContext, RiskEngine, ScoreBasis};
//!
//! let engine = RiskEngine::new();
//! let ctx = AnalysisContext::with_balance_override(8500.0, ScoreBasis::EffectiveBalance);
//! let analysis = engine.analyze_risk(&ledger, &ctx);
//! ```

pub mod engine;
pub mod metrics;

pub use engine::{
    analyze_risk, AnalysisContext, RiskEngine, ScoreBasis, ScoreBreakdown, NEUTRAL_SCORE,
};
pub use metrics::{calculate_burn_rate, day_span, get_latest_balance, spend_by_category};
