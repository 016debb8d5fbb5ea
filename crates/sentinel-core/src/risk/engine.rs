//! Risk Engine - scoring, classification and alerts over a ledger snapshot

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::RiskConfig;
use crate::error::Result;
use crate::models::{Alert, AlertKind, RiskAnalysis, RiskMode, TransactionRecord};

use super::metrics::{calculate_burn_rate, get_latest_balance};

/// Score reported when there is nothing (or nothing sane) to score
pub const NEUTRAL_SCORE: u8 = 50;

/// Which balance the sentinel score is computed from
///
/// Risk mode and runway always use the effective balance (the override when
/// given). The score can either follow that same balance or be rebuilt
/// from the ledger alone; the two disagree whenever an override differs
/// from the ledger's own balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBasis {
    /// Score from the ledger-derived balance and runway, ignoring any override
    #[default]
    LedgerDerived,
    /// Score from the same balance and runway used for the risk mode
    EffectiveBalance,
}

impl ScoreBasis {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LedgerDerived => "ledger",
            Self::EffectiveBalance => "effective",
        }
    }
}

impl std::str::FromStr for ScoreBasis {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ledger" | "ledger_derived" => Ok(Self::LedgerDerived),
            "effective" | "effective_balance" => Ok(Self::EffectiveBalance),
            _ => Err(format!("Unknown score basis: {}", s)),
        }
    }
}

impl std::fmt::Display for ScoreBasis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Caller-held inputs for one analysis
///
/// Replaces any process-wide "current balance": whoever tracks a live
/// balance passes it in here, together with the score basis to use.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnalysisContext {
    balance_override: Option<f64>,
    score_basis: ScoreBasis,
}

impl AnalysisContext {
    /// Analyze purely from the ledger
    pub fn from_ledger() -> Self {
        Self::default()
    }

    /// Analyze against a live balance tracked outside the ledger
    pub fn with_balance_override(balance: f64, score_basis: ScoreBasis) -> Self {
        Self {
            balance_override: Some(balance),
            score_basis,
        }
    }

    pub fn balance_override(&self) -> Option<f64> {
        self.balance_override
    }

    pub fn score_basis(&self) -> ScoreBasis {
        self.score_basis
    }
}

/// The three additive parts of the sentinel score
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub liquidity: f64,
    pub runway: f64,
    pub stability: f64,
    /// Sum clamped to 0..=100 and rounded
    pub total: u8,
}

/// Stateless risk engine; every method is a pure function of its inputs
#[derive(Debug, Clone, Default)]
pub struct RiskEngine {
    config: RiskConfig,
}

impl RiskEngine {
    /// Engine with the built-in constants
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RiskConfig) -> Self {
        Self { config }
    }

    /// Engine configured from the standard config resolution
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        Ok(Self::with_config(RiskConfig::load(config_path)?))
    }

    pub fn config(&self) -> &RiskConfig {
        &self.config
    }

    /// Days the balance lasts at the given burn
    ///
    /// Zero burn reports the "unbounded" sentinel (999 by default); a
    /// non-positive balance reports the minimum (1 day). Non-finite inputs
    /// are treated as 0.
    pub fn calculate_runway(&self, balance: f64, burn_rate: f64) -> f64 {
        let balance = finite_or_zero(balance, "balance");
        let burn_rate = finite_or_zero(burn_rate, "burn_rate");

        if burn_rate == 0.0 {
            return self.config.unbounded_runway_days;
        }

        if balance <= 0.0 {
            return self.config.min_runway_days;
        }

        (balance / burn_rate).max(self.config.min_runway_days)
    }

    /// Score from an explicit balance and runway
    pub fn score_components(&self, balance: f64, runway: f64) -> ScoreBreakdown {
        let cfg = &self.config.score;

        let liquidity = component(balance, cfg.liquidity_target, cfg.liquidity_weight);
        let runway = component(runway, cfg.runway_target_days, cfg.runway_weight);
        let stability = if cfg.stability_points.is_finite() {
            cfg.stability_points
        } else {
            0.0
        };

        let total = (liquidity + runway + stability).clamp(0.0, 100.0).round() as u8;

        ScoreBreakdown {
            liquidity,
            runway,
            stability,
            total,
        }
    }

    /// Sentinel score (0-100) rebuilt entirely from the ledger
    pub fn calculate_sentinel_score(&self, ledger: &[TransactionRecord]) -> u8 {
        if ledger.is_empty() {
            return NEUTRAL_SCORE;
        }

        let balance = get_latest_balance(ledger);
        let burn_rate = calculate_burn_rate(ledger);
        if !balance.is_finite() || !burn_rate.is_finite() {
            warn!(balance, burn_rate, "Error calculating sentinel score");
            return NEUTRAL_SCORE;
        }

        let runway = self.calculate_runway(balance, burn_rate);
        self.score_components(balance, runway).total
    }

    /// CRITICAL if either critical threshold trips, else WARNING if either
    /// warning threshold trips, else SAFE
    pub fn classify_risk_mode(&self, balance: f64, runway: f64) -> RiskMode {
        let t = &self.config.thresholds;

        if !balance.is_finite() || !runway.is_finite() {
            warn!(balance, runway, "Non-finite risk inputs, defaulting to SAFE");
            return RiskMode::Safe;
        }

        if runway < t.critical_runway_days || balance < t.critical_balance {
            RiskMode::Critical
        } else if runway < t.warning_runway_days || balance < t.warning_balance {
            RiskMode::Warning
        } else {
            RiskMode::Safe
        }
    }

    /// One mode-specific alert, plus a low-balance alert when
    /// `0 < balance < low_balance`
    pub fn generate_alerts(&self, mode: RiskMode, balance: f64, runway: f64) -> Vec<Alert> {
        let mut alerts = Vec::with_capacity(2);
        let days = runway.round();

        alerts.push(match mode {
            RiskMode::Critical => Alert::new(
                AlertKind::Critical,
                format!("⚠️ Critical: Only {:.0} days of runway remaining", days),
                "Reduce non-essential spending immediately",
            ),
            RiskMode::Warning => Alert::new(
                AlertKind::Warning,
                format!("⚡ Warning: {:.0} days until money runs out", days),
                "Review your spending pattern",
            ),
            RiskMode::Safe => Alert::new(
                AlertKind::Success,
                "✅ Your finances are looking good",
                "Keep up the good work!",
            ),
        });

        if balance > 0.0 && balance < self.config.thresholds.low_balance {
            alerts.push(Alert::new(
                AlertKind::LowBalance,
                format!(
                    "Balance is low: {}{:.2}",
                    self.config.currency_symbol,
                    round_to(balance, 2)
                ),
                "Avoid unnecessary expenses",
            ));
        }

        alerts
    }

    /// Full analysis of a ledger snapshot
    ///
    /// Never fails: an empty ledger yields the neutral snapshot, and a
    /// computation that goes non-finite yields the error snapshot.
    pub fn analyze_risk(&self, ledger: &[TransactionRecord], ctx: &AnalysisContext) -> RiskAnalysis {
        if ledger.is_empty() {
            return RiskAnalysis::empty(ctx.balance_override());
        }

        let balance = match ctx.balance_override() {
            Some(b) if b.is_finite() => b,
            Some(b) => {
                warn!(balance_override = b, "Ignoring non-finite balance override");
                get_latest_balance(ledger)
            }
            None => get_latest_balance(ledger),
        };

        let burn_rate = calculate_burn_rate(ledger);
        if !burn_rate.is_finite() {
            warn!(burn_rate, "Error in risk analysis");
            return RiskAnalysis::failed();
        }

        let runway = self.calculate_runway(balance, burn_rate);

        let score = match ctx.score_basis() {
            ScoreBasis::LedgerDerived => self.calculate_sentinel_score(ledger),
            ScoreBasis::EffectiveBalance => self.score_components(balance, runway).total,
        };

        let risk_mode = self.classify_risk_mode(balance, runway);
        let alerts = self.generate_alerts(risk_mode, balance, runway);

        debug!(
            score,
            balance,
            burn_rate,
            runway,
            risk_mode = risk_mode.as_str(),
            basis = ctx.score_basis().as_str(),
            "Risk analysis complete"
        );

        RiskAnalysis {
            score,
            current_balance: balance,
            daily_burn_rate: round_to(burn_rate, 2),
            runway_days: round_to(runway, 1),
            risk_mode,
            alerts,
        }
    }
}

impl RiskAnalysis {
    /// Neutral snapshot for an empty ledger
    pub fn empty(balance_override: Option<f64>) -> Self {
        Self {
            score: NEUTRAL_SCORE,
            current_balance: balance_override.filter(|b| b.is_finite()).unwrap_or(0.0),
            daily_burn_rate: 0.0,
            runway_days: 0.0,
            risk_mode: RiskMode::Safe,
            alerts: vec![Alert::new(
                AlertKind::Info,
                "No transactions to analyze",
                "Add transactions to start tracking",
            )],
        }
    }

    /// Neutral snapshot for an analysis that could not be computed
    pub fn failed() -> Self {
        Self {
            score: NEUTRAL_SCORE,
            current_balance: 0.0,
            daily_burn_rate: 0.0,
            runway_days: 0.0,
            risk_mode: RiskMode::Safe,
            alerts: vec![Alert::new(
                AlertKind::Error,
                "Error analyzing risk",
                "Please try again",
            )],
        }
    }
}

/// Analyze with the default engine
pub fn analyze_risk(ledger: &[TransactionRecord], ctx: &AnalysisContext) -> RiskAnalysis {
    RiskEngine::new().analyze_risk(ledger, ctx)
}

/// `min(value / target * weight, weight)`
///
/// NaN and -inf contribute 0; +inf saturates at `weight`.
fn component(value: f64, target: f64, weight: f64) -> f64 {
    if value.is_nan() || value == f64::NEG_INFINITY {
        return 0.0;
    }
    let part = (value / target * weight).min(weight);
    if part.is_finite() {
        part
    } else {
        0.0
    }
}

fn finite_or_zero(value: f64, name: &str) -> f64 {
    if value.is_finite() {
        value
    } else {
        debug!(name, value, "Replacing non-finite input with 0");
        0.0
    }
}

/// Round half away from zero to `places` decimals
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RecordSource, TransactionType};
    use chrono::NaiveDate;

    fn tx(day: u32, amount: f64, txn_type: TransactionType, balance: Option<f64>) -> TransactionRecord {
        TransactionRecord::new(
            day as usize,
            NaiveDate::from_ymd_opt(2024, 1, day)
                .unwrap()
                .and_hms_opt(0, 0, 0),
            "t",
            amount,
            txn_type,
            "misc",
            balance,
            RecordSource::Manual,
        )
    }

    #[test]
    fn test_runway_zero_burn_is_unbounded() {
        let engine = RiskEngine::new();
        assert_eq!(engine.calculate_runway(5000.0, 0.0), 999.0);
        assert_eq!(engine.calculate_runway(-50.0, 0.0), 999.0);
        assert_eq!(engine.calculate_runway(100.0, f64::NAN), 999.0);
    }

    #[test]
    fn test_runway_non_positive_balance() {
        let engine = RiskEngine::new();
        for burn in [0.5, 10.0, 1e9] {
            assert_eq!(engine.calculate_runway(0.0, burn), 1.0);
            assert_eq!(engine.calculate_runway(-1000.0, burn), 1.0);
        }
        assert_eq!(engine.calculate_runway(f64::NAN, 10.0), 1.0);
    }

    #[test]
    fn test_runway_floor() {
        let engine = RiskEngine::new();
        assert_eq!(engine.calculate_runway(1000.0, 100.0), 10.0);
        assert_eq!(engine.calculate_runway(10.0, 100.0), 1.0);
    }

    #[test]
    fn test_score_components() {
        let engine = RiskEngine::new();
        let score = engine.score_components(2500.0, 15.0);
        assert_eq!(score.liquidity, 20.0);
        assert_eq!(score.runway, 20.0);
        assert_eq!(score.stability, 20.0);
        assert_eq!(score.total, 60);

        assert_eq!(engine.score_components(10_000.0, 999.0).total, 100);
    }

    #[test]
    fn test_score_always_in_range() {
        let engine = RiskEngine::new();
        let values = [
            f64::MIN,
            -1e12,
            -5000.0,
            -1.0,
            0.0,
            0.4,
            1.0,
            499.9,
            5000.0,
            1e12,
            f64::MAX,
        ];
        for balance in values {
            for runway in values {
                let total = engine.score_components(balance, runway).total;
                assert!(total <= 100, "balance={balance} runway={runway}");
            }
        }
        assert_eq!(engine.score_components(-1e12, -1e12).total, 0);
        assert_eq!(engine.score_components(f64::NAN, f64::INFINITY).total, 60);
        assert_eq!(engine.score_components(f64::NEG_INFINITY, f64::NAN).total, 20);
    }

    #[test]
    fn test_unbounded_runway_saturates() {
        let engine = RiskEngine::new();
        let runway = engine.calculate_runway(1e307, 1e-5);
        assert_eq!(runway, f64::INFINITY);

        let score = engine.score_components(1e307, runway);
        assert_eq!(score.liquidity, 40.0);
        assert_eq!(score.runway, 40.0);
        assert_eq!(score.total, 100);
    }

    #[test]
    fn test_round_to_near_max() {
        assert_eq!(round_to(f64::MAX, 2), f64::MAX);
        assert_eq!(round_to(-f64::MAX, 1), -f64::MAX);
        assert_eq!(round_to(113.333, 2), 113.33);
        assert_eq!(round_to(2.25, 1), 2.3);
        assert!(round_to(f64::NAN, 2).is_nan());
    }

    #[test]
    fn test_sentinel_score_from_ledger() {
        let engine = RiskEngine::new();
        assert_eq!(engine.calculate_sentinel_score(&[]), NEUTRAL_SCORE);

        // balance 4950, burn 50/2 days = 25/day, runway 198 days
        let ledger = vec![
            tx(1, 100.0, TransactionType::Credit, Some(5000.0)),
            tx(2, 50.0, TransactionType::Debit, Some(4950.0)),
        ];
        // 4950/5000*40 = 39.6, runway capped at 40, +20
        assert_eq!(engine.calculate_sentinel_score(&ledger), 100);
    }

    #[test]
    fn test_classify_thresholds() {
        let engine = RiskEngine::new();
        assert_eq!(engine.classify_risk_mode(400.0, 10.0), RiskMode::Critical);
        assert_eq!(engine.classify_risk_mode(3000.0, 5.0), RiskMode::Warning);
        assert_eq!(engine.classify_risk_mode(10_000.0, 2.9), RiskMode::Critical);
        assert_eq!(engine.classify_risk_mode(1500.0, 30.0), RiskMode::Warning);
        assert_eq!(engine.classify_risk_mode(2000.0, 7.0), RiskMode::Safe);
        assert_eq!(engine.classify_risk_mode(f64::NAN, 7.0), RiskMode::Safe);
    }

    #[test]
    fn test_alerts_per_mode() {
        let engine = RiskEngine::new();

        let alerts = engine.generate_alerts(RiskMode::Critical, 5000.0, 2.4);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].kind, AlertKind::Critical);
        assert_eq!(
            alerts[0].message,
            "⚠️ Critical: Only 2 days of runway remaining"
        );

        let alerts = engine.generate_alerts(RiskMode::Warning, 5000.0, 6.5);
        assert_eq!(alerts[0].kind, AlertKind::Warning);
        assert_eq!(alerts[0].message, "⚡ Warning: 7 days until money runs out");

        let alerts = engine.generate_alerts(RiskMode::Safe, 5000.0, 40.0);
        assert_eq!(alerts[0].kind, AlertKind::Success);
    }

    #[test]
    fn test_low_balance_alert_any_mode() {
        let engine = RiskEngine::new();

        let alerts = engine.generate_alerts(RiskMode::Safe, 750.5, 100.0);
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[1].kind, AlertKind::LowBalance);
        assert_eq!(alerts[1].message, "Balance is low: ₹750.50");

        assert_eq!(engine.generate_alerts(RiskMode::Critical, 0.0, 1.0).len(), 1);
        assert_eq!(engine.generate_alerts(RiskMode::Critical, 1000.0, 1.0).len(), 1);
    }

    #[test]
    fn test_analyze_empty_ledger() {
        let engine = RiskEngine::new();
        for ctx in [
            AnalysisContext::from_ledger(),
            AnalysisContext::with_balance_override(100.0, ScoreBasis::LedgerDerived),
            AnalysisContext::with_balance_override(1e6, ScoreBasis::EffectiveBalance),
        ] {
            let analysis = engine.analyze_risk(&[], &ctx);
            assert_eq!(analysis.score, 50);
            assert_eq!(analysis.risk_mode, RiskMode::Safe);
            assert_eq!(analysis.alerts.len(), 1);
            assert_eq!(analysis.alerts[0].kind, AlertKind::Info);
            assert_eq!(analysis.current_balance, ctx.balance_override().unwrap_or(0.0));
        }
    }

    #[test]
    fn test_analyze_rounds_outputs() {
        // 100 debited over 3 days -> 33.333/day; balance 1000 -> 30.0 days
        let ledger = vec![
            tx(1, 60.0, TransactionType::Debit, None),
            tx(3, 40.0, TransactionType::Debit, Some(1000.0)),
        ];
        let analysis = analyze_risk(&ledger, &AnalysisContext::from_ledger());
        assert_eq!(analysis.daily_burn_rate, 33.33);
        assert_eq!(analysis.runway_days, 30.0);
        assert_eq!(analysis.current_balance, 1000.0);
        assert_eq!(analysis.risk_mode, RiskMode::Warning);
    }

    #[test]
    fn test_score_basis_strategies_diverge() {
        let ledger = vec![
            tx(1, 100.0, TransactionType::Credit, Some(5000.0)),
            tx(2, 50.0, TransactionType::Debit, Some(4950.0)),
        ];

        let ledger_based = analyze_risk(
            &ledger,
            &AnalysisContext::with_balance_override(300.0, ScoreBasis::LedgerDerived),
        );
        let effective = analyze_risk(
            &ledger,
            &AnalysisContext::with_balance_override(300.0, ScoreBasis::EffectiveBalance),
        );

        // Mode follows the override either way
        assert_eq!(ledger_based.risk_mode, RiskMode::Critical);
        assert_eq!(effective.risk_mode, RiskMode::Critical);
        assert_eq!(ledger_based.current_balance, 300.0);

        // Score only follows it under EffectiveBalance:
        // 300/5000*40 = 2.4, runway 12 days -> 16, +20 = 38.4
        assert_eq!(ledger_based.score, 100);
        assert_eq!(effective.score, 38);
    }

    #[test]
    fn test_non_finite_override_falls_back() {
        let ledger = vec![tx(1, 50.0, TransactionType::Debit, Some(4950.0))];
        let analysis = analyze_risk(
            &ledger,
            &AnalysisContext::with_balance_override(f64::NAN, ScoreBasis::EffectiveBalance),
        );
        assert_eq!(analysis.current_balance, 4950.0);
    }

    #[test]
    fn test_overflowing_burn_returns_error_snapshot() {
        let ledger = vec![
            tx(1, f64::MAX, TransactionType::Debit, None),
            tx(1, f64::MAX, TransactionType::Debit, None),
        ];
        let analysis = analyze_risk(&ledger, &AnalysisContext::from_ledger());
        assert_eq!(analysis, RiskAnalysis::failed());
    }

    #[test]
    fn test_score_basis_from_str() {
        assert_eq!("ledger".parse::<ScoreBasis>().unwrap(), ScoreBasis::LedgerDerived);
        assert_eq!(
            "EFFECTIVE".parse::<ScoreBasis>().unwrap(),
            ScoreBasis::EffectiveBalance
        );
        assert!("other".parse::<ScoreBasis>().is_err());
    }
}
