//! Risk engine configuration
//!
//! Every constant the risk engine scores and classifies against lives here.
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. Check for override in data dir (~/.local/share/sentinel/config/risk.toml)
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! An explicit path (e.g. from `--config`) takes the place of step 1 and
//! must exist.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/risk.toml");

/// Weights and saturation points for the sentinel score
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreConfig {
    pub liquidity_target: f64,
    pub liquidity_weight: f64,
    pub runway_target_days: f64,
    pub runway_weight: f64,
    pub stability_points: f64,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            liquidity_target: 5000.0,
            liquidity_weight: 40.0,
            runway_target_days: 30.0,
            runway_weight: 40.0,
            stability_points: 20.0,
        }
    }
}

/// Risk-mode and alert thresholds
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdConfig {
    pub critical_runway_days: f64,
    pub critical_balance: f64,
    pub warning_runway_days: f64,
    pub warning_balance: f64,
    pub low_balance: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            critical_runway_days: 3.0,
            critical_balance: 500.0,
            warning_runway_days: 7.0,
            warning_balance: 2000.0,
            low_balance: 1000.0,
        }
    }
}

/// Full engine configuration
#[derive(Debug, Clone, PartialEq)]
pub struct RiskConfig {
    pub score: ScoreConfig,
    pub thresholds: ThresholdConfig,
    /// Runway reported when burn is zero ("effectively infinite")
    pub unbounded_runway_days: f64,
    /// Lower bound for any finite runway
    pub min_runway_days: f64,
    pub currency_symbol: String,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            score: ScoreConfig::default(),
            thresholds: ThresholdConfig::default(),
            unbounded_runway_days: 999.0,
            min_runway_days: 1.0,
            currency_symbol: "₹".to_string(),
        }
    }
}

impl RiskConfig {
    /// Load with the standard resolution order
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        load_config(override_path)
    }

    /// Parse config from TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        parse_config(content)
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("sentinel").join("config").join("risk.toml"))
}

/// Load configuration (override first, then default)
fn load_config(override_path: Option<&Path>) -> Result<RiskConfig> {
    let path = match override_path {
        Some(path) if !path.exists() => {
            return Err(Error::NotFound(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        Some(path) => Some(path.to_path_buf()),
        None => default_config_path().filter(|p| p.exists()),
    };

    let content = match path {
        Some(path) => {
            debug!(path = %path.display(), "Loading risk config override");
            fs::read_to_string(&path)
                .map_err(|e| Error::Config(format!("Failed to read config: {}", e)))?
        }
        None => DEFAULT_CONFIG.to_string(),
    };

    parse_config(&content)
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    score: Option<RawScore>,
    thresholds: Option<RawThresholds>,
    runway: Option<RawRunway>,
    display: Option<RawDisplay>,
}

#[derive(Debug, Deserialize)]
struct RawScore {
    liquidity_target: Option<f64>,
    liquidity_weight: Option<f64>,
    runway_target_days: Option<f64>,
    runway_weight: Option<f64>,
    stability_points: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawThresholds {
    critical_runway_days: Option<f64>,
    critical_balance: Option<f64>,
    warning_runway_days: Option<f64>,
    warning_balance: Option<f64>,
    low_balance: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawRunway {
    unbounded_days: Option<f64>,
    min_days: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawDisplay {
    currency_symbol: Option<String>,
}

fn parse_config(content: &str) -> Result<RiskConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = RiskConfig::default();

    if let Some(score) = raw.score {
        let target = &mut config.score;
        if let Some(v) = score.liquidity_target {
            target.liquidity_target = v;
        }
        if let Some(v) = score.liquidity_weight {
            target.liquidity_weight = v;
        }
        if let Some(v) = score.runway_target_days {
            target.runway_target_days = v;
        }
        if let Some(v) = score.runway_weight {
            target.runway_weight = v;
        }
        if let Some(v) = score.stability_points {
            target.stability_points = v;
        }
    }

    if let Some(thresholds) = raw.thresholds {
        let target = &mut config.thresholds;
        if let Some(v) = thresholds.critical_runway_days {
            target.critical_runway_days = v;
        }
        if let Some(v) = thresholds.critical_balance {
            target.critical_balance = v;
        }
        if let Some(v) = thresholds.warning_runway_days {
            target.warning_runway_days = v;
        }
        if let Some(v) = thresholds.warning_balance {
            target.warning_balance = v;
        }
        if let Some(v) = thresholds.low_balance {
            target.low_balance = v;
        }
    }

    if let Some(runway) = raw.runway {
        if let Some(v) = runway.unbounded_days {
            config.unbounded_runway_days = v;
        }
        if let Some(v) = runway.min_days {
            config.min_runway_days = v;
        }
    }

    if let Some(symbol) = raw.display.and_then(|d| d.currency_symbol) {
        config.currency_symbol = symbol;
    }

    validate(&config)?;
    Ok(config)
}

/// Reject values that would make the score formula divide by zero
fn validate(config: &RiskConfig) -> Result<()> {
    if config.score.liquidity_target <= 0.0 || !config.score.liquidity_target.is_finite() {
        return Err(Error::Config(
            "score.liquidity_target must be a positive number".into(),
        ));
    }
    if config.score.runway_target_days <= 0.0 || !config.score.runway_target_days.is_finite() {
        return Err(Error::Config(
            "score.runway_target_days must be a positive number".into(),
        ));
    }
    Ok(())
}
