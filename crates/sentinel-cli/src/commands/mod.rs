//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (engine loading, analysis output)
//! - `ledger` - Ledger commands (ingest, analyze)
//! - `sms` - SMS commands (sms, simulate)

pub mod core;
pub mod ledger;
pub mod sms;

// Re-export command functions for main.rs
pub use core::*;
pub use ledger::*;
pub use sms::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
