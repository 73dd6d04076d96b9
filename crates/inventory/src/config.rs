//! Analysis thresholds.

use serde::{Deserialize, Serialize};

/// Whether items that already passed their best-by date count as expiring.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiredBound {
    /// Only `0 < days <= threshold` (outreach view; expired stock goes to disposal).
    Exclusive,
    /// `days <= threshold`, already-expired stock included.
    Inclusive,
}

/// Thresholds shared by the analyzers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Days of supply strictly below this are CRITICAL.
    pub critical_days: f64,
    /// Days of supply strictly below this (and not critical) are LOW.
    pub low_days: f64,
    /// Items with at most this many days left are expiring.
    pub expiring_days: i64,
    pub expired_bound: ExpiredBound,
    /// Length of the top-priority view.
    pub top_n: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            critical_days: 3.0,
            low_days: 5.0,
            expiring_days: 3,
            expired_bound: ExpiredBound::Exclusive,
            top_n: 5,
        }
    }
}

impl AnalysisConfig {
    pub fn with_critical_days(mut self, days: f64) -> Self {
        self.critical_days = days;
        self
    }

    pub fn with_low_days(mut self, days: f64) -> Self {
        self.low_days = days;
        self
    }

    pub fn with_expiring_days(mut self, days: i64) -> Self {
        self.expiring_days = days;
        self
    }

    pub fn with_expired_bound(mut self, bound: ExpiredBound) -> Self {
        self.expired_bound = bound;
        self
    }

    pub fn with_top_n(mut self, n: usize) -> Self {
        self.top_n = n;
        self
    }
}
