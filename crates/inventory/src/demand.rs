//! Demand reference data and crisis state.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::warn;

use pantry_core::temporal::lenient_date;
use pantry_core::{Category, DomainError, DomainResult};

use crate::normalize::number;

/// Daily demand assumed for a category missing from the profile.
pub const FALLBACK_DAILY_DEMAND: f64 = 10.0;

/// Average baseline daily demand per category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DemandProfile {
    rates: BTreeMap<Category, f64>,
}

impl DemandProfile {
    /// Build a profile, rejecting negative or non-finite rates.
    ///
    /// A zero rate is accepted: it is the degenerate "no usable demand figure"
    /// case the analyzers treat as maximal scarcity.
    pub fn new(rates: BTreeMap<Category, f64>) -> DomainResult<Self> {
        if let Some((c, r)) = rates.iter().find(|(_, r)| !r.is_finite() || **r < 0.0) {
            return Err(DomainError::validation(format!(
                "daily demand for {c} must be a finite non-negative number (got {r})"
            )));
        }
        Ok(Self { rates })
    }

    /// Baseline demand for `category`, or [`FALLBACK_DAILY_DEMAND`].
    pub fn baseline(&self, category: &Category) -> f64 {
        self.rates.get(category).copied().unwrap_or(FALLBACK_DAILY_DEMAND)
    }

    /// Baseline scaled by the crisis multiplier (if any crisis is active).
    pub fn effective(&self, category: &Category, crisis: Option<&CrisisState>) -> f64 {
        self.baseline(category) * multiplier(crisis)
    }

    pub fn contains(&self, category: &Category) -> bool {
        self.rates.contains_key(category)
    }

    /// Categories with an explicit rate, in name order.
    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.rates.keys()
    }

    pub fn rates(&self) -> &BTreeMap<Category, f64> {
        &self.rates
    }
}

impl Default for DemandProfile {
    /// Built-in rates used when the store has no analytics table.
    fn default() -> Self {
        let rates = [
            (Category::Protein, 80.0),
            (Category::Dairy, 50.0),
            (Category::Fruit, 60.0),
            (Category::Grain, 90.0),
            (Category::Vegetable, 70.0),
            (Category::Prepared, 20.0),
            (Category::other(), 10.0),
            (Category::Canned, 25.0),
        ];
        Self {
            rates: rates.into_iter().collect(),
        }
    }
}

/// A demand-raising event (storm, layoffs, holiday surge, ...).
///
/// When active, every category's demand is scaled by the same multiplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrisisState {
    pub active: bool,
    pub kind: String,
    /// Severity as recorded; consumers pick their own default when absent.
    #[serde(default)]
    pub severity: Option<String>,
    pub description: String,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    /// Always `>= 1.0`.
    pub demand_multiplier: f64,
}

impl CrisisState {
    /// An active crisis; multipliers below 1 (or non-finite) are raised to 1.
    pub fn active(kind: impl Into<String>, demand_multiplier: f64) -> Self {
        Self {
            active: true,
            kind: kind.into(),
            severity: None,
            description: String::new(),
            start_date: None,
            end_date: None,
            demand_multiplier: sanitize_multiplier(demand_multiplier),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_severity(mut self, severity: impl Into<String>) -> Self {
        self.severity = Some(severity.into());
        self
    }

    /// Multiplier actually applied to demand (1.0 when inactive).
    pub fn effective_multiplier(&self) -> f64 {
        if self.active {
            sanitize_multiplier(self.demand_multiplier)
        } else {
            1.0
        }
    }

    /// Percentage demand increase implied by the multiplier (2.5 -> 150).
    pub fn demand_increase_pct(&self) -> f64 {
        (self.effective_multiplier() - 1.0) * 100.0
    }
}

/// Multiplier for an optional crisis.
pub fn multiplier(crisis: Option<&CrisisState>) -> f64 {
    crisis.map_or(1.0, CrisisState::effective_multiplier)
}

fn sanitize_multiplier(m: f64) -> f64 {
    if m.is_finite() && m >= 1.0 { m } else { 1.0 }
}

/// `analytics` node as stored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAnalytics {
    pub average_daily_demand: Option<BTreeMap<String, JsonValue>>,
    pub current_crisis: Option<RawCrisis>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCrisis {
    #[serde(default)]
    pub active: bool,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub severity: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub projected_demand_increase: JsonValue,
}

/// Canonical analytics: demand profile plus crisis (if one is recorded).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnalyticsSnapshot {
    pub demand: DemandProfile,
    pub crisis: Option<CrisisState>,
}

impl AnalyticsSnapshot {
    /// The crisis only if it is active.
    pub fn active_crisis(&self) -> Option<&CrisisState> {
        self.crisis.as_ref().filter(|c| c.active)
    }
}

/// Normalize the stored analytics node.
///
/// Unusable individual rates are dropped (the category then uses the fallback
/// rate); a missing table yields the built-in profile.
pub fn normalize_analytics(raw: Option<RawAnalytics>) -> AnalyticsSnapshot {
    let Some(raw) = raw else {
        return AnalyticsSnapshot::default();
    };

    let demand = match raw.average_daily_demand {
        Some(table) if !table.is_empty() => {
            let mut rates = BTreeMap::new();
            for (name, value) in table {
                let category = match name.parse::<Category>() {
                    Ok(c) => c,
                    Err(e) => {
                        warn!(category = %name, error = %e, "demand entry ignored");
                        continue;
                    }
                };
                match number(&value).filter(|r| *r >= 0.0) {
                    Some(rate) => {
                        rates.insert(category, rate);
                    }
                    None => warn!(category = %category, "demand rate unusable; fallback rate applies"),
                }
            }
            // Every rate was checked above.
            DemandProfile::new(rates).unwrap_or_default()
        }
        _ => DemandProfile::default(),
    };

    let crisis = raw.current_crisis.map(|c| {
        let requested = number(&c.projected_demand_increase).unwrap_or(1.0);
        if c.active && requested < 1.0 {
            warn!(multiplier = requested, "crisis multiplier below 1.0 raised to 1.0");
        }
        CrisisState {
            active: c.active,
            kind: c.kind.unwrap_or_else(|| "unknown".to_string()),
            severity: c.severity.map(|s| s.trim().to_lowercase()).filter(|s| !s.is_empty()),
            description: c.description.unwrap_or_default(),
            start_date: c.start_date,
            end_date: c.end_date,
            demand_multiplier: sanitize_multiplier(requested),
        }
    });

    AnalyticsSnapshot { demand, crisis }
}
