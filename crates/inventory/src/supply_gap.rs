//! Supply gap analysis: days of supply per category.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use pantry_core::Category;

use crate::config::AnalysisConfig;
use crate::demand::{CrisisState, DemandProfile};
use crate::item::InventoryItem;

/// Stock status of a category.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SupplyStatus {
    Critical,
    Low,
    Ok,
}

impl SupplyStatus {
    /// Classify days of supply against the configured thresholds.
    ///
    /// Total: every value (NaN included) lands in exactly one status; NaN is
    /// treated as critical.
    pub fn classify(days_of_supply: f64, config: &AnalysisConfig) -> Self {
        if days_of_supply.is_nan() || days_of_supply < config.critical_days {
            SupplyStatus::Critical
        } else if days_of_supply < config.low_days {
            SupplyStatus::Low
        } else {
            SupplyStatus::Ok
        }
    }
}

/// Derived supply picture for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplyGapRecord {
    pub category: Category,
    pub total_quantity: f64,
    pub item_count: usize,
    /// Baseline demand before any crisis scaling.
    pub daily_demand: f64,
    /// Baseline x crisis multiplier.
    pub effective_daily_demand: f64,
    /// Full precision; use this for ranking.
    pub days_of_supply: f64,
    /// One decimal; use this for display.
    pub days_of_supply_rounded: f64,
    pub status: SupplyStatus,
}

impl SupplyGapRecord {
    /// Build a record from totals.
    ///
    /// Zero effective demand reports 0 days (maximal scarcity) instead of
    /// dividing by zero.
    pub fn from_totals(
        category: Category,
        total_quantity: f64,
        item_count: usize,
        daily_demand: f64,
        multiplier: f64,
        config: &AnalysisConfig,
    ) -> Self {
        let effective_daily_demand = daily_demand * multiplier;
        let days_of_supply = if effective_daily_demand > 0.0 {
            total_quantity / effective_daily_demand
        } else {
            0.0
        };

        Self {
            category,
            total_quantity,
            item_count,
            daily_demand,
            effective_daily_demand,
            days_of_supply,
            days_of_supply_rounded: round_tenth(days_of_supply),
            status: SupplyStatus::classify(days_of_supply, config),
        }
    }
}

/// Round for reporting (one decimal).
pub fn round_tenth(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Aggregates inventory by category against (possibly crisis-adjusted) demand.
#[derive(Debug, Clone, Default)]
pub struct SupplyGapAnalyzer {
    config: AnalysisConfig,
}

impl SupplyGapAnalyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// One record per category in the demand profile, plus any category that
    /// only appears in inventory (measured against the fallback rate).
    ///
    /// Profile categories without stock get quantity 0 and are therefore
    /// CRITICAL: missing data is never mistaken for sufficiency. Deleted items
    /// are skipped.
    pub fn analyze(
        &self,
        items: &[InventoryItem],
        demand: &DemandProfile,
        crisis: Option<&CrisisState>,
    ) -> BTreeMap<Category, SupplyGapRecord> {
        let mut totals: BTreeMap<Category, (f64, usize)> = demand
            .categories()
            .map(|c| (c.clone(), (0.0, 0)))
            .collect();

        for item in items.iter().filter(|i| i.is_active()) {
            let entry = totals.entry(item.category.clone()).or_insert((0.0, 0));
            entry.0 += item.quantity;
            entry.1 += 1;
        }

        let multiplier = crate::demand::multiplier(crisis);
        totals
            .into_iter()
            .map(|(category, (quantity, count))| {
                let baseline = demand.baseline(&category);
                let record = SupplyGapRecord::from_totals(
                    category.clone(),
                    quantity,
                    count,
                    baseline,
                    multiplier,
                    &self.config,
                );
                (category, record)
            })
            .collect()
    }
}

/// Categories below `threshold` days, most urgent first.
///
/// Ordered by full-precision days of supply, then category name, so the
/// result is a strict total order and re-applying the filter is a no-op.
pub fn critical_categories<'a, I>(records: I, threshold: f64) -> Vec<SupplyGapRecord>
where
    I: IntoIterator<Item = &'a SupplyGapRecord>,
{
    let mut out: Vec<SupplyGapRecord> = records
        .into_iter()
        .filter(|r| r.days_of_supply < threshold)
        .cloned()
        .collect();
    out.sort_by(compare_urgency);
    out
}

fn compare_urgency(a: &SupplyGapRecord, b: &SupplyGapRecord) -> Ordering {
    a.days_of_supply
        .total_cmp(&b.days_of_supply)
        .then_with(|| a.category.cmp(&b.category))
}
