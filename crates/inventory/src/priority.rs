//! Per-item urgency ranking.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pantry_core::days_until;

use crate::demand::{CrisisState, DemandProfile};
use crate::item::InventoryItem;

/// Scores above this count as "high priority" on the dashboard.
pub const HIGH_PRIORITY_SCORE: f64 = 80.0;

const MAX_SCORE: f64 = 100.0;
const POINTS_PER_DAY: f64 = 10.0;

/// An item with its urgency score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredItem {
    #[serde(flatten)]
    pub item: InventoryItem,
    /// In `[0, 100]`; higher is more urgent.
    pub priority: f64,
    /// Item-local days of supply against crisis-adjusted demand.
    pub days_of_supply: f64,
    /// Baseline demand of the item's category.
    pub daily_demand: f64,
    pub days_until_expiration: i64,
}

/// Ranks individual items by scarcity.
///
/// The score uses the item's own quantity against its category's demand (an
/// item-local approximation, not the aggregated category record):
/// `100 - 10 * quantity / (baseline * multiplier)`, clamped to `[0, 100]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriorityScorer;

impl PriorityScorer {
    pub fn score(
        &self,
        item: &InventoryItem,
        demand: &DemandProfile,
        crisis: Option<&CrisisState>,
        reference: DateTime<Utc>,
    ) -> ScoredItem {
        let daily_demand = demand.baseline(&item.category);
        let effective = demand.effective(&item.category, crisis);
        let days_of_supply = if effective > 0.0 {
            item.quantity / effective
        } else {
            0.0
        };

        ScoredItem {
            item: item.clone(),
            priority: clamp_score(MAX_SCORE - POINTS_PER_DAY * days_of_supply),
            days_of_supply,
            daily_demand,
            days_until_expiration: days_until(item.best_by, reference),
        }
    }

    /// Active items by descending priority.
    ///
    /// The sort is stable, so equal scores keep input order and the ranking
    /// is reproducible.
    pub fn rank(
        &self,
        items: &[InventoryItem],
        demand: &DemandProfile,
        crisis: Option<&CrisisState>,
        reference: DateTime<Utc>,
    ) -> Vec<ScoredItem> {
        let mut scored: Vec<ScoredItem> = items
            .iter()
            .filter(|i| i.is_active())
            .map(|i| self.score(i, demand, crisis, reference))
            .collect();
        scored.sort_by(|a, b| b.priority.total_cmp(&a.priority));
        scored
    }

    /// The first `n` entries of [`rank`](Self::rank).
    pub fn top_n(
        &self,
        items: &[InventoryItem],
        demand: &DemandProfile,
        crisis: Option<&CrisisState>,
        reference: DateTime<Utc>,
        n: usize,
    ) -> Vec<ScoredItem> {
        let mut ranked = self.rank(items, demand, crisis, reference);
        ranked.truncate(n);
        ranked
    }
}

fn clamp_score(raw: f64) -> f64 {
    if raw.is_nan() {
        return MAX_SCORE;
    }
    raw.clamp(0.0, MAX_SCORE)
}

/// How many ranked items clear [`HIGH_PRIORITY_SCORE`].
pub fn high_priority_count(ranked: &[ScoredItem]) -> usize {
    ranked.iter().filter(|s| s.priority > HIGH_PRIORITY_SCORE).count()
}
