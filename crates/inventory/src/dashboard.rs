//! Dashboard summary over one inventory snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pantry_core::Category;

use crate::analysis::InventorySnapshot;
use crate::config::AnalysisConfig;
use crate::distribution::{recent_distributions, Distribution};
use crate::expiration::expiring_count;
use crate::item::InventoryItem;
use crate::priority::{high_priority_count, PriorityScorer, ScoredItem};
use crate::supply_gap::{critical_categories, round_tenth, SupplyGapAnalyzer, SupplyGapRecord};

/// A category share below this percentage marks the mix as imbalanced.
pub const IMBALANCE_PCT: f64 = 15.0;

const RECENT_DISTRIBUTIONS: usize = 5;

/// Share of total stock weight held by one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub category: Category,
    pub weight: f64,
    /// Percent of total weight, one decimal.
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryMix {
    pub shares: Vec<CategoryShare>,
    pub imbalanced: bool,
}

/// Weight share per category of interest.
pub fn category_mix<'a, I>(items: &[InventoryItem], categories: I) -> CategoryMix
where
    I: IntoIterator<Item = &'a Category>,
{
    let active: Vec<&InventoryItem> = items.iter().filter(|i| i.is_active()).collect();
    let total: f64 = active.iter().map(|i| i.weight).sum();

    let shares: Vec<CategoryShare> = categories
        .into_iter()
        .map(|c| {
            let weight: f64 = active.iter().filter(|i| &i.category == c).map(|i| i.weight).sum();
            let percentage = if total > 0.0 { weight / total * 100.0 } else { 0.0 };
            CategoryShare {
                category: c.clone(),
                weight,
                percentage: round_tenth(percentage),
            }
        })
        .collect();

    let imbalanced = shares.iter().any(|s| s.percentage < IMBALANCE_PCT);
    CategoryMix { shares, imbalanced }
}

/// Headline numbers for the inventory dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub active_items: usize,
    pub expiring_count: usize,
    pub high_priority_count: usize,
    pub low_stock_categories: Vec<SupplyGapRecord>,
    pub top_priority_items: Vec<ScoredItem>,
    pub category_mix: CategoryMix,
    pub recent_distributions: Vec<Distribution>,
}

impl DashboardSummary {
    pub fn build(
        snapshot: &InventorySnapshot,
        distributions: &[Distribution],
        reference: DateTime<Utc>,
        config: &AnalysisConfig,
    ) -> Self {
        let crisis = snapshot.analytics.active_crisis();
        let demand = &snapshot.analytics.demand;
        let items = snapshot.items.as_slice();

        let gaps = SupplyGapAnalyzer::new(config.clone()).analyze(items, demand, crisis);
        let ranked = PriorityScorer.rank(items, demand, crisis, reference);
        let high_priority = high_priority_count(&ranked);
        let mut top = ranked;
        top.truncate(config.top_n);

        Self {
            active_items: items.iter().filter(|i| i.is_active()).count(),
            expiring_count: expiring_count(items, reference, config.expiring_days),
            high_priority_count: high_priority,
            low_stock_categories: critical_categories(gaps.values(), config.critical_days),
            top_priority_items: top,
            category_mix: category_mix(items, demand.categories()),
            recent_distributions: recent_distributions(distributions, RECENT_DISTRIBUTIONS),
        }
    }
}
