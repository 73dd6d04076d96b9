//! `analyzeInventory`: supply gaps, critical categories and expiring stock in
//! one pass over a snapshot.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::debug;

use pantry_core::{Category, DomainError, DomainResult, RecordSet, RejectedRecord};

use crate::config::AnalysisConfig;
use crate::demand::{normalize_analytics, AnalyticsSnapshot, RawAnalytics};
use crate::expiration::{ExpirationScanner, ExpiringItem};
use crate::item::InventoryItem;
use crate::normalize::normalize_inventory;
use crate::supply_gap::{critical_categories, SupplyGapAnalyzer, SupplyGapRecord};

/// Canonical inventory plus the analytics it is measured against.
#[derive(Debug, Clone, Default)]
pub struct InventorySnapshot {
    pub items: Vec<InventoryItem>,
    pub analytics: AnalyticsSnapshot,
    /// Records dropped during normalization.
    pub rejected: Vec<RejectedRecord>,
}

impl InventorySnapshot {
    pub fn new(items: Vec<InventoryItem>, analytics: AnalyticsSnapshot) -> Self {
        Self {
            items,
            analytics,
            rejected: Vec::new(),
        }
    }

    /// Normalize raw store collections.
    ///
    /// Fails only when the inventory collection itself is absent; bad
    /// individual records end up in `rejected`.
    pub fn from_raw(
        inventory: Option<RecordSet<JsonValue>>,
        analytics: Option<RawAnalytics>,
    ) -> DomainResult<Self> {
        let inventory = inventory.ok_or_else(|| DomainError::missing_data("inventory"))?;
        let normalized = normalize_inventory(inventory);
        debug!(
            accepted = normalized.items.len(),
            rejected = normalized.rejected.len(),
            "inventory snapshot normalized"
        );
        Ok(Self {
            items: normalized.items,
            analytics: normalize_analytics(analytics),
            rejected: normalized.rejected,
        })
    }

    pub fn active_items(&self) -> impl Iterator<Item = &InventoryItem> {
        self.items.iter().filter(|i| i.is_active())
    }
}

/// Result of [`analyze_inventory`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryAnalysis {
    pub supply_gaps: BTreeMap<Category, SupplyGapRecord>,
    pub critical_categories: Vec<SupplyGapRecord>,
    pub expiring_items: Vec<ExpiringItem>,
    pub active_item_count: usize,
    pub rejected: Vec<RejectedRecord>,
}

impl InventoryAnalysis {
    /// The most urgent category, if any is below the critical threshold.
    pub fn most_critical(&self) -> Option<&SupplyGapRecord> {
        self.critical_categories.first()
    }
}

/// Analyze one snapshot.
///
/// Pure: the same snapshot, reference instant and config always give the same
/// result.
pub fn analyze_inventory(
    snapshot: &InventorySnapshot,
    reference: DateTime<Utc>,
    config: &AnalysisConfig,
) -> InventoryAnalysis {
    let crisis = snapshot.analytics.active_crisis();
    let supply_gaps = SupplyGapAnalyzer::new(config.clone()).analyze(
        &snapshot.items,
        &snapshot.analytics.demand,
        crisis,
    );
    let critical = critical_categories(supply_gaps.values(), config.critical_days);
    let expiring_items = ExpirationScanner::from_config(config).scan(&snapshot.items, reference);

    InventoryAnalysis {
        critical_categories: critical,
        expiring_items,
        active_item_count: snapshot.active_items().count(),
        rejected: snapshot.rejected.clone(),
        supply_gaps,
    }
}
