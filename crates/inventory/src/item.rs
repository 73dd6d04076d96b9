use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pantry_core::{Category, Entity, ItemId};

/// How fast an item spoils once received.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerishabilityTier {
    /// Must move within roughly 48 hours.
    #[serde(rename = "high_48h")]
    High,
    /// Roughly a week.
    #[serde(rename = "medium_7d")]
    Medium,
    /// Roughly a month.
    #[serde(rename = "low_30d")]
    Low,
    ShelfStable,
}

impl PerishabilityTier {
    /// Parse a stored tier tag; unknown or missing tags are shelf-stable.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_lowercase()).as_deref() {
            Some("high_48h") | Some("high") => PerishabilityTier::High,
            Some("medium_7d") | Some("medium") => PerishabilityTier::Medium,
            Some("low_30d") | Some("low") => PerishabilityTier::Low,
            _ => PerishabilityTier::ShelfStable,
        }
    }
}

/// Storage requirement.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandlingType {
    Frozen,
    Refrigerated,
    NonPerishable,
}

impl HandlingType {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_lowercase()).as_deref() {
            Some("frozen") => HandlingType::Frozen,
            Some("refrigerated") => HandlingType::Refrigerated,
            _ => HandlingType::NonPerishable,
        }
    }
}

/// Lifecycle of a stock record.
///
/// Deleted records stay in the store for audit but never reach analytics.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    Available,
    Distributed,
    Deleted,
}

impl ItemStatus {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_lowercase()).as_deref() {
            Some("deleted") => ItemStatus::Deleted,
            Some("distributed") => ItemStatus::Distributed,
            _ => ItemStatus::Available,
        }
    }
}

/// Canonical inventory record.
///
/// Produced once at the data-store boundary by
/// [`normalize_inventory`](crate::normalize::normalize_inventory); every
/// analyzer assumes this shape and never looks at raw field variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: ItemId,
    pub name: String,
    pub category: Category,
    /// Always finite and `>= 0`.
    pub quantity: f64,
    pub unit: String,
    /// `None` when the store had no usable date (treated as far future).
    pub best_by: Option<DateTime<Utc>>,
    pub perishability: PerishabilityTier,
    pub handling: HandlingType,
    pub funding_source: Option<String>,
    pub recipient_eligibility: Option<String>,
    pub family_max: f64,
    pub weight: f64,
    pub lot_number: Option<String>,
    pub status: ItemStatus,
}

impl InventoryItem {
    /// Minimal record with neutral defaults; mostly for tests and fixtures.
    pub fn new(id: ItemId, name: impl Into<String>, category: Category, quantity: f64) -> Self {
        Self {
            id,
            name: name.into(),
            category,
            quantity,
            unit: String::new(),
            best_by: None,
            perishability: PerishabilityTier::ShelfStable,
            handling: HandlingType::NonPerishable,
            funding_source: None,
            recipient_eligibility: None,
            family_max: 0.0,
            weight: 0.0,
            lot_number: None,
            status: ItemStatus::Available,
        }
    }

    pub fn with_best_by(mut self, best_by: DateTime<Utc>) -> Self {
        self.best_by = Some(best_by);
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_status(mut self, status: ItemStatus) -> Self {
        self.status = status;
        self
    }

    /// Whether the record takes part in analytics.
    pub fn is_active(&self) -> bool {
        self.status != ItemStatus::Deleted
    }
}

impl Entity for InventoryItem {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_tags_parse_with_shelf_stable_default() {
        assert_eq!(PerishabilityTier::parse(Some("high_48h")), PerishabilityTier::High);
        assert_eq!(PerishabilityTier::parse(Some("MEDIUM_7D")), PerishabilityTier::Medium);
        assert_eq!(PerishabilityTier::parse(Some("low_30d")), PerishabilityTier::Low);
        assert_eq!(PerishabilityTier::parse(Some("weird")), PerishabilityTier::ShelfStable);
        assert_eq!(PerishabilityTier::parse(None), PerishabilityTier::ShelfStable);
    }

    #[test]
    fn tier_serializes_with_stored_tags() {
        let json = serde_json::to_string(&PerishabilityTier::High).unwrap();
        assert_eq!(json, "\"high_48h\"");
        let json = serde_json::to_string(&PerishabilityTier::ShelfStable).unwrap();
        assert_eq!(json, "\"shelf_stable\"");
    }

    #[test]
    fn handling_defaults_to_non_perishable() {
        assert_eq!(HandlingType::parse(Some("frozen")), HandlingType::Frozen);
        assert_eq!(HandlingType::parse(None), HandlingType::NonPerishable);
    }

    #[test]
    fn deleted_items_are_inactive() {
        let item = InventoryItem::new(ItemId::new("a").unwrap(), "Rice", Category::Grain, 5.0);
        assert!(item.is_active());
        assert!(item.clone().with_status(ItemStatus::Distributed).is_active());
        assert!(!item.with_status(ItemStatus::Deleted).is_active());
    }
}
