//! Expiration risk: items about to spoil.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pantry_core::days_until;

use crate::config::{AnalysisConfig, ExpiredBound};
use crate::item::InventoryItem;

/// Badge tier for days remaining before the best-by date.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpirationBand {
    /// One day or less (already expired included).
    Critical,
    /// Within three days.
    Warning,
    /// Within a week.
    Watch,
    Fresh,
}

impl ExpirationBand {
    pub fn for_days(days: i64) -> Self {
        match days {
            d if d <= 1 => ExpirationBand::Critical,
            d if d <= 3 => ExpirationBand::Warning,
            d if d <= 7 => ExpirationBand::Watch,
            _ => ExpirationBand::Fresh,
        }
    }
}

/// An item flagged by the scanner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpiringItem {
    #[serde(flatten)]
    pub item: InventoryItem,
    pub days_until_expiration: i64,
    pub band: ExpirationBand,
}

/// Flags stock nearing spoilage.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ExpirationScanner {
    threshold_days: i64,
    bound: ExpiredBound,
}

impl Default for ExpirationScanner {
    fn default() -> Self {
        Self::from_config(&AnalysisConfig::default())
    }
}

impl ExpirationScanner {
    pub fn new(threshold_days: i64, bound: ExpiredBound) -> Self {
        Self {
            threshold_days,
            bound,
        }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(config.expiring_days, config.expired_bound)
    }

    fn in_window(&self, days: i64) -> bool {
        let above_floor = match self.bound {
            ExpiredBound::Exclusive => days > 0,
            ExpiredBound::Inclusive => true,
        };
        above_floor && days <= self.threshold_days
    }

    /// Active items inside the window, soonest first.
    ///
    /// Items without a usable best-by date sit at the far-future sentinel and
    /// never qualify. Ties keep input order.
    pub fn scan(&self, items: &[InventoryItem], reference: DateTime<Utc>) -> Vec<ExpiringItem> {
        let mut out: Vec<ExpiringItem> = items
            .iter()
            .filter(|i| i.is_active())
            .filter_map(|i| {
                let days = days_until(i.best_by, reference);
                self.in_window(days).then(|| ExpiringItem {
                    item: i.clone(),
                    days_until_expiration: days,
                    band: ExpirationBand::for_days(days),
                })
            })
            .collect();
        out.sort_by_key(|e| e.days_until_expiration);
        out
    }
}

/// Dashboard "expiring soon" count: already-expired stock included.
pub fn expiring_count(items: &[InventoryItem], reference: DateTime<Utc>, threshold_days: i64) -> usize {
    items
        .iter()
        .filter(|i| i.is_active())
        .filter(|i| days_until(i.best_by, reference) <= threshold_days)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use pantry_core::{Category, ItemId};

    fn reference() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 11, 16, 0, 0, 0).unwrap()
    }

    fn expiring_in(id: &str, days: i64) -> InventoryItem {
        InventoryItem::new(ItemId::new(id).unwrap(), id, Category::Fruit, 1.0)
            .with_best_by(reference() + Duration::days(days))
    }

    #[test]
    fn window_excludes_expired_by_default() {
        let items = vec![
            expiring_in("expired", -1),
            expiring_in("today", 0),
            expiring_in("three", 3),
            expiring_in("one", 1),
            expiring_in("four", 4),
        ];
        let found = ExpirationScanner::default().scan(&items, reference());
        let ids: Vec<&str> = found.iter().map(|e| e.item.id.as_str()).collect();
        assert_eq!(ids, vec!["one", "three"]);
        assert_eq!(found[0].band, ExpirationBand::Critical);
        assert_eq!(found[1].band, ExpirationBand::Warning);
    }

    #[test]
    fn inclusive_bound_keeps_expired_stock() {
        let items = vec![expiring_in("three", 3), expiring_in("expired", -2)];
        let found = ExpirationScanner::new(3, ExpiredBound::Inclusive).scan(&items, reference());
        let ids: Vec<&str> = found.iter().map(|e| e.item.id.as_str()).collect();
        assert_eq!(ids, vec!["expired", "three"]);
    }

    #[test]
    fn undated_and_deleted_items_never_expire() {
        let undated = InventoryItem::new(ItemId::new("u").unwrap(), "u", Category::Grain, 1.0);
        let deleted = expiring_in("d", 1).with_status(crate::item::ItemStatus::Deleted);
        let found = ExpirationScanner::default().scan(&[undated, deleted], reference());
        assert!(found.is_empty());
    }

    #[test]
    fn ties_keep_input_order() {
        let items = vec![expiring_in("b", 2), expiring_in("a", 2)];
        let found = ExpirationScanner::default().scan(&items, reference());
        assert_eq!(found[0].item.id.as_str(), "b");
    }

    #[test]
    fn dashboard_count_includes_expired() {
        let items = vec![expiring_in("expired", -1), expiring_in("two", 2), expiring_in("ten", 10)];
        assert_eq!(expiring_count(&items, reference(), 3), 2);
    }

    #[test]
    fn bands() {
        assert_eq!(ExpirationBand::for_days(-4), ExpirationBand::Critical);
        assert_eq!(ExpirationBand::for_days(1), ExpirationBand::Critical);
        assert_eq!(ExpirationBand::for_days(2), ExpirationBand::Warning);
        assert_eq!(ExpirationBand::for_days(7), ExpirationBand::Watch);
        assert_eq!(ExpirationBand::for_days(8), ExpirationBand::Fresh);
    }
}
