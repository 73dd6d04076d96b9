//! Inventory analytics.
//!
//! Pure, deterministic computations over an inventory snapshot (no IO, no
//! clock reads): supply gaps per category, expiring stock, per-item priority
//! and the dashboard summary built from them.

pub mod analysis;
pub mod config;
pub mod dashboard;
pub mod demand;
pub mod distribution;
pub mod expiration;
pub mod item;
pub mod normalize;
pub mod priority;
pub mod supply_gap;

pub use analysis::{analyze_inventory, InventoryAnalysis, InventorySnapshot};
pub use config::{AnalysisConfig, ExpiredBound};
pub use dashboard::{category_mix, CategoryMix, CategoryShare, DashboardSummary};
pub use demand::{
    normalize_analytics, AnalyticsSnapshot, CrisisState, DemandProfile, RawAnalytics,
    FALLBACK_DAILY_DEMAND,
};
pub use distribution::{normalize_distributions, recent_distributions, Distribution, DistributionLine};
pub use expiration::{expiring_count, ExpirationBand, ExpirationScanner, ExpiringItem};
pub use item::{HandlingType, InventoryItem, ItemStatus, PerishabilityTier};
pub use normalize::{normalize_inventory, NormalizedInventory, RawInventoryRecord};
pub use pantry_core::RejectedRecord;
pub use priority::{high_priority_count, PriorityScorer, ScoredItem, HIGH_PRIORITY_SCORE};
pub use supply_gap::{critical_categories, SupplyGapAnalyzer, SupplyGapRecord, SupplyStatus};
