//! Lead tiers: how warm a supplier relationship is, from contact recency.
//!
//! Tiers are never stored; they are recomputed against the reference instant
//! on every call.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pantry_core::{days_since, Category};

use crate::supplier::Supplier;

/// Contacted within this many days: hot.
pub const HOT_MAX_DAYS: i64 = 30;
/// Contacted within this many days (and not hot): warm.
pub const WARM_MAX_DAYS: i64 = 90;

/// Engagement tier. Declaration order is outreach order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadTier {
    Hot,
    Warm,
    Cold,
}

impl LeadTier {
    /// Classify by days since last contact (`None`: never contacted).
    ///
    /// Total: every input maps to exactly one tier. Future-dated contacts
    /// (negative days) count as hot.
    pub fn from_days_since(days: Option<i64>) -> Self {
        match days {
            Some(d) if d <= HOT_MAX_DAYS => LeadTier::Hot,
            Some(d) if d <= WARM_MAX_DAYS => LeadTier::Warm,
            _ => LeadTier::Cold,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LeadTier::Hot => "hot",
            LeadTier::Warm => "warm",
            LeadTier::Cold => "cold",
        }
    }

    /// Short relationship description for outreach briefs.
    pub fn rationale(self) -> &'static str {
        match self {
            LeadTier::Hot => "donated recently",
            LeadTier::Warm => "donated in the last 90 days",
            LeadTier::Cold => "not donated recently",
        }
    }
}

impl core::fmt::Display for LeadTier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tier for a last-contact date relative to `reference`.
pub fn classify(last_contact: Option<DateTime<Utc>>, reference: DateTime<Utc>) -> LeadTier {
    LeadTier::from_days_since(days_since(last_contact, reference))
}

/// A supplier with its computed tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedSupplier {
    #[serde(flatten)]
    pub supplier: Supplier,
    pub tier: LeadTier,
    pub days_since_contact: Option<i64>,
}

impl RankedSupplier {
    pub fn new(supplier: Supplier, reference: DateTime<Utc>) -> Self {
        let days_since_contact = days_since(supplier.last_contact, reference);
        Self {
            tier: LeadTier::from_days_since(days_since_contact),
            days_since_contact,
            supplier,
        }
    }
}

/// Suppliers partitioned by tier, input order kept within each tier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Segments {
    pub hot: Vec<RankedSupplier>,
    pub warm: Vec<RankedSupplier>,
    pub cold: Vec<RankedSupplier>,
}

impl Segments {
    pub fn len(&self) -> usize {
        self.hot.len() + self.warm.len() + self.cold.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Partition every supplier into exactly one tier.
pub fn segment_suppliers(suppliers: &[Supplier], reference: DateTime<Utc>) -> Segments {
    let mut segments = Segments::default();
    for s in suppliers {
        let ranked = RankedSupplier::new(s.clone(), reference);
        match ranked.tier {
            LeadTier::Hot => segments.hot.push(ranked),
            LeadTier::Warm => segments.warm.push(ranked),
            LeadTier::Cold => segments.cold.push(ranked),
        }
    }
    segments
}

/// Outreach candidates for `category`, hot before warm before cold.
///
/// A supplier qualifies if it prefers the category or states no preference.
/// The sort is stable, so input order decides within a tier.
pub fn suppliers_for_category(
    suppliers: &[Supplier],
    category: &Category,
    reference: DateTime<Utc>,
) -> Vec<RankedSupplier> {
    let mut out: Vec<RankedSupplier> = suppliers
        .iter()
        .filter(|s| s.accepts(category))
        .map(|s| RankedSupplier::new(s.clone(), reference))
        .collect();
    out.sort_by_key(|r| r.tier);
    out
}
