//! Historical distribution records (read-only).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::warn;

use pantry_core::temporal::lenient_date;
use pantry_core::{DistributionId, RecordSet};

use crate::normalize::number;

/// One line of a distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionLine {
    pub item_id: Option<String>,
    pub item_name: String,
    pub quantity_taken: f64,
    pub unit: String,
}

/// A hand-out to a household.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    pub id: DistributionId,
    pub timestamp: Option<DateTime<Utc>>,
    pub recipient_name: String,
    pub household_size: u32,
    pub method: String,
    pub eligibility_verified: bool,
    pub items: Vec<DistributionLine>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDistribution {
    distribution_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_date")]
    timestamp: Option<DateTime<Utc>>,
    recipient_name: Option<String>,
    #[serde(default)]
    household_size: JsonValue,
    distribution_method: Option<String>,
    #[serde(default)]
    eligibility_verified: bool,
    #[serde(default)]
    items: Vec<RawDistributionLine>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDistributionLine {
    item_id: Option<String>,
    item_name: Option<String>,
    #[serde(default)]
    quantity_taken: JsonValue,
    unit_type: Option<String>,
}

/// Normalize stored distributions; malformed records are skipped.
pub fn normalize_distributions(raw: RecordSet<JsonValue>) -> Vec<Distribution> {
    raw.into_entries()
        .into_iter()
        .filter_map(|(key, value)| {
            let record = match serde_json::from_value::<RawDistribution>(value) {
                Ok(r) => r,
                Err(e) => {
                    warn!(record = key.as_deref().unwrap_or("<unkeyed>"), error = %e, "distribution record skipped");
                    return None;
                }
            };
            let id = record
                .distribution_id
                .as_deref()
                .or(key.as_deref())
                .and_then(|id| DistributionId::new(id).ok())?;

            Some(Distribution {
                id,
                timestamp: record.timestamp,
                recipient_name: record.recipient_name.unwrap_or_default(),
                household_size: number(&record.household_size).map_or(0, |n| n.max(0.0) as u32),
                method: record.distribution_method.unwrap_or_default(),
                eligibility_verified: record.eligibility_verified,
                items: record
                    .items
                    .into_iter()
                    .map(|l| DistributionLine {
                        item_id: l.item_id,
                        item_name: l.item_name.unwrap_or_default(),
                        quantity_taken: number(&l.quantity_taken).unwrap_or(0.0),
                        unit: l.unit_type.unwrap_or_default(),
                    })
                    .collect(),
            })
        })
        .collect()
}

/// The `n` most recent distributions, newest first; undated records last.
pub fn recent_distributions(records: &[Distribution], n: usize) -> Vec<Distribution> {
    let mut sorted: Vec<Distribution> = records.to_vec();
    sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    sorted.truncate(n);
    sorted
}
