//! Data-store boundary: raw inventory records -> canonical [`InventoryItem`]s.
//!
//! The store has accumulated several spellings for the same field over time
//! (`category` / `foodCategory`, `name` / `item_name`, ...). They are merged
//! here, once; a record that cannot be made canonical is rejected on its own
//! and never aborts the batch.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use tracing::warn;

use pantry_core::temporal::lenient_date;
use pantry_core::{duplicate_ids, Category, DomainError, ItemId, RecordSet, RejectedRecord};

use crate::item::{HandlingType, InventoryItem, ItemStatus, PerishabilityTier};

/// Inventory record exactly as stored, every legacy spelling included.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawInventoryRecord {
    pub item_id: Option<String>,
    #[serde(rename = "item_id")]
    pub item_id_legacy: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "item_name")]
    pub item_name: Option<String>,
    pub food_category: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub quantity: JsonValue,
    #[serde(alias = "unit")]
    pub unit_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub best_by_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub perish_date: Option<DateTime<Utc>>,
    #[serde(default, rename = "perish_date", deserialize_with = "lenient_date")]
    pub perish_date_legacy: Option<DateTime<Utc>>,
    pub perishability_tier: Option<String>,
    pub handling_type: Option<String>,
    pub funding_source: Option<String>,
    pub recipient_eligibility: Option<String>,
    #[serde(default)]
    pub family_max: JsonValue,
    #[serde(default)]
    pub weight: JsonValue,
    pub lot_number: Option<String>,
    pub status: Option<String>,
}

/// Result of normalizing one inventory collection.
#[derive(Debug, Clone, Default)]
pub struct NormalizedInventory {
    /// Canonical records, deleted ones included (they are filtered later).
    pub items: Vec<InventoryItem>,
    pub rejected: Vec<RejectedRecord>,
}

/// Normalize a raw inventory collection.
///
/// Records arrive as untyped JSON so that a single record with a wrong field
/// type is rejected alone instead of failing deserialization of the lot.
pub fn normalize_inventory(raw: RecordSet<JsonValue>) -> NormalizedInventory {
    let mut out = NormalizedInventory::default();

    for (key, value) in raw.into_entries() {
        let record = match serde_json::from_value::<RawInventoryRecord>(value) {
            Ok(r) => r,
            Err(e) => {
                reject(&mut out.rejected, key, DomainError::validation(e.to_string()));
                continue;
            }
        };

        match canonical_item(record, key.as_deref()) {
            Ok(item) => out.items.push(item),
            Err((id, e)) => reject(&mut out.rejected, id.or(key), e),
        }
    }

    for id in duplicate_ids(&out.items) {
        warn!(item_id = %id, "inventory id appears more than once");
    }
    out
}

fn reject(rejected: &mut Vec<RejectedRecord>, key: Option<String>, reason: DomainError) {
    warn!(record = key.as_deref().unwrap_or("<unkeyed>"), error = %reason, "inventory record rejected");
    rejected.push(RejectedRecord::new(key, reason));
}

/// Turn one raw record into the canonical shape.
///
/// Errors carry the best identifier found so the rejection can be traced.
fn canonical_item(
    raw: RawInventoryRecord,
    store_key: Option<&str>,
) -> Result<InventoryItem, (Option<String>, DomainError)> {
    let raw_id = first_non_blank([raw.item_id.as_deref(), raw.item_id_legacy.as_deref(), store_key]);
    let id = match raw_id {
        Some(id) => ItemId::new(id).map_err(|e| (None, e))?,
        None => return Err((None, DomainError::invalid_id("inventory record has no id"))),
    };
    let fail = |e: DomainError| (Some(id.to_string()), e);

    let category = first_non_blank([raw.food_category.as_deref(), raw.category.as_deref()])
        .ok_or_else(|| fail(DomainError::validation("category is missing")))?
        .parse::<Category>()
        .map_err(fail)?;

    let quantity = number(&raw.quantity)
        .ok_or_else(|| fail(DomainError::validation("quantity is missing or not numeric")))?;
    if quantity < 0.0 {
        return Err(fail(DomainError::invariant("quantity cannot be negative")));
    }

    let name = first_non_blank([raw.name.as_deref(), raw.item_name.as_deref()])
        .unwrap_or("item")
        .to_string();

    Ok(InventoryItem {
        name,
        category,
        quantity,
        unit: raw.unit_type.unwrap_or_default(),
        best_by: raw.best_by_date.or(raw.perish_date_legacy).or(raw.perish_date),
        perishability: PerishabilityTier::parse(raw.perishability_tier.as_deref()),
        handling: HandlingType::parse(raw.handling_type.as_deref()),
        funding_source: non_blank(raw.funding_source),
        recipient_eligibility: non_blank(raw.recipient_eligibility),
        family_max: number(&raw.family_max).unwrap_or(0.0).max(0.0),
        weight: number(&raw.weight).unwrap_or(0.0).max(0.0),
        lot_number: non_blank(raw.lot_number),
        status: ItemStatus::parse(raw.status.as_deref()),
        id,
    })
}

/// Numbers may be stored as JSON numbers or numeric strings.
pub(crate) fn number(value: &JsonValue) -> Option<f64> {
    let n = match value {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

fn first_non_blank<'a, const N: usize>(candidates: [Option<&'a str>; N]) -> Option<&'a str> {
    candidates
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn keyed(value: JsonValue) -> RecordSet<JsonValue> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn merges_legacy_field_spellings() {
        let raw = keyed(json!({
            "inv_001": {
                "item_name": "Chicken Breast",
                "foodCategory": "protein",
                "category": "canned",
                "quantity": "45",
                "unitType": "lbs",
                "perishDate": "2025-11-18",
                "perishabilityTier": "high_48h",
                "handlingType": "frozen",
                "weight": 45,
                "status": "available"
            }
        }));

        let out = normalize_inventory(raw);
        assert!(out.rejected.is_empty());
        let item = &out.items[0];
        assert_eq!(item.id.as_str(), "inv_001");
        assert_eq!(item.name, "Chicken Breast");
        assert_eq!(item.category, Category::Protein);
        assert_eq!(item.quantity, 45.0);
        assert_eq!(item.unit, "lbs");
        assert_eq!(item.best_by, Some(Utc.with_ymd_and_hms(2025, 11, 18, 0, 0, 0).unwrap()));
        assert_eq!(item.perishability, PerishabilityTier::High);
        assert_eq!(item.handling, HandlingType::Frozen);
        assert_eq!(item.weight, 45.0);
    }

    #[test]
    fn record_id_wins_over_store_key() {
        let raw = keyed(json!({ "k1": { "itemId": "inv_9", "category": "fruit", "quantity": 1 } }));
        let out = normalize_inventory(raw);
        assert_eq!(out.items[0].id.as_str(), "inv_9");
    }

    #[test]
    fn missing_category_or_quantity_is_rejected_alone() {
        let raw = RecordSet::List(vec![
            json!({ "itemId": "a", "quantity": 3 }),
            json!({ "itemId": "b", "category": "dairy" }),
            json!({ "itemId": "c", "category": "dairy", "quantity": -1 }),
            json!({ "itemId": "d", "category": "dairy", "quantity": 2 }),
            json!("not even an object"),
        ]);

        let out = normalize_inventory(raw);
        assert_eq!(out.items.len(), 1);
        assert_eq!(out.items[0].id.as_str(), "d");
        assert_eq!(out.rejected.len(), 4);
        assert_eq!(out.rejected[0].key.as_deref(), Some("a"));
    }

    #[test]
    fn unparsable_date_becomes_none() {
        let raw = RecordSet::List(vec![json!({
            "itemId": "x", "category": "grain", "quantity": 1, "bestByDate": "someday"
        })]);
        let out = normalize_inventory(raw);
        assert_eq!(out.items[0].best_by, None);
    }

    #[test]
    fn deleted_records_are_kept_for_audit() {
        let raw = RecordSet::List(vec![json!({
            "itemId": "x", "category": "grain", "quantity": 1, "status": "deleted"
        })]);
        let out = normalize_inventory(raw);
        assert_eq!(out.items[0].status, ItemStatus::Deleted);
    }

    #[test]
    fn number_accepts_strings_and_rejects_junk() {
        assert_eq!(number(&json!(2.5)), Some(2.5));
        assert_eq!(number(&json!(" 7 ")), Some(7.0));
        assert_eq!(number(&json!("seven")), None);
        assert_eq!(number(&JsonValue::Null), None);
    }
}
