//! Data-store boundary for supplier records.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use tracing::warn;

use pantry_core::temporal::lenient_date;
use pantry_core::{duplicate_ids, Category, DomainError, RecordSet, RejectedRecord, SupplierId};

use crate::supplier::{Donation, Supplier};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSupplier {
    pub supplier_id: Option<String>,
    #[serde(rename = "supplier_id")]
    pub supplier_id_legacy: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "supplier_name")]
    pub supplier_name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "contact_email")]
    pub contact_email: Option<String>,
    pub preferred_categories: Option<Vec<String>>,
    #[serde(rename = "preferred_donation_categories")]
    pub preferred_donation_categories: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub last_contact_date: Option<DateTime<Utc>>,
    #[serde(default, rename = "last_contact_date", deserialize_with = "lenient_date")]
    pub last_contact_date_legacy: Option<DateTime<Utc>>,
    #[serde(default)]
    pub response_rate: JsonValue,
    pub donation_history: Option<Vec<RawDonation>>,
    #[serde(rename = "donation_history")]
    pub donation_history_legacy: Option<Vec<RawDonation>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDonation {
    #[serde(default, deserialize_with = "lenient_date")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub items: Vec<String>,
    pub item_name: Option<String>,
    #[serde(default)]
    pub quantity: JsonValue,
    pub unit: Option<String>,
}

/// Result of normalizing a supplier collection.
#[derive(Debug, Clone, Default)]
pub struct NormalizedSuppliers {
    pub suppliers: Vec<Supplier>,
    pub rejected: Vec<RejectedRecord>,
}

/// Normalize raw supplier records; one bad record never aborts the rest.
pub fn normalize_suppliers(raw: RecordSet<JsonValue>) -> NormalizedSuppliers {
    let mut out = NormalizedSuppliers::default();

    for (key, value) in raw.into_entries() {
        let result = serde_json::from_value::<RawSupplier>(value)
            .map_err(|e| DomainError::validation(e.to_string()))
            .and_then(|r| canonical_supplier(r, key.as_deref()));

        match result {
            Ok(s) => out.suppliers.push(s),
            Err(e) => {
                warn!(record = key.as_deref().unwrap_or("<unkeyed>"), error = %e, "supplier record rejected");
                out.rejected.push(RejectedRecord::new(key, e));
            }
        }
    }

    for id in duplicate_ids(&out.suppliers) {
        warn!(supplier_id = %id, "supplier id appears more than once");
    }
    out
}

fn canonical_supplier(raw: RawSupplier, store_key: Option<&str>) -> Result<Supplier, DomainError> {
    let id = raw
        .supplier_id
        .as_deref()
        .or(raw.supplier_id_legacy.as_deref())
        .or(store_key)
        .ok_or_else(|| DomainError::invalid_id("supplier record has no id"))
        .and_then(|id| SupplierId::new(id))?;

    let name = raw
        .name
        .or(raw.supplier_name)
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| id.to_string());

    let mut preferred_categories: Vec<Category> = Vec::new();
    for tag in raw
        .preferred_categories
        .or(raw.preferred_donation_categories)
        .unwrap_or_default()
    {
        // Blank entries carry no preference.
        if let Ok(c) = tag.parse::<Category>() {
            if !preferred_categories.contains(&c) {
                preferred_categories.push(c);
            }
        }
    }

    let response_rate = match &raw.response_rate {
        JsonValue::Number(n) => n.as_f64().filter(|r| r.is_finite()).unwrap_or(0.0),
        JsonValue::String(s) => s.trim().parse::<f64>().ok().filter(|r| r.is_finite()).unwrap_or(0.0),
        _ => 0.0,
    }
    .clamp(0.0, 1.0);

    let donation_history = raw
        .donation_history
        .or(raw.donation_history_legacy)
        .unwrap_or_default()
        .into_iter()
        .map(|d| {
            let mut items = d.items;
            if items.is_empty() {
                items.extend(d.item_name);
            }
            Donation {
                date: d.date,
                items,
                quantity: match d.quantity {
                    JsonValue::Number(n) => n.as_f64().unwrap_or(0.0),
                    JsonValue::String(s) => s.trim().parse().unwrap_or(0.0),
                    _ => 0.0,
                },
                unit: d.unit.unwrap_or_default(),
            }
        })
        .collect();

    Ok(Supplier {
        id,
        name,
        supplier_type: raw.kind.unwrap_or_default(),
        email: raw.email.or(raw.contact_email).unwrap_or_default(),
        preferred_categories,
        last_contact: raw.last_contact_date.or(raw.last_contact_date_legacy),
        response_rate,
        donation_history,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn merges_legacy_spellings() {
        let raw: RecordSet<JsonValue> = serde_json::from_value(json!({
            "sup_001": {
                "supplier_name": "Green Acres Farm",
                "type": "farm",
                "contact_email": "farm@example.com",
                "preferred_donation_categories": ["fruit", "Vegetable", "fruit", ""],
                "last_contact_date": "2025-11-01",
                "responseRate": 1.7,
                "donation_history": [
                    { "date": "2025-10-30", "itemName": "Apples", "quantity": "40", "unit": "lbs" }
                ]
            }
        }))
        .unwrap();

        let out = normalize_suppliers(raw);
        assert!(out.rejected.is_empty());
        let s = &out.suppliers[0];
        assert_eq!(s.id.as_str(), "sup_001");
        assert_eq!(s.name, "Green Acres Farm");
        assert_eq!(s.email, "farm@example.com");
        assert_eq!(s.preferred_categories, vec![Category::Fruit, Category::Vegetable]);
        assert!(s.last_contact.is_some());
        assert_eq!(s.response_rate, 1.0);
        let d = s.most_recent_donation().unwrap();
        assert_eq!(d.items, vec!["Apples".to_string()]);
        assert_eq!(d.quantity, 40.0);
    }

    #[test]
    fn missing_fields_get_neutral_defaults() {
        let raw = RecordSet::List(vec![json!({ "supplierId": "s1" })]);
        let s = &normalize_suppliers(raw).suppliers[0];
        assert_eq!(s.name, "s1");
        assert!(s.preferred_categories.is_empty());
        assert!(s.last_contact.is_none());
        assert_eq!(s.response_rate, 0.0);
    }

    #[test]
    fn records_without_id_are_rejected_alone() {
        let raw = RecordSet::List(vec![
            json!({ "name": "anonymous" }),
            json!({ "supplierId": "s2", "preferredCategories": 7 }),
            json!({ "supplierId": "s3" }),
        ]);
        let out = normalize_suppliers(raw);
        assert_eq!(out.suppliers.len(), 1);
        assert_eq!(out.suppliers[0].id.as_str(), "s3");
        assert_eq!(out.rejected.len(), 2);
    }
}
