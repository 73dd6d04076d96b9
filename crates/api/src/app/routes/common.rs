use chrono::{DateTime, Utc};

use pantry_core::{parse_date, DomainError, RecordSet};
use pantry_inventory::{normalize_distributions, Distribution};
use pantry_suppliers::{normalize_suppliers, NormalizedSuppliers};
use serde_json::Value as JsonValue;

use crate::app::errors::ApiError;

/// The request's "now": the caller's `reference_date` if given, else the
/// clock, read once.
pub fn reference_time(reference_date: Option<&str>) -> Result<DateTime<Utc>, ApiError> {
    match reference_date.map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => parse_date(raw)
            .ok_or_else(|| ApiError::validation(format!("reference_date `{raw}` is not a date"))),
        None => Ok(Utc::now()),
    }
}

pub fn require_suppliers(raw: Option<RecordSet<JsonValue>>) -> Result<NormalizedSuppliers, ApiError> {
    let raw = raw.ok_or_else(|| DomainError::missing_data("suppliers"))?;
    Ok(normalize_suppliers(raw))
}

/// Distributions are optional context; absent means none.
pub fn distributions(raw: Option<RecordSet<JsonValue>>) -> Vec<Distribution> {
    raw.map(normalize_distributions).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn reference_date_overrides_clock() {
        let t = reference_time(Some("2025-11-16")).unwrap();
        assert_eq!(t, Utc.with_ymd_and_hms(2025, 11, 16, 0, 0, 0).unwrap());
        assert!(reference_time(Some("tomorrow")).is_err());
        assert!(reference_time(None).is_ok());
    }

    #[test]
    fn missing_suppliers_is_missing_data() {
        let err = require_suppliers(None).unwrap_err();
        assert!(matches!(err, ApiError::Domain(DomainError::MissingData { collection: "suppliers" })));
    }
}
