//! The normalized metric record and the shared raw-record parsing step.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{MetricsError, Result};

/// Date format required for the `date` field of raw records.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single normalized metric observation.
///
/// Every ingestion path (JSON files, CSV files, the commit-search
/// aggregation) produces this one shape, so downstream consumers never see
/// format-specific records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    /// Metric identifier, e.g. `"active_users"` or `"pull_request_count"`.
    pub name: String,
    /// Calendar date of the observation (no time component).
    pub date: NaiveDate,
    /// Numeric measurement.
    pub value: f64,
    /// Remaining record fields, kept verbatim as dimension labels.
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl DataPoint {
    /// Build a data point from the string fields of one raw record.
    ///
    /// The reserved keys `name`, `date` and `value` are consumed into the
    /// typed fields; every other pair lands in `metadata` unchanged. When a
    /// key repeats, the last occurrence wins.
    ///
    /// * `name` is required.
    /// * `date` is required and must match [`DATE_FORMAT`].
    /// * `value` is required and must parse as a number (leading and
    ///   trailing whitespace is tolerated).
    ///
    /// `index` is the 0-based position of the record in its document and is
    /// carried into every error so callers can point at the offending line.
    pub fn from_fields<I>(index: usize, fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut name: Option<String> = None;
        let mut date_raw: Option<String> = None;
        let mut value_raw: Option<String> = None;
        let mut metadata: BTreeMap<String, String> = BTreeMap::new();

        for (key, val) in fields {
            match key.as_str() {
                "name" => name = Some(val),
                "date" => date_raw = Some(val),
                "value" => value_raw = Some(val),
                _ => {
                    metadata.insert(key, val);
                }
            }
        }

        let name = name.ok_or(MetricsError::MissingField {
            index,
            field: "name",
        })?;
        let date_raw = date_raw.ok_or(MetricsError::MissingField {
            index,
            field: "date",
        })?;
        let value_raw = value_raw.ok_or(MetricsError::MissingField {
            index,
            field: "value",
        })?;

        let date = NaiveDate::parse_from_str(&date_raw, DATE_FORMAT).map_err(|_| {
            MetricsError::InvalidDate {
                index,
                value: date_raw.clone(),
            }
        })?;

        let value = value_raw.trim().parse::<f64>().map_err(|_| {
            MetricsError::NonNumericValue {
                index,
                value: value_raw.clone(),
            }
        })?;

        Ok(DataPoint {
            name,
            date,
            value,
            metadata,
        })
    }
}

/// Convert one JSON value into the string form used for record fields.
///
/// Strings pass through without quotes; every other value uses its compact
/// JSON encoding (`10` → `"10"`, `true` → `"true"`). This is what makes a
/// JSON record and a CSV record with the same content parse identically.
///
/// # Examples
///
/// ```
/// use metrics_core::models::field_text;
///
/// assert_eq!(field_text(&serde_json::json!("hello")), "hello");
/// assert_eq!(field_text(&serde_json::json!(10)), "10");
/// assert_eq!(field_text(&serde_json::json!(2.5)), "2.5");
/// assert_eq!(field_text(&serde_json::json!(true)), "true");
/// ```
pub fn field_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
