//! Pilot records as they appear in `pilots.json`.
//!
//! Records are kept as the original JSON objects so the regional shards can
//! pass them through untouched. Accessors interpret only the handful of keys
//! the build cares about.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Wire keys of the dataset contract.
pub mod keys {
    pub const ID: &str = "id";
    pub const REGION: &str = "st";
    pub const VERIFIED: &str = "v";
    pub const HONEYPOT: &str = "_honeypot";
    pub const NAME: &str = "c";
}

/// Top-level dataset document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Dataset {
    /// Missing and `null` both mean "no pilots".
    #[serde(default)]
    pub pilots: Option<Vec<PilotRecord>>,
}

impl Dataset {
    pub fn into_pilots(self) -> Vec<PilotRecord> {
        self.pilots.unwrap_or_default()
    }
}

/// One directory entry, field order preserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PilotRecord {
    fields: Map<String, Value>,
}

impl PilotRecord {
    /// Identifier rendered as plain text (strings unquoted, missing as empty).
    pub fn id_text(&self) -> String {
        self.fields.get(keys::ID).map(plain_text).unwrap_or_default()
    }

    /// Display name for diagnostics.
    pub fn name_text(&self) -> String {
        self.fields.get(keys::NAME).map(plain_text).unwrap_or_default()
    }

    /// Raw region value, only when it is a string.
    pub fn region(&self) -> Option<&str> {
        self.fields.get(keys::REGION).and_then(Value::as_str)
    }

    /// Raw region value as shown to the operator.
    pub fn raw_region_text(&self) -> String {
        match self.fields.get(keys::REGION) {
            None => "<missing>".to_string(),
            Some(value) => plain_text(value),
        }
    }

    pub fn is_verified(&self) -> bool {
        matches!(self.fields.get(keys::VERIFIED), Some(Value::Bool(true)))
    }

    /// Any truthy marker counts; a decoy must never leak into output.
    pub fn is_honeypot(&self) -> bool {
        self.fields.get(keys::HONEYPOT).is_some_and(is_truthy)
    }
}

/// Drop honeypot records, keeping input order.
pub fn real_pilots(pilots: Vec<PilotRecord>) -> Vec<PilotRecord> {
    pilots
        .into_iter()
        .filter(|pilot| !pilot.is_honeypot())
        .collect()
}

/// Number of verified records in `pilots`.
pub fn verified_count<'a>(pilots: impl IntoIterator<Item = &'a PilotRecord>) -> usize {
    pilots
        .into_iter()
        .filter(|pilot| pilot.is_verified())
        .count()
}

fn plain_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Number(number) => number_text(number),
        other => other.to_string(),
    }
}

/// Whole-valued floats drop the fraction (`1.0` renders as `1`).
fn number_text(number: &Number) -> String {
    if number.is_f64() {
        if let Some(n) = number.as_f64() {
            if n.fract() == 0.0 && n.abs() < 1e15 {
                return format!("{}", n as i64);
            }
        }
    }
    number.to_string()
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> PilotRecord {
        serde_json::from_value(value).expect("record")
    }

    #[test]
    fn dataset_without_pilots_is_empty() {
        let dataset: Dataset = serde_json::from_str("{}").expect("parse");
        assert!(dataset.into_pilots().is_empty());

        let dataset: Dataset = serde_json::from_str(r#"{"pilots": null}"#).expect("parse");
        assert!(dataset.into_pilots().is_empty());
    }

    #[test]
    fn id_text_renders_strings_and_numbers_plainly() {
        assert_eq!(record(json!({"id": 7})).id_text(), "7");
        assert_eq!(record(json!({"id": "abc-1"})).id_text(), "abc-1");
        assert_eq!(record(json!({})).id_text(), "");
        assert_eq!(record(json!({"id": null})).id_text(), "");
    }

    #[test]
    fn whole_float_ids_render_without_fraction() {
        assert_eq!(record(json!({"id": 1.0})).id_text(), "1");
        assert_eq!(record(json!({"id": -3.0})).id_text(), "-3");
        assert_eq!(record(json!({"id": 2.5})).id_text(), "2.5");
    }

    #[test]
    fn verified_requires_literal_true() {
        assert!(record(json!({"v": true})).is_verified());
        assert!(!record(json!({"v": false})).is_verified());
        assert!(!record(json!({"v": "yes"})).is_verified());
        assert!(!record(json!({})).is_verified());
    }

    #[test]
    fn honeypot_marker_is_truthy_check() {
        assert!(record(json!({"_honeypot": true})).is_honeypot());
        assert!(record(json!({"_honeypot": 1})).is_honeypot());
        assert!(record(json!({"_honeypot": "x"})).is_honeypot());
        assert!(!record(json!({"_honeypot": false})).is_honeypot());
        assert!(!record(json!({"_honeypot": 0})).is_honeypot());
        assert!(!record(json!({"_honeypot": null})).is_honeypot());
        assert!(!record(json!({})).is_honeypot());
    }

    #[test]
    fn real_pilots_drops_honeypots_in_order() {
        let pilots = vec![
            record(json!({"id": 1})),
            record(json!({"id": 2, "_honeypot": true})),
            record(json!({"id": 3})),
        ];
        let ids: Vec<String> = real_pilots(pilots).iter().map(PilotRecord::id_text).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn record_serializes_with_original_field_order() {
        let raw = r#"{"z":1,"id":2,"a":{"b":true}}"#;
        let pilot: PilotRecord = serde_json::from_str(raw).expect("parse");
        assert_eq!(serde_json::to_string(&pilot).expect("serialize"), raw);
    }

    #[test]
    fn non_string_region_is_not_a_region() {
        let pilot = record(json!({"st": 12}));
        assert_eq!(pilot.region(), None);
        assert_eq!(pilot.raw_region_text(), "12");
        assert_eq!(record(json!({})).raw_region_text(), "<missing>");
    }
}
