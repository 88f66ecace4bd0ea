//! Field coercion between raw gateway records and typed entities.
//!
//! The gateway is loosely typed: numbers may arrive as JSON numbers or
//! numeric strings, lists as delimited strings or JSON arrays. Entities are
//! decoded once, here, at the boundary.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use storefront_gateway::Record;

use crate::CatalogError;

/// Delimiter for list fields stored as plain strings.
pub const LIST_DELIMITER: char = ',';

/// Read-only view over a raw record with coercing accessors.
#[derive(Debug, Clone, Copy)]
pub struct RecordReader<'a> {
    record: &'a Record,
}

impl<'a> RecordReader<'a> {
    /// Wrap a record.
    pub fn new(record: &'a Record) -> Self {
        Self { record }
    }

    /// Get a raw value; `null` counts as absent.
    pub fn get(&self, field: &str) -> Option<&'a Value> {
        self.record.get(field).filter(|v| !v.is_null())
    }

    /// Text value, or an empty string when absent.
    pub fn text(&self, field: &str) -> String {
        match self.get(field) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        }
    }

    /// Text value, or `None` when absent or empty.
    pub fn optional_text(&self, field: &str) -> Option<String> {
        Some(self.text(field)).filter(|s| !s.is_empty())
    }

    /// Float value; missing or unparseable input yields 0.
    pub fn number(&self, field: &str) -> f64 {
        self.get(field).and_then(as_f64).unwrap_or(0.0)
    }

    /// Float value for optional amounts.
    ///
    /// Absent, empty and unparseable values read as `None`, as does a bare
    /// numeric `0` (the gateway's unset amount). A stored `"0"` string is a
    /// real zero.
    pub fn optional_number(&self, field: &str) -> Option<f64> {
        match self.get(field)? {
            Value::Number(n) if n.as_f64() == Some(0.0) => None,
            value => as_f64(value),
        }
    }

    /// Integer value; floats truncate, missing or unparseable input yields 0.
    pub fn integer(&self, field: &str) -> i64 {
        self.get(field).and_then(as_i64).unwrap_or(0)
    }

    /// Foreign key to another table.
    ///
    /// Accepts a bare id (number or numeric string) or a lookup object
    /// carrying an `Id` field.
    pub fn reference(&self, field: &str) -> i64 {
        match self.get(field) {
            Some(Value::Object(lookup)) => lookup.get("Id").and_then(as_i64).unwrap_or(0),
            Some(value) => as_i64(value).unwrap_or(0),
            None => 0,
        }
    }

    /// Strict boolean: only JSON `true` is true.
    pub fn flag(&self, field: &str) -> bool {
        matches!(self.get(field), Some(Value::Bool(true)))
    }

    /// Plain list field.
    ///
    /// Accepts a `,`-delimited string, a JSON-array string or a JSON array.
    /// Elements are trimmed and empty ones dropped. A string that starts with
    /// `[` but is not a JSON array is split like any other delimited string.
    pub fn list(&self, field: &str) -> Vec<String> {
        match self.get(field) {
            None => Vec::new(),
            Some(Value::Array(items)) => non_empty(items.iter().map(element_text)),
            Some(Value::String(s)) => {
                let trimmed = s.trim();
                match trimmed
                    .starts_with('[')
                    .then(|| serde_json::from_str::<Vec<Value>>(trimmed).ok())
                    .flatten()
                {
                    Some(items) => non_empty(items.iter().map(element_text)),
                    None => split_list(trimmed),
                }
            }
            Some(other) => vec![other.to_string()],
        }
    }

    /// JSON-encoded list of structured entries.
    ///
    /// Absent or empty input is an empty list; malformed JSON is a decode error.
    pub fn json_list<T: DeserializeOwned>(&self, field: &str) -> Result<Vec<T>, CatalogError> {
        match self.get(field) {
            None => Ok(Vec::new()),
            Some(Value::String(s)) if s.trim().is_empty() => Ok(Vec::new()),
            Some(Value::String(s)) => serde_json::from_str(s).map_err(|e| decode_error(field, e)),
            Some(value) => {
                serde_json::from_value(value.clone()).map_err(|e| decode_error(field, e))
            }
        }
    }
}

fn decode_error(field: &str, e: serde_json::Error) -> CatalogError {
    CatalogError::Decode {
        field: field.to_string(),
        message: e.to_string(),
    }
}

fn element_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}

fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite())
}

fn as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
        }
        _ => None,
    }
}

fn non_empty(items: impl Iterator<Item = String>) -> Vec<String> {
    items.filter(|item| !item.is_empty()).collect()
}

/// Split a delimited string, trimming each element and dropping empty ones.
pub fn split_list(s: &str) -> Vec<String> {
    non_empty(s.split(LIST_DELIMITER).map(|item| item.trim().to_string()))
}

/// Join a list for storage in a delimited string field.
///
/// Elements containing the delimiter cannot round-trip and are rejected.
pub fn encode_list<S: AsRef<str>>(field: &str, items: &[S]) -> Result<String, CatalogError> {
    if let Some(bad) = items.iter().find(|i| i.as_ref().contains(LIST_DELIMITER)) {
        return Err(CatalogError::Delimiter {
            field: field.to_string(),
            value: bad.as_ref().to_string(),
            delimiter: LIST_DELIMITER,
        });
    }
    Ok(items
        .iter()
        .map(|i| i.as_ref())
        .collect::<Vec<_>>()
        .join(&LIST_DELIMITER.to_string()))
}

/// Encode a list as a JSON string for storage.
pub fn encode_json_list<T: Serialize>(items: &[T]) -> Result<String, CatalogError> {
    Ok(serde_json::to_string(items)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;
    use storefront_gateway::testing::record;

    #[test]
    fn test_text_fields() {
        let rec = record(json!({"name_c": "Serum", "n": 3, "e": "", "z": null}));
        let r = RecordReader::new(&rec);
        assert_eq!(r.text("name_c"), "Serum");
        assert_eq!(r.text("n"), "3");
        assert_eq!(r.text("missing"), "");
        assert_eq!(r.optional_text("e"), None);
        assert_eq!(r.optional_text("z"), None);
    }

    #[test]
    fn test_number_coercion() {
        let rec = record(json!({"a": 12.5, "b": "19.99", "c": "abc", "d": null, "e": true}));
        let r = RecordReader::new(&rec);
        assert_eq!(r.number("a"), 12.5);
        assert_eq!(r.number("b"), 19.99);
        assert_eq!(r.number("c"), 0.0);
        assert_eq!(r.number("d"), 0.0);
        assert_eq!(r.number("e"), 0.0);
        assert_eq!(r.number("missing"), 0.0);
    }

    #[test]
    fn test_optional_number() {
        let rec = record(json!({"a": "15", "b": 0, "c": "", "d": "n/a", "e": "0", "f": 9.5}));
        let r = RecordReader::new(&rec);
        assert_eq!(r.optional_number("a"), Some(15.0));
        assert_eq!(r.optional_number("b"), None);
        assert_eq!(r.optional_number("c"), None);
        assert_eq!(r.optional_number("d"), None);
        assert_eq!(r.optional_number("e"), Some(0.0));
        assert_eq!(r.optional_number("f"), Some(9.5));
    }

    #[test]
    fn test_integer_coercion() {
        let rec = record(json!({"a": 4, "b": "5", "c": "3.9", "d": 2.7, "e": "x"}));
        let r = RecordReader::new(&rec);
        assert_eq!(r.integer("a"), 4);
        assert_eq!(r.integer("b"), 5);
        assert_eq!(r.integer("c"), 3);
        assert_eq!(r.integer("d"), 2);
        assert_eq!(r.integer("e"), 0);
    }

    #[test]
    fn test_reference_forms() {
        let rec = record(json!({"a": 9, "b": "10", "c": {"Id": 11, "Name": "Serum"}, "d": {}}));
        let r = RecordReader::new(&rec);
        assert_eq!(r.reference("a"), 9);
        assert_eq!(r.reference("b"), 10);
        assert_eq!(r.reference("c"), 11);
        assert_eq!(r.reference("d"), 0);
        assert_eq!(r.reference("missing"), 0);
    }

    #[test]
    fn test_flag_is_strict() {
        let rec = record(json!({"a": true, "b": "true", "c": 1, "d": false}));
        let r = RecordReader::new(&rec);
        assert!(r.flag("a"));
        assert!(!r.flag("b"));
        assert!(!r.flag("c"));
        assert!(!r.flag("d"));
        assert!(!r.flag("missing"));
    }

    #[test]
    fn test_delimited_list() {
        let rec = record(json!({"tags_c": "a, b,c", "gaps": "a,, b, ,", "empty": "", "none": null}));
        let r = RecordReader::new(&rec);
        assert_eq!(r.list("tags_c"), vec!["a", "b", "c"]);
        assert_eq!(r.list("gaps"), vec!["a", "b"]);
        assert!(r.list("empty").is_empty());
        assert!(r.list("none").is_empty());
        assert!(r.list("missing").is_empty());
    }

    #[test]
    fn test_json_array_list() {
        let rec = record(json!({"s": "[\"x\", \" y \", \"\"]", "a": ["p", 2]}));
        let r = RecordReader::new(&rec);
        assert_eq!(r.list("s"), vec!["x", "y"]);
        assert_eq!(r.list("a"), vec!["p", "2"]);
    }

    #[test]
    fn test_bracketed_text_is_delimited() {
        let rec = record(json!({"tags_c": "[Limited] edition, vegan", "open": "[\"x\""}));
        let r = RecordReader::new(&rec);
        assert_eq!(r.list("tags_c"), vec!["[Limited] edition", "vegan"]);
        assert_eq!(r.list("open"), vec!["[\"x\""]);
    }

    #[test]
    fn test_json_list_structured() {
        #[derive(Deserialize, Debug, PartialEq)]
        struct Entry {
            name: String,
        }

        let rec = record(json!({"subs": "[{\"name\": \"Serums\"}]", "bad": "{oops", "empty": ""}));
        let r = RecordReader::new(&rec);
        let entries: Vec<Entry> = r.json_list("subs").unwrap();
        assert_eq!(entries, vec![Entry { name: "Serums".into() }]);
        assert!(r.json_list::<Entry>("bad").is_err());
        assert!(r.json_list::<Entry>("empty").unwrap().is_empty());
    }

    #[test]
    fn test_encode_list() {
        assert_eq!(encode_list("ids", &["1", "2", "3"]).unwrap(), "1,2,3");
        assert_eq!(encode_list::<&str>("ids", &[]).unwrap(), "");
    }

    #[test]
    fn test_encode_list_rejects_delimiter() {
        let err = encode_list("tags_c", &["ok", "a,b"]).unwrap_err();
        match err {
            CatalogError::Delimiter { field, value, .. } => {
                assert_eq!(field, "tags_c");
                assert_eq!(value, "a,b");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
