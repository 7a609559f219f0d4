//! Raw Customer Records
//!
//! The name-keyed, sparse input to the encoder. Callers may supply numeric
//! columns directly, indicator columns as 0/1 numbers, or categorical
//! attributes as text; anything the schema does not know is ignored.

use std::collections::BTreeMap;

/// A single raw field value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Numeric view of the value, parsing text if possible
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(s) => s.trim().parse().ok(),
        }
    }

    /// Text view of the value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s.as_str()),
            FieldValue::Number(_) => None,
        }
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

/// How a schema column resolved against a raw record. Makes the
/// permissive-default policy explicit: present inputs either match a
/// column or are ignored, absent ones fall back to the column default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    /// Field present and mapped to a schema column
    Matched,
    /// Field present but unknown to the schema; ignored
    Unmatched,
    /// Field absent; indicator defaults to 0, numeric to the
    /// training-time median
    Absent,
}

/// Sparse name-to-value mapping for one prediction request or one
/// training row
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    fields: BTreeMap<String, FieldValue>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a numeric field
    pub fn set_number(&mut self, name: impl Into<String>, value: f64) -> &mut Self {
        self.fields.insert(name.into(), FieldValue::Number(value));
        self
    }

    /// Set a categorical text field
    pub fn set_text(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.fields
            .insert(name.into(), FieldValue::Text(value.into()));
        self
    }

    /// Look up a field by exact name
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Number of supplied fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over supplied fields
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for RawRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_value_numeric_views() {
        assert_eq!(FieldValue::Number(3.5).as_number(), Some(3.5));
        assert_eq!(FieldValue::Text(" 42 ".into()).as_number(), Some(42.0));
        assert_eq!(FieldValue::Text("".into()).as_number(), None);
        assert_eq!(FieldValue::Text("n/a".into()).as_number(), None);
    }

    #[test]
    fn test_record_insert_and_lookup() {
        let mut record = RawRecord::new();
        record.set_number("tenure", 12.0).set_text("Contract", "One year");

        assert_eq!(record.len(), 2);
        assert_eq!(record.get("tenure").unwrap().as_number(), Some(12.0));
        assert_eq!(record.get("Contract").unwrap().as_text(), Some("One year"));
        assert!(record.get("missing").is_none());
    }

    #[test]
    fn test_insertion_order_does_not_affect_equality() {
        let a: RawRecord = [("tenure", 12.0), ("MonthlyCharges", 70.0)]
            .into_iter()
            .collect();
        let b: RawRecord = [("MonthlyCharges", 70.0), ("tenure", 12.0)]
            .into_iter()
            .collect();
        assert_eq!(a, b);
    }
}
