//! Feature Vector Assembly
//!
//! Resolves a name-keyed raw record into a schema-ordered positional vector
//! exactly once, so the scaler and scorer downstream never need names.

use crate::record::{FieldValue, MatchOutcome, RawRecord};
use crate::schema::{FeatureKind, FeatureSchema};
use crate::FeatureError;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Dense, schema-ordered feature vector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    values: Vec<f64>,
}

impl FeatureVector {
    /// Wrap an already-ordered value vector
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}

/// Encoder from raw records to feature vectors
///
/// Holds the training-time per-column medians used to impute missing or
/// unparseable numeric fields. Recomputing that statistic at serve time
/// would introduce train/serve skew, so it is loaded from the scaler
/// artifact and fixed for the process lifetime.
#[derive(Debug, Clone)]
pub struct Encoder {
    schema: FeatureSchema,
    medians: Vec<f64>,
}

impl Encoder {
    /// Create an encoder for `schema` with per-column imputation medians
    /// (positionally aligned; entries for indicator columns are unused)
    pub fn new(schema: FeatureSchema, medians: Vec<f64>) -> Result<Self, FeatureError> {
        if medians.len() != schema.len() {
            return Err(FeatureError::DimensionMismatch {
                expected: schema.len(),
                actual: medians.len(),
            });
        }
        Ok(Self { schema, medians })
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// Classify a raw field name against the schema: an exact column name
    /// or a categorical attribute name is `Matched`, anything else is
    /// `Unmatched` and will be ignored.
    pub fn classify_field(&self, name: &str) -> MatchOutcome {
        let known = self.schema.columns().iter().any(|c| {
            c.name == name
                || matches!(c.kind, FeatureKind::Indicator { attribute, .. } if attribute == name)
        });
        if known {
            MatchOutcome::Matched
        } else {
            MatchOutcome::Unmatched
        }
    }

    /// Encode a raw record into a dense schema-ordered vector.
    ///
    /// Total over all records whose supplied numerics are finite: absent
    /// indicators read 0, absent or unparseable numerics read the
    /// training-time median, unknown fields are ignored.
    pub fn encode(&self, record: &RawRecord) -> Result<FeatureVector, FeatureError> {
        let mut values = Vec::with_capacity(self.schema.len());

        for (i, column) in self.schema.columns().iter().enumerate() {
            let value = match column.kind {
                FeatureKind::Numeric => match record.get(column.name) {
                    Some(field) => match field.as_number() {
                        Some(n) if n.is_finite() => n,
                        Some(n) => {
                            return Err(FeatureError::NonFiniteValue {
                                field: column.name.to_string(),
                                value: n,
                            })
                        }
                        // Unparseable text coerces to the training median
                        None => self.medians[i],
                    },
                    None => self.medians[i],
                },
                FeatureKind::Indicator { attribute, level } => {
                    self.encode_indicator(record, column.name, attribute, level)?
                }
            };
            values.push(value);
        }

        let ignored = record
            .iter()
            .filter(|(name, _)| self.classify_field(name) == MatchOutcome::Unmatched)
            .count();
        if ignored > 0 {
            debug!("Ignored {} unknown field(s) in raw record", ignored);
        }

        Ok(FeatureVector::new(values))
    }

    fn encode_indicator(
        &self,
        record: &RawRecord,
        name: &str,
        attribute: &str,
        level: &str,
    ) -> Result<f64, FeatureError> {
        // A directly supplied indicator column wins over the categorical
        // attribute form
        if let Some(field) = record.get(name) {
            return match field.as_number() {
                Some(n) if n.is_finite() => Ok(if n != 0.0 { 1.0 } else { 0.0 }),
                Some(n) => Err(FeatureError::NonFiniteValue {
                    field: name.to_string(),
                    value: n,
                }),
                None => Ok(0.0),
            };
        }
        match record.get(attribute) {
            Some(FieldValue::Text(value)) if value == level => Ok(1.0),
            // Present with another level, or absent: baseline
            _ => Ok(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn encoder() -> Encoder {
        let schema = FeatureSchema::telco();
        Encoder::new(schema, vec![0.0; schema.len()]).unwrap()
    }

    fn base_record() -> RawRecord {
        let mut record = RawRecord::new();
        record
            .set_number("tenure", 12.0)
            .set_number("MonthlyCharges", 70.0)
            .set_number("TotalCharges", 800.0);
        record
    }

    #[test]
    fn test_encode_length_and_positions() {
        let enc = encoder();
        let vector = enc.encode(&base_record()).unwrap();

        assert_eq!(vector.len(), 30);
        assert_eq!(vector.as_slice()[1], 12.0);
        assert_eq!(vector.as_slice()[2], 70.0);
        assert_eq!(vector.as_slice()[3], 800.0);
        // All omitted indicators default to the baseline level
        assert!(vector.as_slice()[4..].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_direct_indicator_fields() {
        let enc = encoder();
        let mut record = base_record();
        record
            .set_number("Contract_Two year", 1.0)
            .set_number("TechSupport_Yes", 0.0);

        let vector = enc.encode(&record).unwrap();
        let schema = FeatureSchema::telco();
        assert_eq!(vector.as_slice()[schema.position("Contract_Two year").unwrap()], 1.0);
        assert_eq!(vector.as_slice()[schema.position("Contract_One year").unwrap()], 0.0);
        assert_eq!(vector.as_slice()[schema.position("TechSupport_Yes").unwrap()], 0.0);
    }

    #[test]
    fn test_categorical_attribute_form() {
        let enc = encoder();
        let mut record = base_record();
        record
            .set_text("Contract", "One year")
            .set_text("InternetService", "Fiber optic")
            .set_text("PaymentMethod", "Mailed check");

        let vector = enc.encode(&record).unwrap();
        let schema = FeatureSchema::telco();
        assert_eq!(vector.as_slice()[schema.position("Contract_One year").unwrap()], 1.0);
        assert_eq!(vector.as_slice()[schema.position("Contract_Two year").unwrap()], 0.0);
        assert_eq!(
            vector.as_slice()[schema.position("InternetService_Fiber optic").unwrap()],
            1.0
        );
        assert_eq!(
            vector.as_slice()[schema.position("PaymentMethod_Mailed check").unwrap()],
            1.0
        );
        assert_eq!(
            vector.as_slice()[schema.position("PaymentMethod_Electronic check").unwrap()],
            0.0
        );
    }

    #[test]
    fn test_dropped_level_reads_all_zero() {
        let enc = encoder();
        let mut record = base_record();
        // "Month-to-month" is the dropped Contract level
        record.set_text("Contract", "Month-to-month");

        let vector = enc.encode(&record).unwrap();
        let schema = FeatureSchema::telco();
        assert_eq!(vector.as_slice()[schema.position("Contract_One year").unwrap()], 0.0);
        assert_eq!(vector.as_slice()[schema.position("Contract_Two year").unwrap()], 0.0);
    }

    #[test]
    fn test_numeric_imputation_uses_medians() {
        let schema = FeatureSchema::telco();
        let mut medians = vec![0.0; schema.len()];
        medians[schema.position("TotalCharges").unwrap()] = 1397.475;
        let enc = Encoder::new(schema, medians).unwrap();

        // Absent entirely
        let mut record = RawRecord::new();
        record.set_number("tenure", 1.0);
        let vector = enc.encode(&record).unwrap();
        assert_eq!(vector.as_slice()[schema.position("TotalCharges").unwrap()], 1397.475);

        // Present but unparseable, as in the raw Telco CSV
        record.set_text("TotalCharges", " ");
        let vector = enc.encode(&record).unwrap();
        assert_eq!(vector.as_slice()[schema.position("TotalCharges").unwrap()], 1397.475);
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let enc = encoder();
        let mut record = base_record();
        record.set_number("customerID", 7.0).set_text("plan_tier", "gold");

        assert_eq!(enc.classify_field("customerID"), MatchOutcome::Unmatched);
        assert_eq!(enc.classify_field("tenure"), MatchOutcome::Matched);
        assert_eq!(enc.classify_field("Contract"), MatchOutcome::Matched);

        let with_unknown = enc.encode(&record).unwrap();
        let without = enc.encode(&base_record()).unwrap();
        assert_eq!(with_unknown, without);
    }

    #[test]
    fn test_non_finite_numeric_rejected() {
        let enc = encoder();
        let mut record = base_record();
        record.set_number("MonthlyCharges", f64::NAN);

        let err = enc.encode(&record).unwrap_err();
        assert!(matches!(err, FeatureError::NonFiniteValue { ref field, .. } if field == "MonthlyCharges"));
    }

    #[test]
    fn test_median_length_checked() {
        let schema = FeatureSchema::telco();
        let err = Encoder::new(schema, vec![0.0; 7]).unwrap_err();
        assert!(matches!(
            err,
            FeatureError::DimensionMismatch {
                expected: 30,
                actual: 7
            }
        ));
    }

    proptest! {
        /// Encoding is deterministic and total: any subset of known fields
        /// with finite values encodes to the same 30-wide finite vector on
        /// every invocation.
        #[test]
        fn prop_encode_total_and_deterministic(
            tenure in proptest::option::of(0.0f64..100.0),
            monthly in proptest::option::of(0.0f64..500.0),
            total in proptest::option::of(0.0f64..10_000.0),
            fiber in proptest::option::of(0u8..=1),
            two_year in proptest::option::of(0u8..=1),
        ) {
            let enc = encoder();
            let mut record = RawRecord::new();
            if let Some(v) = tenure { record.set_number("tenure", v); }
            if let Some(v) = monthly { record.set_number("MonthlyCharges", v); }
            if let Some(v) = total { record.set_number("TotalCharges", v); }
            if let Some(v) = fiber { record.set_number("InternetService_Fiber optic", v as f64); }
            if let Some(v) = two_year { record.set_number("Contract_Two year", v as f64); }

            let first = enc.encode(&record).unwrap();
            let second = enc.encode(&record).unwrap();

            prop_assert_eq!(&first, &second);
            prop_assert_eq!(first.len(), 30);
            prop_assert!(first.as_slice().iter().all(|v| v.is_finite()));
        }
    }
}
