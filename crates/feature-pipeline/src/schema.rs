//! Canonical Feature Schema
//!
//! A single ordered column table shared by the training and serving paths.
//! Positional alignment between this table, the persisted scaler/model
//! parameters, and every encoded vector is the system's central invariant:
//! a silent reorder produces plausible but wrong predictions, so artifacts
//! record the column list and are checked against it at load time.

use thiserror::Error;

/// Schema version recorded in every persisted artifact
pub const SCHEMA_VERSION: &str = "telco-churn-v1";

/// What a column's value means
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureKind {
    /// Numeric quantity passed through unchanged (median-imputed if missing)
    Numeric,
    /// Binary indicator from drop-first one-hot encoding: 1 iff the
    /// categorical `attribute` takes this `level`
    Indicator {
        attribute: &'static str,
        level: &'static str,
    },
}

/// One entry in the ordered schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureColumn {
    /// Column name as it appears in the training dataframe
    pub name: &'static str,
    pub kind: FeatureKind,
}

const fn numeric(name: &'static str) -> FeatureColumn {
    FeatureColumn {
        name,
        kind: FeatureKind::Numeric,
    }
}

const fn indicator(
    name: &'static str,
    attribute: &'static str,
    level: &'static str,
) -> FeatureColumn {
    FeatureColumn {
        name,
        kind: FeatureKind::Indicator { attribute, level },
    }
}

/// The 30-column Telco churn schema. Order matches the training
/// dataframe after drop-first one-hot encoding; for each categorical
/// attribute with k levels only k-1 indicators exist, the dropped level
/// being represented by all of them reading zero.
const TELCO_COLUMNS: &[FeatureColumn] = &[
    numeric("SeniorCitizen"),
    numeric("tenure"),
    numeric("MonthlyCharges"),
    numeric("TotalCharges"),
    indicator("gender_Male", "gender", "Male"),
    indicator("Partner_Yes", "Partner", "Yes"),
    indicator("Dependents_Yes", "Dependents", "Yes"),
    indicator("PhoneService_Yes", "PhoneService", "Yes"),
    indicator(
        "MultipleLines_No phone service",
        "MultipleLines",
        "No phone service",
    ),
    indicator("MultipleLines_Yes", "MultipleLines", "Yes"),
    indicator(
        "InternetService_Fiber optic",
        "InternetService",
        "Fiber optic",
    ),
    indicator("InternetService_No", "InternetService", "No"),
    indicator(
        "OnlineSecurity_No internet service",
        "OnlineSecurity",
        "No internet service",
    ),
    indicator("OnlineSecurity_Yes", "OnlineSecurity", "Yes"),
    indicator(
        "OnlineBackup_No internet service",
        "OnlineBackup",
        "No internet service",
    ),
    indicator("OnlineBackup_Yes", "OnlineBackup", "Yes"),
    indicator(
        "DeviceProtection_No internet service",
        "DeviceProtection",
        "No internet service",
    ),
    indicator("DeviceProtection_Yes", "DeviceProtection", "Yes"),
    indicator(
        "TechSupport_No internet service",
        "TechSupport",
        "No internet service",
    ),
    indicator("TechSupport_Yes", "TechSupport", "Yes"),
    indicator(
        "StreamingTV_No internet service",
        "StreamingTV",
        "No internet service",
    ),
    indicator("StreamingTV_Yes", "StreamingTV", "Yes"),
    indicator(
        "StreamingMovies_No internet service",
        "StreamingMovies",
        "No internet service",
    ),
    indicator("StreamingMovies_Yes", "StreamingMovies", "Yes"),
    indicator("Contract_One year", "Contract", "One year"),
    indicator("Contract_Two year", "Contract", "Two year"),
    indicator("PaperlessBilling_Yes", "PaperlessBilling", "Yes"),
    indicator(
        "PaymentMethod_Credit card (automatic)",
        "PaymentMethod",
        "Credit card (automatic)",
    ),
    indicator(
        "PaymentMethod_Electronic check",
        "PaymentMethod",
        "Electronic check",
    ),
    indicator(
        "PaymentMethod_Mailed check",
        "PaymentMethod",
        "Mailed check",
    ),
];

/// Mismatch between the live schema and a persisted artifact
#[derive(Debug, Clone, Error)]
pub enum SchemaError {
    #[error("Schema version mismatch: expected '{expected}', artifact has '{actual}'")]
    VersionMismatch { expected: String, actual: String },

    #[error("Column count mismatch: schema has {expected}, artifact has {actual}")]
    CountMismatch { expected: usize, actual: usize },

    #[error("Column order mismatch at position {position}: schema has '{expected}', artifact has '{actual}'")]
    OrderMismatch {
        position: usize,
        expected: String,
        actual: String,
    },
}

/// Ordered, immutable feature column table
#[derive(Debug, Clone, Copy)]
pub struct FeatureSchema {
    columns: &'static [FeatureColumn],
    version: &'static str,
}

impl FeatureSchema {
    /// The reference Telco churn deployment schema
    pub fn telco() -> Self {
        Self {
            columns: TELCO_COLUMNS,
            version: SCHEMA_VERSION,
        }
    }

    /// Build from a custom static column table
    pub fn with_columns(columns: &'static [FeatureColumn], version: &'static str) -> Self {
        Self { columns, version }
    }

    /// Ordered column descriptors
    pub fn columns(&self) -> &[FeatureColumn] {
        self.columns
    }

    /// Ordered column names
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().map(|c| c.name)
    }

    /// Number of features (N)
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Schema version string recorded in artifacts
    pub fn version(&self) -> &'static str {
        self.version
    }

    /// Position of a column by exact name
    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Check a persisted artifact's recorded column list against this
    /// schema. Any difference in version, count, or order is fatal.
    pub fn check_columns(&self, version: &str, columns: &[String]) -> Result<(), SchemaError> {
        if version != self.version {
            return Err(SchemaError::VersionMismatch {
                expected: self.version.to_string(),
                actual: version.to_string(),
            });
        }
        if columns.len() != self.columns.len() {
            return Err(SchemaError::CountMismatch {
                expected: self.columns.len(),
                actual: columns.len(),
            });
        }
        for (position, (expected, actual)) in self.names().zip(columns).enumerate() {
            if expected != actual.as_str() {
                return Err(SchemaError::OrderMismatch {
                    position,
                    expected: expected.to_string(),
                    actual: actual.clone(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_telco_schema_shape() {
        let schema = FeatureSchema::telco();
        assert_eq!(schema.len(), 30);
        assert_eq!(schema.columns()[0].name, "SeniorCitizen");
        assert_eq!(schema.columns()[29].name, "PaymentMethod_Mailed check");
        assert_eq!(schema.position("tenure"), Some(1));
        assert_eq!(schema.position("Contract_One year"), Some(24));
        assert_eq!(schema.position("nope"), None);
    }

    #[test]
    fn test_drop_first_indicators_carry_attribute_and_level() {
        let schema = FeatureSchema::telco();
        let col = schema.columns()[schema.position("Contract_Two year").unwrap()];
        assert_eq!(
            col.kind,
            FeatureKind::Indicator {
                attribute: "Contract",
                level: "Two year"
            }
        );
        // Contract has 3 levels, so exactly 2 indicators exist
        let contract_indicators = schema
            .columns()
            .iter()
            .filter(|c| matches!(c.kind, FeatureKind::Indicator { attribute, .. } if attribute == "Contract"))
            .count();
        assert_eq!(contract_indicators, 2);
    }

    #[test]
    fn test_check_columns_accepts_exact_match() {
        let schema = FeatureSchema::telco();
        let recorded: Vec<String> = schema.names().map(String::from).collect();
        assert!(schema.check_columns(SCHEMA_VERSION, &recorded).is_ok());
    }

    #[test]
    fn test_check_columns_rejects_reorder() {
        let schema = FeatureSchema::telco();
        let mut recorded: Vec<String> = schema.names().map(String::from).collect();
        recorded.swap(1, 2);
        let err = schema.check_columns(SCHEMA_VERSION, &recorded).unwrap_err();
        assert!(matches!(err, SchemaError::OrderMismatch { position: 1, .. }));
    }

    #[test]
    fn test_check_columns_rejects_truncation_and_version_drift() {
        let schema = FeatureSchema::telco();
        let recorded: Vec<String> = schema.names().take(29).map(String::from).collect();
        assert!(matches!(
            schema.check_columns(SCHEMA_VERSION, &recorded).unwrap_err(),
            SchemaError::CountMismatch {
                expected: 30,
                actual: 29
            }
        ));

        let full: Vec<String> = schema.names().map(String::from).collect();
        assert!(matches!(
            schema.check_columns("telco-churn-v2", &full).unwrap_err(),
            SchemaError::VersionMismatch { .. }
        ));
    }
}
