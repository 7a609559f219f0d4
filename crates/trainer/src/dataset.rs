//! Labeled Training Dataset
//!
//! Loads the preprocessed churn CSV (label column plus the encoded feature
//! columns). Cells are kept as raw fields; the shared encoder resolves them
//! against the schema so training and serving use one code path.

use crate::TrainerError;
use feature_pipeline::{FeatureKind, FeatureSchema, RawRecord};
use std::path::Path;
use tracing::info;

/// Label column name in the preprocessed CSV
pub const LABEL_COLUMN: &str = "Churn";

/// Raw labeled rows read from disk
#[derive(Debug, Clone)]
pub struct TrainingSet {
    pub records: Vec<RawRecord>,
    pub labels: Vec<u8>,
}

fn parse_cell(record: &mut RawRecord, name: &str, cell: &str) {
    let trimmed = cell.trim();
    if let Ok(n) = trimmed.parse::<f64>() {
        record.set_number(name, n);
    } else if trimmed.eq_ignore_ascii_case("true") {
        // pandas writes one-hot columns as True/False
        record.set_number(name, 1.0);
    } else if trimmed.eq_ignore_ascii_case("false") {
        record.set_number(name, 0.0);
    } else {
        record.set_text(name, trimmed);
    }
}

impl TrainingSet {
    /// Read a labeled CSV from disk
    pub fn from_csv(path: &Path) -> Result<Self, TrainerError> {
        let mut reader = csv::Reader::from_path(path)?;
        let headers: Vec<String> = reader.headers()?.iter().map(String::from).collect();
        let label_index = headers
            .iter()
            .position(|h| h == LABEL_COLUMN)
            .ok_or_else(|| TrainerError::MissingLabel(LABEL_COLUMN.to_string()))?;

        let mut records = Vec::new();
        let mut labels = Vec::new();
        for (row, result) in reader.records().enumerate() {
            let csv_record = result?;
            let mut record = RawRecord::new();
            for (i, cell) in csv_record.iter().enumerate() {
                if i == label_index {
                    continue;
                }
                parse_cell(&mut record, &headers[i], cell);
            }

            let label_cell = csv_record.get(label_index).unwrap_or("").trim();
            let label = match label_cell {
                "0" | "0.0" | "False" | "No" => 0u8,
                "1" | "1.0" | "True" | "Yes" => 1u8,
                other => {
                    return Err(TrainerError::BadLabel {
                        row,
                        value: other.to_string(),
                    })
                }
            };

            records.push(record);
            labels.push(label);
        }

        if records.is_empty() {
            return Err(TrainerError::EmptyDataset);
        }
        info!(
            "Loaded {} labeled rows ({} churned) from {}",
            records.len(),
            labels.iter().filter(|&&l| l == 1).count(),
            path.display()
        );
        Ok(Self { records, labels })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Per-column medians of the parseable numeric values, used to build
    /// the training encoder before any imputation has happened. Indicator
    /// columns read 0.0.
    pub fn numeric_medians(&self, schema: &FeatureSchema) -> Vec<f64> {
        schema
            .columns()
            .iter()
            .map(|column| {
                if column.kind != FeatureKind::Numeric {
                    return 0.0;
                }
                let mut values: Vec<f64> = self
                    .records
                    .iter()
                    .filter_map(|r| r.get(column.name).and_then(|v| v.as_number()))
                    .filter(|v| v.is_finite())
                    .collect();
                if values.is_empty() {
                    return 0.0;
                }
                values.sort_by(|a, b| a.total_cmp(b));
                let mid = values.len() / 2;
                if values.len() % 2 == 0 {
                    (values[mid - 1] + values[mid]) / 2.0
                } else {
                    values[mid]
                }
            })
            .collect()
    }
}
