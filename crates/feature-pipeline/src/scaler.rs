//! Feature Standardization
//!
//! Per-column z-scoring with statistics computed once from training data.
//! `transform` is a pure function; the fitted parameters are persisted in
//! the scaler artifact and never mutated after load.

use crate::encoder::FeatureVector;
use crate::FeatureError;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Per-column training statistics, positionally aligned to the schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalerParams {
    /// Per-column mean
    pub mean: Vec<f64>,
    /// Per-column standard deviation (population, ddof = 0)
    pub std_dev: Vec<f64>,
    /// Per-column median, used by the encoder for numeric imputation
    pub median: Vec<f64>,
}

impl ScalerParams {
    /// Number of columns covered
    pub fn len(&self) -> usize {
        self.mean.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }

    /// Identity parameters: mean 0, std 1, median 0 for every column.
    /// Transform becomes a no-op; useful as a test fixture.
    pub fn identity(dimension: usize) -> Self {
        Self {
            mean: vec![0.0; dimension],
            std_dev: vec![1.0; dimension],
            median: vec![0.0; dimension],
        }
    }
}

/// Standard scaler over encoded feature vectors
pub struct Scaler;

impl Scaler {
    /// Fit per-column mean, population standard deviation, and median
    /// from a batch of encoded vectors.
    pub fn fit(batch: &[FeatureVector]) -> Result<ScalerParams, FeatureError> {
        let first = batch.first().ok_or(FeatureError::EmptyBatch)?;
        let dimension = first.len();
        for vector in batch {
            if vector.len() != dimension {
                return Err(FeatureError::DimensionMismatch {
                    expected: dimension,
                    actual: vector.len(),
                });
            }
        }

        let n = batch.len() as f64;
        let mut mean = vec![0.0; dimension];
        for vector in batch {
            for (m, v) in mean.iter_mut().zip(vector.as_slice()) {
                *m += v;
            }
        }
        for m in &mut mean {
            *m /= n;
        }

        let mut variance = vec![0.0; dimension];
        for vector in batch {
            for ((var, v), m) in variance.iter_mut().zip(vector.as_slice()).zip(&mean) {
                let d = v - m;
                *var += d * d;
            }
        }
        let std_dev: Vec<f64> = variance.iter().map(|v| (v / n).sqrt()).collect();

        let mut median = Vec::with_capacity(dimension);
        let mut column = Vec::with_capacity(batch.len());
        for i in 0..dimension {
            column.clear();
            column.extend(batch.iter().map(|v| v.as_slice()[i]));
            column.sort_by(|a, b| a.total_cmp(b));
            let mid = column.len() / 2;
            median.push(if column.len() % 2 == 0 {
                (column[mid - 1] + column[mid]) / 2.0
            } else {
                column[mid]
            });
        }

        debug!("Fitted scaler over {} rows x {} columns", batch.len(), dimension);
        Ok(ScalerParams {
            mean,
            std_dev,
            median,
        })
    }

    /// Standardize one vector: `(x[i] - mean[i]) / std[i]`, with
    /// zero-variance columns mapping to 0.0 instead of dividing by zero.
    pub fn transform(
        vector: &FeatureVector,
        params: &ScalerParams,
    ) -> Result<FeatureVector, FeatureError> {
        if vector.len() != params.len() {
            return Err(FeatureError::DimensionMismatch {
                expected: params.len(),
                actual: vector.len(),
            });
        }

        let values = vector
            .as_slice()
            .iter()
            .zip(&params.mean)
            .zip(&params.std_dev)
            .map(|((x, mean), std_dev)| {
                if *std_dev == 0.0 {
                    // Constant training column carries no signal
                    0.0
                } else {
                    (x - mean) / std_dev
                }
            })
            .collect();

        Ok(FeatureVector::new(values))
    }
}
