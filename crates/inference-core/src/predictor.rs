//! Composed Churn Predictor
//!
//! Bundles the encoder and the loaded scaler/model parameters into one
//! immutable object constructed at startup and shared read-only by every
//! request. Each prediction is a single stateless pass:
//! encode -> transform -> score -> decide.

use crate::decision::{decide, Prediction};
use crate::scorer::ScorerParams;
use crate::InferenceError;
use feature_pipeline::{Encoder, FeatureSchema, RawRecord, Scaler, ScalerParams};
use tracing::{debug, info};

/// Default decision threshold when the caller supplies none
pub const DEFAULT_THRESHOLD: f64 = 0.5;

pub struct ChurnPredictor {
    encoder: Encoder,
    scaler: ScalerParams,
    scorer: ScorerParams,
}

impl ChurnPredictor {
    /// Assemble a predictor from loaded artifacts. The encoder's
    /// imputation medians come from the scaler artifact so serving-time
    /// fallbacks reuse training statistics.
    pub fn new(
        schema: FeatureSchema,
        scaler: ScalerParams,
        scorer: ScorerParams,
    ) -> Result<Self, InferenceError> {
        if scaler.len() != schema.len() {
            return Err(InferenceError::InvalidInputShape {
                expected: schema.len(),
                actual: scaler.len(),
            });
        }
        if scorer.len() != schema.len() {
            return Err(InferenceError::InvalidInputShape {
                expected: schema.len(),
                actual: scorer.len(),
            });
        }

        let encoder = Encoder::new(schema, scaler.median.clone())?;
        info!(
            "Churn predictor ready: schema {} with {} features",
            schema.version(),
            schema.len()
        );
        Ok(Self {
            encoder,
            scaler,
            scorer,
        })
    }

    pub fn schema(&self) -> &FeatureSchema {
        self.encoder.schema()
    }

    /// Score one raw record against the caller's threshold
    pub fn predict(
        &self,
        record: &RawRecord,
        threshold: f64,
    ) -> Result<Prediction, InferenceError> {
        let encoded = self.encoder.encode(record)?;
        let scaled = Scaler::transform(&encoded, &self.scaler)?;
        let probability = self.scorer.score(&scaled)?;
        debug!(probability, threshold, "Scored churn record");
        Ok(decide(probability, threshold))
    }
}
