//! Churn Inference Core
//!
//! Applies a trained linear model to scaled feature vectors and maps the
//! result through a logistic link and a decision threshold.

mod decision;
mod predictor;
mod scorer;

pub use decision::{decide, ChurnLabel, Prediction};
pub use predictor::{ChurnPredictor, DEFAULT_THRESHOLD};
pub use scorer::{sigmoid, ScorerParams};

use feature_pipeline::FeatureError;
use thiserror::Error;

/// Errors during inference
#[derive(Debug, Error)]
pub enum InferenceError {
    /// Weight vector length does not match the feature vector
    #[error("Invalid input shape: expected {expected} features, got {actual}")]
    InvalidInputShape { expected: usize, actual: usize },

    /// Encoding or scaling failed
    #[error(transparent)]
    Feature(#[from] FeatureError),
}
