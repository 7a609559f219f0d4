//! Offline Training Pipeline
//!
//! Fits the scaler and the class-balanced logistic model from a
//! preprocessed labeled CSV, then persists both artifacts keyed to the
//! feature schema. The serving core consumes the artifacts read-only.

mod dataset;
mod logistic;
mod pipeline;

pub use dataset::TrainingSet;
pub use logistic::{LogisticTrainer, TrainConfig};
pub use pipeline::{train, TrainedModel};

use thiserror::Error;

/// Errors during training
#[derive(Debug, Error)]
pub enum TrainerError {
    #[error("Failed to read dataset: {0}")]
    Csv(#[from] csv::Error),

    #[error("Dataset has no '{0}' column")]
    MissingLabel(String),

    #[error("Row {row}: label '{value}' is not 0/1")]
    BadLabel { row: usize, value: String },

    #[error("Dataset is empty")]
    EmptyDataset,

    #[error("All training labels belong to one class")]
    DegenerateLabels,

    #[error(transparent)]
    Feature(#[from] feature_pipeline::FeatureError),

    #[error(transparent)]
    Inference(#[from] inference_core::InferenceError),
}
