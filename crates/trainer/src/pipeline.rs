//! End-to-End Training Pipeline

use crate::dataset::TrainingSet;
use crate::logistic::{LogisticTrainer, TrainConfig};
use crate::TrainerError;
use feature_pipeline::{Encoder, FeatureSchema, Scaler, ScalerParams};
use inference_core::{decide, ScorerParams, DEFAULT_THRESHOLD};
use tracing::info;

/// Output of one training run
#[derive(Debug, Clone)]
pub struct TrainedModel {
    pub scaler: ScalerParams,
    pub scorer: ScorerParams,
    /// Per-row churn probabilities on the training data
    pub train_probabilities: Vec<f64>,
    /// Accuracy on the training data at the default threshold
    pub train_accuracy: f64,
}

/// Fit scaler and model from a labeled dataset.
///
/// The medians used to impute unparseable numerics during encoding are
/// the same ones persisted in the scaler artifact, so the serving path
/// reproduces every training-time vector bit for bit.
pub fn train(
    schema: FeatureSchema,
    set: &TrainingSet,
    config: TrainConfig,
) -> Result<TrainedModel, TrainerError> {
    let medians = set.numeric_medians(&schema);
    let encoder = Encoder::new(schema, medians.clone())?;

    let mut encoded = Vec::with_capacity(set.len());
    for record in &set.records {
        encoded.push(encoder.encode(record)?);
    }

    let mut scaler = Scaler::fit(&encoded)?;
    // Persist the pre-imputation medians: they are the statistic the
    // encoder actually used, and the one serving must keep using
    scaler.median = medians;

    let mut scaled = Vec::with_capacity(encoded.len());
    for vector in &encoded {
        scaled.push(Scaler::transform(vector, &scaler)?);
    }

    let scorer = LogisticTrainer::new(config).fit(&scaled, &set.labels)?;

    let mut train_probabilities = Vec::with_capacity(scaled.len());
    let mut correct = 0usize;
    for (vector, &label) in scaled.iter().zip(&set.labels) {
        let probability = scorer.score(vector)?;
        if decide(probability, DEFAULT_THRESHOLD).label.as_int() == label {
            correct += 1;
        }
        train_probabilities.push(probability);
    }
    let train_accuracy = correct as f64 / set.len() as f64;
    info!(
        "Training finished: accuracy {:.3} at threshold {}",
        train_accuracy, DEFAULT_THRESHOLD
    );

    Ok(TrainedModel {
        scaler,
        scorer,
        train_probabilities,
        train_accuracy,
    })
}
