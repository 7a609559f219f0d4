//! Class-Balanced Logistic Regression
//!
//! Full-batch gradient descent on class-weighted log loss. Weighting
//! follows the balanced heuristic: each class contributes n / (2 * n_class)
//! per sample, so the minority churn class is not drowned out.

use crate::TrainerError;
use feature_pipeline::FeatureVector;
use inference_core::{sigmoid, ScorerParams};
use tracing::{debug, info};

/// Gradient descent settings
#[derive(Debug, Clone, Copy)]
pub struct TrainConfig {
    pub epochs: usize,
    pub learning_rate: f64,
    /// L2 penalty on the weights (not the bias)
    pub l2: f64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            epochs: 1000,
            learning_rate: 0.1,
            l2: 0.0,
        }
    }
}

pub struct LogisticTrainer {
    config: TrainConfig,
}

impl LogisticTrainer {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Fit weights and bias on scaled vectors and 0/1 labels
    pub fn fit(&self, x: &[FeatureVector], y: &[u8]) -> Result<ScorerParams, TrainerError> {
        let first = x.first().ok_or(TrainerError::EmptyDataset)?;
        let dimension = first.len();
        let n = x.len() as f64;

        let positives = y.iter().filter(|&&l| l == 1).count() as f64;
        let negatives = n - positives;
        if positives == 0.0 || negatives == 0.0 {
            return Err(TrainerError::DegenerateLabels);
        }
        let weight_pos = n / (2.0 * positives);
        let weight_neg = n / (2.0 * negatives);
        info!(
            "Fitting logistic model on {} rows x {} features (class weights {:.3}/{:.3})",
            x.len(),
            dimension,
            weight_neg,
            weight_pos
        );

        let mut weights = vec![0.0; dimension];
        let mut bias = 0.0;
        let total_weight = weight_pos * positives + weight_neg * negatives;

        for epoch in 0..self.config.epochs {
            let mut grad_w = vec![0.0; dimension];
            let mut grad_b = 0.0;
            let mut loss = 0.0;

            for (vector, &label) in x.iter().zip(y) {
                let linear: f64 = weights
                    .iter()
                    .zip(vector.as_slice())
                    .map(|(w, v)| w * v)
                    .sum::<f64>()
                    + bias;
                let p = sigmoid(linear);
                let target = label as f64;
                let sample_weight = if label == 1 { weight_pos } else { weight_neg };

                let residual = sample_weight * (p - target);
                for (g, v) in grad_w.iter_mut().zip(vector.as_slice()) {
                    *g += residual * v;
                }
                grad_b += residual;

                let p_clamped = p.clamp(1e-12, 1.0 - 1e-12);
                loss -= sample_weight
                    * (target * p_clamped.ln() + (1.0 - target) * (1.0 - p_clamped).ln());
            }

            for (w, g) in weights.iter_mut().zip(&grad_w) {
                *w -= self.config.learning_rate * (g / total_weight + self.config.l2 * *w);
            }
            bias -= self.config.learning_rate * grad_b / total_weight;

            if epoch % 100 == 0 {
                debug!(epoch, loss = loss / total_weight, "Training progress");
            }
        }

        Ok(ScorerParams { weights, bias })
    }
}
