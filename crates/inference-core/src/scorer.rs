//! Linear Scoring with a Logistic Link

use crate::InferenceError;
use feature_pipeline::FeatureVector;
use serde::{Deserialize, Serialize};

/// Logistic link mapping a real-valued score to a probability in (0, 1)
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Trained linear model parameters, positionally aligned to the schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScorerParams {
    /// Per-feature weights
    pub weights: Vec<f64>,
    /// Intercept
    pub bias: f64,
}

impl ScorerParams {
    /// Number of features the model was trained on
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Churn probability for one scaled feature vector:
    /// `sigmoid(bias + w . x)`.
    ///
    /// Identical regardless of the loss weighting used to train the
    /// parameters; class balancing affects fitting only.
    pub fn score(&self, scaled: &FeatureVector) -> Result<f64, InferenceError> {
        if scaled.len() != self.weights.len() {
            return Err(InferenceError::InvalidInputShape {
                expected: self.weights.len(),
                actual: scaled.len(),
            });
        }

        let linear: f64 = self
            .weights
            .iter()
            .zip(scaled.as_slice())
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.bias;

        Ok(sigmoid(linear))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_sigmoid_reference_points() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert!((sigmoid(1.0) - 0.731_058_578_630_004_9).abs() < 1e-15);
        assert!((sigmoid(-1.0) - (1.0 - sigmoid(1.0))).abs() < 1e-15);
    }

    #[test]
    fn test_score_linear_combination() {
        let params = ScorerParams {
            weights: vec![0.5, -0.25, 0.0],
            bias: 0.75,
        };
        // linear = 0.75 + 0.5*2 - 0.25*3 = 1.0
        let p = params
            .score(&FeatureVector::new(vec![2.0, 3.0, 99.0]))
            .unwrap();
        assert!((p - sigmoid(1.0)).abs() < 1e-15);
    }

    #[test]
    fn test_score_rejects_shape_mismatch() {
        let params = ScorerParams {
            weights: vec![1.0, 1.0],
            bias: 0.0,
        };
        let err = params.score(&FeatureVector::new(vec![1.0])).unwrap_err();
        assert!(matches!(
            err,
            InferenceError::InvalidInputShape {
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn test_monotone_in_positively_weighted_feature() {
        let params = ScorerParams {
            weights: vec![0.8, -0.3],
            bias: 0.1,
        };
        let mut last = 0.0;
        for step in 0..10 {
            let x = -2.0 + step as f64 * 0.5;
            let p = params.score(&FeatureVector::new(vec![x, 1.0])).unwrap();
            assert!(p > last);
            last = p;
        }
    }

    proptest! {
        /// Probability is strictly inside (0, 1) for bounded inputs.
        #[test]
        fn prop_probability_bounded(
            weights in proptest::collection::vec(-10.0f64..10.0, 4),
            bias in -10.0f64..10.0,
            x in proptest::collection::vec(-10.0f64..10.0, 4),
        ) {
            let params = ScorerParams { weights, bias };
            let p = params.score(&FeatureVector::new(x)).unwrap();
            prop_assert!(p > 0.0 && p < 1.0);
        }
    }
}
