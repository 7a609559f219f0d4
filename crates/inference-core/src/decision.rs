//! Probability Thresholding

use serde::{Deserialize, Serialize};

/// Binary churn outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChurnLabel {
    /// Customer predicted to stay
    NoChurn,
    /// Customer predicted to discontinue service
    Churn,
}

impl ChurnLabel {
    /// Human-readable label text
    pub fn as_str(&self) -> &'static str {
        match self {
            ChurnLabel::NoChurn => "No Churn",
            ChurnLabel::Churn => "Churn",
        }
    }

    /// 0/1 encoding used on the wire
    pub fn as_int(&self) -> u8 {
        match self {
            ChurnLabel::NoChurn => 0,
            ChurnLabel::Churn => 1,
        }
    }
}

/// One thresholded prediction; request-scoped, never persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Threshold the caller supplied
    pub threshold: f64,
    /// Churn probability from the scorer, in (0, 1)
    pub probability: f64,
    /// Thresholded outcome
    pub label: ChurnLabel,
}

/// Threshold a probability into a churn label. Equality counts as churn.
///
/// The threshold is taken as given: values outside [0, 1] degrade to
/// all-or-nothing labeling rather than being clamped.
pub fn decide(probability: f64, threshold: f64) -> Prediction {
    let label = if probability >= threshold {
        ChurnLabel::Churn
    } else {
        ChurnLabel::NoChurn
    };
    Prediction {
        threshold,
        probability,
        label,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_counts_as_churn() {
        let prediction = decide(0.5, 0.5);
        assert_eq!(prediction.label, ChurnLabel::Churn);
        assert_eq!(prediction.label.as_int(), 1);
        assert_eq!(prediction.label.as_str(), "Churn");
    }

    #[test]
    fn test_below_threshold_is_no_churn() {
        let prediction = decide(0.499, 0.5);
        assert_eq!(prediction.label, ChurnLabel::NoChurn);
        assert_eq!(prediction.label.as_int(), 0);
        assert_eq!(prediction.label.as_str(), "No Churn");
    }

    #[test]
    fn test_zero_threshold_always_churns() {
        for p in [0.0, 1e-12, 0.3, 0.999, 1.0] {
            assert_eq!(decide(p, 0.0).label, ChurnLabel::Churn);
        }
    }

    #[test]
    fn test_out_of_range_threshold_never_churns() {
        for p in [0.0, 0.5, 0.999, 1.0] {
            assert_eq!(decide(p, 1.01).label, ChurnLabel::NoChurn);
        }
    }
}
