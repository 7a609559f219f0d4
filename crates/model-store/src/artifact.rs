//! Artifact Blob Formats

use feature_pipeline::{FeatureSchema, ScalerParams};
use inference_core::ScorerParams;
use serde::{Deserialize, Serialize};

/// Persisted scaler statistics, keyed to the schema that produced them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalerArtifact {
    /// Schema version the statistics were fitted under
    pub schema_version: String,
    /// Full ordered column list recorded at training time
    pub columns: Vec<String>,
    pub mean: Vec<f64>,
    pub std_dev: Vec<f64>,
    pub median: Vec<f64>,
}

impl ScalerArtifact {
    /// Record fitted parameters under the given schema
    pub fn new(schema: &FeatureSchema, params: &ScalerParams) -> Self {
        Self {
            schema_version: schema.version().to_string(),
            columns: schema.names().map(String::from).collect(),
            mean: params.mean.clone(),
            std_dev: params.std_dev.clone(),
            median: params.median.clone(),
        }
    }

    /// Runtime parameters carried by this artifact
    pub fn into_params(self) -> ScalerParams {
        ScalerParams {
            mean: self.mean,
            std_dev: self.std_dev,
            median: self.median,
        }
    }
}

/// Persisted model weights, keyed to the schema that produced them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Schema version the weights were fitted under
    pub schema_version: String,
    /// Full ordered column list recorded at training time
    pub columns: Vec<String>,
    pub weights: Vec<f64>,
    pub bias: f64,
}

impl ModelArtifact {
    /// Record fitted parameters under the given schema
    pub fn new(schema: &FeatureSchema, params: &ScorerParams) -> Self {
        Self {
            schema_version: schema.version().to_string(),
            columns: schema.names().map(String::from).collect(),
            weights: params.weights.clone(),
            bias: params.bias,
        }
    }

    /// Runtime parameters carried by this artifact
    pub fn into_params(self) -> ScorerParams {
        ScorerParams {
            weights: self.weights,
            bias: self.bias,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifacts_record_schema_identity() {
        let schema = FeatureSchema::telco();
        let scaler = ScalerArtifact::new(&schema, &ScalerParams::identity(schema.len()));

        assert_eq!(scaler.schema_version, schema.version());
        assert_eq!(scaler.columns.len(), 30);
        assert_eq!(scaler.columns[1], "tenure");

        let model = ModelArtifact::new(
            &schema,
            &ScorerParams {
                weights: vec![0.0; schema.len()],
                bias: -1.5,
            },
        );
        assert_eq!(model.columns, scaler.columns);
        assert_eq!(model.into_params().bias, -1.5);
    }

    #[test]
    fn test_json_round_trip() {
        let schema = FeatureSchema::telco();
        let artifact = ScalerArtifact::new(&schema, &ScalerParams::identity(schema.len()));

        let json = serde_json::to_string(&artifact).unwrap();
        let back: ScalerArtifact = serde_json::from_str(&json).unwrap();
        assert_eq!(back, artifact);
    }
}
