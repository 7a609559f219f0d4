//! Trained Artifact Store
//!
//! Persists the scaler statistics and model weights as JSON blobs keyed to
//! the feature schema version, and refuses to load anything that does not
//! match the live schema exactly. A silent column drift between training
//! and serving yields plausible but wrong predictions, so mismatches are
//! fatal at load time, before the service ever answers a request.

mod artifact;
mod store;

pub use artifact::{ModelArtifact, ScalerArtifact};
pub use store::{ArtifactStore, MODEL_FILE, SCALER_FILE};

use feature_pipeline::SchemaError;
use thiserror::Error;

/// Errors while persisting or loading artifacts
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Artifact I/O failed for '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Artifact '{path}' is corrupt: {source}")]
    Corrupt {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Artifact disagrees with the live feature schema
    #[error("Schema mismatch in '{path}': {source}")]
    SchemaMismatch {
        path: String,
        #[source]
        source: SchemaError,
    },

    /// Scaler and model artifacts disagree with each other
    #[error("Artifact pair mismatch: scaler is '{scaler_version}', model is '{model_version}'")]
    PairMismatch {
        scaler_version: String,
        model_version: String,
    },
}
