//! Feature Encoding Pipeline
//!
//! Maps raw customer records into schema-ordered, standardized feature
//! vectors. Everything downstream of the encoder is positional: once a
//! record is vectorized, the scaler and scorer never see field names again.

mod encoder;
mod record;
mod scaler;
mod schema;

pub use encoder::{Encoder, FeatureVector};
pub use record::{FieldValue, MatchOutcome, RawRecord};
pub use scaler::{Scaler, ScalerParams};
pub use schema::{FeatureColumn, FeatureKind, FeatureSchema, SchemaError, SCHEMA_VERSION};

use thiserror::Error;

/// Errors during feature encoding and scaling
#[derive(Debug, Clone, Error)]
pub enum FeatureError {
    /// A supplied numeric field is NaN or infinite
    #[error("Field '{field}' has non-finite value {value}")]
    NonFiniteValue { field: String, value: f64 },

    /// Vector length does not match the schema
    #[error("Dimension mismatch: expected {expected} features, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Scaler fitted on an empty batch
    #[error("Cannot fit scaler on an empty batch")]
    EmptyBatch,
}
