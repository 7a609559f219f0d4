//! Filesystem Artifact Store

use crate::artifact::{ModelArtifact, ScalerArtifact};
use crate::StoreError;
use feature_pipeline::{FeatureSchema, ScalerParams};
use inference_core::ScorerParams;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Scaler artifact file name inside the artifact directory
pub const SCALER_FILE: &str = "scaler.json";
/// Model artifact file name inside the artifact directory
pub const MODEL_FILE: &str = "model.json";

/// Directory-backed store for the trained artifact pair.
/// Written by the training pipeline, read-only to the serving core.
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn write_json<T: Serialize>(&self, file: &str, value: &T) -> Result<(), StoreError> {
        let path = self.dir.join(file);
        fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io {
            path: self.dir.display().to_string(),
            source,
        })?;
        let body = serde_json::to_string_pretty(value).map_err(|source| StoreError::Corrupt {
            path: path.display().to_string(),
            source,
        })?;
        fs::write(&path, body).map_err(|source| StoreError::Io {
            path: path.display().to_string(),
            source,
        })
    }

    fn read_json<T: DeserializeOwned>(&self, file: &str) -> Result<T, StoreError> {
        let path = self.dir.join(file);
        let body = fs::read_to_string(&path).map_err(|source| StoreError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&body).map_err(|source| StoreError::Corrupt {
            path: path.display().to_string(),
            source,
        })
    }

    /// Persist a fitted scaler under the schema that produced it
    pub fn save_scaler(
        &self,
        schema: &FeatureSchema,
        params: &ScalerParams,
    ) -> Result<(), StoreError> {
        self.write_json(SCALER_FILE, &ScalerArtifact::new(schema, params))?;
        info!("Saved scaler artifact to {}", self.dir.join(SCALER_FILE).display());
        Ok(())
    }

    /// Persist fitted model weights under the schema that produced them
    pub fn save_model(
        &self,
        schema: &FeatureSchema,
        params: &ScorerParams,
    ) -> Result<(), StoreError> {
        self.write_json(MODEL_FILE, &ModelArtifact::new(schema, params))?;
        info!("Saved model artifact to {}", self.dir.join(MODEL_FILE).display());
        Ok(())
    }

    /// Load both artifacts and verify each against the live schema and
    /// against each other. Any failure here must keep the service from
    /// starting; the artifact pair is only deployable as a unit.
    pub fn load_bundle(
        &self,
        schema: &FeatureSchema,
    ) -> Result<(ScalerParams, ScorerParams), StoreError> {
        let scaler: ScalerArtifact = self.read_json(SCALER_FILE)?;
        let model: ModelArtifact = self.read_json(MODEL_FILE)?;

        schema
            .check_columns(&scaler.schema_version, &scaler.columns)
            .map_err(|source| StoreError::SchemaMismatch {
                path: self.dir.join(SCALER_FILE).display().to_string(),
                source,
            })?;
        schema
            .check_columns(&model.schema_version, &model.columns)
            .map_err(|source| StoreError::SchemaMismatch {
                path: self.dir.join(MODEL_FILE).display().to_string(),
                source,
            })?;
        if scaler.schema_version != model.schema_version {
            return Err(StoreError::PairMismatch {
                scaler_version: scaler.schema_version,
                model_version: model.schema_version,
            });
        }

        info!(
            "Loaded artifact bundle from {} (schema {})",
            self.dir.display(),
            scaler.schema_version
        );
        Ok((scaler.into_params(), model.into_params()))
    }
}
