//! Churn Service - Main Entry Point

use anyhow::Context;
use api::{init_logging, run_server, ServiceConfig};
use feature_pipeline::FeatureSchema;
use inference_core::ChurnPredictor;
use model_store::ArtifactStore;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = ServiceConfig::load().context("Failed to load service configuration")?;
    let schema = FeatureSchema::telco();
    info!(
        "=== Churn Prediction Service v{} (schema {}) ===",
        env!("CARGO_PKG_VERSION"),
        schema.version()
    );

    // Artifact loading is the readiness gate: any failure here is fatal
    // and the service never starts answering requests
    let store = ArtifactStore::new(&config.artifact_dir);
    let (scaler, scorer) = store
        .load_bundle(&schema)
        .context("Artifact load failed; refusing to serve")?;
    let predictor = ChurnPredictor::new(schema, scaler, scorer)
        .context("Loaded artifacts do not fit the schema")?;

    run_server(&config, predictor)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {e}"))?;

    Ok(())
}
