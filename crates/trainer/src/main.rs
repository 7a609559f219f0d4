//! Churn Trainer - Main Entry Point
//!
//! Usage: churn-trainer <clean_data.csv> <artifact_dir>

use anyhow::{bail, Context};
use feature_pipeline::FeatureSchema;
use model_store::ArtifactStore;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use trainer::{train, TrainConfig, TrainingSet};

fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    let mut args = std::env::args().skip(1);
    let (Some(data_path), Some(artifact_dir)) = (args.next(), args.next()) else {
        bail!("usage: churn-trainer <clean_data.csv> <artifact_dir>");
    };

    let schema = FeatureSchema::telco();
    info!(
        "=== Churn Trainer v{} (schema {}) ===",
        env!("CARGO_PKG_VERSION"),
        schema.version()
    );

    let set = TrainingSet::from_csv(&PathBuf::from(&data_path))
        .with_context(|| format!("Failed to load training data from {data_path}"))?;

    let model = train(schema, &set, TrainConfig::default()).context("Training failed")?;

    let store = ArtifactStore::new(artifact_dir);
    store
        .save_scaler(&schema, &model.scaler)
        .context("Failed to persist scaler artifact")?;
    store
        .save_model(&schema, &model.scorer)
        .context("Failed to persist model artifact")?;

    info!(
        "Training completed: {} rows, accuracy {:.3}, artifacts in {}",
        set.len(),
        model.train_accuracy,
        store.dir().display()
    );
    Ok(())
}
