//! Service configuration

use serde::Deserialize;

/// Churn service settings, from an optional `churn-service.toml` plus
/// `CHURN_*` environment overrides
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Address to bind the HTTP listener on
    pub bind_addr: String,
    /// Directory holding the scaler and model artifacts
    pub artifact_dir: String,
    /// Threshold applied when a request supplies none
    pub default_threshold: f64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            artifact_dir: "models".to_string(),
            default_threshold: 0.5,
        }
    }
}

impl ServiceConfig {
    /// Load settings from file and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        let defaults = Self::default();
        config::Config::builder()
            .set_default("bind_addr", defaults.bind_addr)?
            .set_default("artifact_dir", defaults.artifact_dir)?
            .set_default("default_threshold", defaults.default_threshold)?
            .add_source(config::File::with_name("churn-service").required(false))
            .add_source(config::Environment::with_prefix("CHURN"))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = ServiceConfig::default();
        assert_eq!(cfg.bind_addr, "0.0.0.0:8080");
        assert_eq!(cfg.artifact_dir, "models");
        assert_eq!(cfg.default_threshold, 0.5);
    }
}
