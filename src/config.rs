//! Configuration for the decision engine

use anyhow::{Context, Result};
use config::{Config, File};
use serde::Deserialize;
use std::path::Path;

use crate::segmenter::MEDIUM_RISK_THRESHOLD;

/// Engine configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Classifier/scaler artifact locations.
    #[serde(default)]
    pub artifacts: ArtifactConfig,
    /// Risk segmentation knobs.
    #[serde(default)]
    pub segmentation: SegmentationConfig,
}

/// Location of the serialized classifier and its paired scaler.
#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactConfig {
    /// Path to the ONNX classifier.
    #[serde(default = "default_model_path")]
    pub model_path: String,
    /// Path to the JSON scaler parameters.
    #[serde(default = "default_scaler_path")]
    pub scaler_path: String,
    /// Intra-op threads for ONNX inference.
    #[serde(default = "default_onnx_threads")]
    pub onnx_threads: usize,
}

/// Risk segmentation configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SegmentationConfig {
    /// Probability above which a non-fraud prediction is flagged for
    /// secondary review.
    #[serde(default = "default_medium_threshold")]
    pub medium_threshold: f64,
}

fn default_model_path() -> String {
    "artifacts/fraud_model.onnx".to_string()
}

fn default_scaler_path() -> String {
    "artifacts/scaler.json".to_string()
}

fn default_onnx_threads() -> usize {
    1
}

fn default_medium_threshold() -> f64 {
    MEDIUM_RISK_THRESHOLD
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
            scaler_path: default_scaler_path(),
            onnx_threads: default_onnx_threads(),
        }
    }
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            medium_threshold: default_medium_threshold(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            artifacts: ArtifactConfig::default(),
            segmentation: SegmentationConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from_path("config/engine.toml")
    }

    /// Load configuration from a specific TOML file.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .context("failed to build configuration")?;

        config
            .try_deserialize()
            .context("failed to deserialize configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.artifacts.model_path, "artifacts/fraud_model.onnx");
        assert_eq!(config.artifacts.scaler_path, "artifacts/scaler.json");
        assert_eq!(config.artifacts.onnx_threads, 1);
        assert_eq!(config.segmentation.medium_threshold, 0.30);
    }

    #[test]
    fn test_load_from_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.toml");
        std::fs::write(
            &path,
            r#"
[artifacts]
model_path = "/opt/finsafe/fraud_model.onnx"
scaler_path = "/opt/finsafe/scaler.json"
onnx_threads = 2

[segmentation]
medium_threshold = 0.25
"#,
        )
        .unwrap();

        let config = EngineConfig::load_from_path(&path).unwrap();
        assert_eq!(config.artifacts.model_path, "/opt/finsafe/fraud_model.onnx");
        assert_eq!(config.artifacts.onnx_threads, 2);
        assert_eq!(config.segmentation.medium_threshold, 0.25);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.toml");
        std::fs::write(&path, "[artifacts]\nmodel_path = \"m.onnx\"\n").unwrap();

        let config = EngineConfig::load_from_path(&path).unwrap();
        assert_eq!(config.artifacts.model_path, "m.onnx");
        assert_eq!(config.artifacts.scaler_path, "artifacts/scaler.json");
        assert_eq!(config.segmentation.medium_threshold, 0.30);
    }
}
