//! Feature scaler paired with the classifier.
//!
//! The classifier is fitted on standardized features; this applies the same
//! z-score transform at inference time. Scaler parameters are exported by the
//! training pipeline as a JSON artifact and must describe exactly the columns
//! the vectorizer produces.

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::InferenceFailure;
use crate::features::{FeatureVector, FEATURE_COUNT, FEATURE_NAMES};

/// Fit-time standardization parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureScaler {
    /// Per-column mean from fit time.
    pub mean: Vec<f64>,
    /// Per-column standard deviation from fit time.
    pub scale: Vec<f64>,
    /// Column names in fit-time order, used to detect schema drift at load.
    pub feature_names: Vec<String>,
}

impl FeatureScaler {
    /// Load scaler parameters from a JSON artifact and verify they match the
    /// vectorizer's feature layout.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read(path)
            .with_context(|| format!("failed to read scaler artifact {}", path.display()))?;
        let scaler: FeatureScaler = serde_json::from_slice(&raw)
            .with_context(|| format!("failed to parse scaler artifact {}", path.display()))?;
        scaler.validate_schema()?;
        Ok(scaler)
    }

    /// Verify parameter lengths and column names against the vectorizer
    /// contract. A mismatch here means the artifact pair belongs to a
    /// different feature layout and must not be used.
    pub fn validate_schema(&self) -> Result<()> {
        ensure!(
            self.mean.len() == FEATURE_COUNT && self.scale.len() == FEATURE_COUNT,
            "scaler fitted on {} columns, vectorizer produces {}",
            self.mean.len(),
            FEATURE_COUNT
        );
        ensure!(
            self.feature_names.len() == FEATURE_COUNT
                && self
                    .feature_names
                    .iter()
                    .zip(FEATURE_NAMES.iter())
                    .all(|(a, b)| a == b),
            "scaler feature names {:?} do not match vectorizer layout {:?}",
            self.feature_names,
            FEATURE_NAMES
        );
        Ok(())
    }

    /// Standardize a feature vector in fit-time column order.
    pub fn transform(&self, features: &FeatureVector) -> Result<Vec<f32>, InferenceFailure> {
        let values = features.as_slice();
        if self.mean.len() != values.len() || self.scale.len() != values.len() {
            return Err(InferenceFailure::SchemaMismatch {
                expected: self.mean.len(),
                got: values.len(),
            });
        }

        Ok(values
            .iter()
            .enumerate()
            .map(|(i, &value)| {
                // Zero-variance columns are scaled by 1, matching fit-time
                // behavior of the training pipeline.
                let scale = if self.scale[i] == 0.0 { 1.0 } else { self.scale[i] };
                ((value as f64 - self.mean[i]) / scale) as f32
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FeatureVectorizer;
    use crate::types::{TransactionInput, TransactionMethod};

    fn identity_scaler() -> FeatureScaler {
        FeatureScaler {
            mean: vec![0.0; FEATURE_COUNT],
            scale: vec![1.0; FEATURE_COUNT],
            feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_identity_transform() {
        let vectorizer = FeatureVectorizer::new();
        let tx = TransactionInput::new(25.0, 14, 2, 6, TransactionMethod::Chip);
        let features = vectorizer.vectorize(&tx).unwrap();

        let scaled = identity_scaler().transform(&features).unwrap();
        assert_eq!(scaled.as_slice(), features.as_slice());
    }

    #[test]
    fn test_standardization() {
        let mut scaler = identity_scaler();
        scaler.mean[0] = 10.0;
        scaler.scale[0] = 5.0;

        let vectorizer = FeatureVectorizer::new();
        let tx = TransactionInput::new(25.0, 14, 2, 6, TransactionMethod::Chip);
        let features = vectorizer.vectorize(&tx).unwrap();

        let scaled = scaler.transform(&features).unwrap();
        assert_eq!(scaled[0], 3.0); // (25 - 10) / 5
    }

    #[test]
    fn test_zero_variance_column_guard() {
        let mut scaler = identity_scaler();
        scaler.scale[3] = 0.0;

        let vectorizer = FeatureVectorizer::new();
        let tx = TransactionInput::new(25.0, 14, 2, 6, TransactionMethod::Chip);
        let features = vectorizer.vectorize(&tx).unwrap();

        let scaled = scaler.transform(&features).unwrap();
        assert_eq!(scaled[3], 14.0);
    }

    #[test]
    fn test_length_mismatch_is_inference_failure() {
        let mut scaler = identity_scaler();
        scaler.mean.pop();
        scaler.scale.pop();

        let vectorizer = FeatureVectorizer::new();
        let tx = TransactionInput::new(25.0, 14, 2, 6, TransactionMethod::Chip);
        let features = vectorizer.vectorize(&tx).unwrap();

        match scaler.transform(&features) {
            Err(InferenceFailure::SchemaMismatch { expected, got }) => {
                assert_eq!(expected, FEATURE_COUNT - 1);
                assert_eq!(got, FEATURE_COUNT);
            }
            other => panic!("expected schema mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_schema_validation_rejects_renamed_columns() {
        let mut scaler = identity_scaler();
        scaler.feature_names[6] = "use_chip".to_string();
        assert!(scaler.validate_schema().is_err());
    }
}
