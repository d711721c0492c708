//! Artifact loading and scoring-source resolution.
//!
//! The classifier (an ONNX graph) and its companion scaler are loaded as a
//! pair: either both load and schema-check cleanly, or the engine runs in
//! heuristic-only mode. Loading happens once at startup; a missing or corrupt
//! artifact degrades the engine, it never fails it.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use ort::session::{builder::GraphOptimizationLevel, Session};
use std::sync::RwLock;
use tracing::{info, warn};

use crate::config::ArtifactConfig;
use crate::models::scaler::FeatureScaler;

/// A loaded ONNX classifier with resolved I/O names.
pub struct LoadedClassifier {
    /// ONNX Runtime session. `Session::run` takes `&mut self`, so the session
    /// sits behind a lock; no logical state is mutated across calls.
    pub(crate) session: RwLock<Session>,
    /// Input name for the feature tensor.
    pub(crate) input_name: String,
    /// Output name carrying class probabilities.
    pub(crate) prob_output: String,
    /// Output name carrying the predicted label, when the graph exports one.
    pub(crate) label_output: Option<String>,
}

/// Classifier plus paired scaler, owned for the life of the process and
/// read-only after loading.
pub struct ModelBundle {
    pub(crate) classifier: LoadedClassifier,
    pub(crate) scaler: FeatureScaler,
    /// When the bundle was loaded.
    pub loaded_at: DateTime<Utc>,
}

/// The scoring path resolved once at startup.
///
/// Replaces per-request "is a model present" checks with a single tagged
/// variant the engine matches on.
pub enum ScoringSource {
    /// A classifier/scaler pair loaded successfully.
    Model(ModelBundle),
    /// No usable model; every request is scored by the heuristic rules.
    HeuristicOnly {
        /// Why the bundle is absent, for diagnostics.
        reason: String,
    },
}

impl ScoringSource {
    /// Load the artifact pair, degrading to heuristic-only on any failure.
    ///
    /// This is the one place load errors are swallowed: they are logged at
    /// WARN and recorded in the `HeuristicOnly` reason instead of propagated.
    pub fn resolve(artifacts: &ArtifactConfig) -> Self {
        match load_bundle(artifacts) {
            Ok(bundle) => {
                info!(
                    model = %artifacts.model_path,
                    scaler = %artifacts.scaler_path,
                    "model bundle loaded, scoring with classifier"
                );
                ScoringSource::Model(bundle)
            }
            Err(e) => {
                warn!(
                    error = format!("{e:#}"),
                    "model bundle unavailable, running heuristic-only"
                );
                ScoringSource::HeuristicOnly {
                    reason: format!("{e:#}"),
                }
            }
        }
    }

    /// True when a classifier is loaded and will be tried first.
    pub fn is_model(&self) -> bool {
        matches!(self, ScoringSource::Model(_))
    }
}

/// Load and schema-check the classifier/scaler pair.
///
/// Partial availability is treated as absence: a classifier without its
/// scaler (or the reverse) is an error, since the classifier only makes sense
/// on features standardized with its fit-time parameters.
pub fn load_bundle(artifacts: &ArtifactConfig) -> Result<ModelBundle> {
    let scaler = FeatureScaler::load(&artifacts.scaler_path)?;

    let classifier = load_classifier(artifacts)?;

    Ok(ModelBundle {
        classifier,
        scaler,
        loaded_at: Utc::now(),
    })
}

fn load_classifier(artifacts: &ArtifactConfig) -> Result<LoadedClassifier> {
    let path = std::path::Path::new(&artifacts.model_path);
    anyhow::ensure!(
        path.exists(),
        "classifier artifact not found: {}",
        path.display()
    );

    ort::init().commit()?;

    let session = Session::builder()?
        .with_optimization_level(GraphOptimizationLevel::Level3)?
        .with_intra_threads(artifacts.onnx_threads)?
        .commit_from_file(path)
        .with_context(|| format!("failed to load classifier from {}", path.display()))?;

    let input_name = session
        .inputs
        .first()
        .map(|i| i.name.clone())
        .unwrap_or_else(|| "float_input".to_string());

    // Classifier exports typically name these "probabilities" and "label";
    // fall back to the last output for the probability if neither matches.
    let prob_output = session
        .outputs
        .iter()
        .find(|o| o.name.contains("prob") || o.name.contains("output"))
        .map(|o| o.name.clone())
        .unwrap_or_else(|| {
            session
                .outputs
                .last()
                .map(|o| o.name.clone())
                .unwrap_or_else(|| "probabilities".to_string())
        });

    let label_output = session
        .outputs
        .iter()
        .find(|o| o.name.contains("label"))
        .map(|o| o.name.clone());

    info!(
        path = %path.display(),
        input = %input_name,
        prob_output = %prob_output,
        label_output = ?label_output,
        threads = artifacts.onnx_threads,
        "classifier loaded"
    );

    Ok(LoadedClassifier {
        session: RwLock::new(session),
        input_name,
        prob_output,
        label_output,
    })
}
