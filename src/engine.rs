//! Decision engine: orchestrates vectorization, scoring, and segmentation.

use chrono::Utc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::error::{InferenceFailure, ValidationError};
use crate::features::FeatureVectorizer;
use crate::heuristic::HeuristicScorer;
use crate::models::loader::ScoringSource;
use crate::segmenter;
use crate::types::decision::{DecisionResult, Score, ScoreSource};
use crate::types::transaction::TransactionInput;

/// Scores one transaction per call: validate and vectorize, score with the
/// classifier when a bundle is loaded (heuristic rules otherwise or on
/// inference failure), then segment.
///
/// Pure request/response with no suspension points and no per-request shared
/// mutation; a single engine can be shared across threads. The scoring source
/// is resolved once at construction and owned by the engine.
pub struct DecisionEngine {
    source: ScoringSource,
    vectorizer: FeatureVectorizer,
    heuristic: HeuristicScorer,
    medium_threshold: f64,
}

impl DecisionEngine {
    /// Build an engine around an already-resolved scoring source.
    pub fn new(source: ScoringSource) -> Self {
        Self {
            source,
            vectorizer: FeatureVectorizer::new(),
            heuristic: HeuristicScorer::new(),
            medium_threshold: segmenter::MEDIUM_RISK_THRESHOLD,
        }
    }

    /// Build an engine from configuration, resolving the artifact pair once.
    ///
    /// Never fails on missing or broken artifacts; those degrade the engine
    /// to heuristic-only scoring.
    pub fn from_config(config: &EngineConfig) -> Self {
        let mut engine = Self::new(ScoringSource::resolve(&config.artifacts));
        engine.medium_threshold = config.segmentation.medium_threshold;
        engine
    }

    /// True when a classifier is loaded and will be tried first.
    pub fn model_available(&self) -> bool {
        self.source.is_model()
    }

    /// Score a single transaction.
    ///
    /// The only error a caller can see is [`ValidationError`]; once input
    /// passes validation a result is guaranteed, because the heuristic scorer
    /// is total over the validated domain.
    pub fn decide(&self, input: &TransactionInput) -> Result<DecisionResult, ValidationError> {
        let features = self.vectorizer.vectorize(input)?;

        let (score, source, fell_back) = match &self.source {
            ScoringSource::Model(bundle) => {
                self.recover(bundle.score(&features), input)
            }
            ScoringSource::HeuristicOnly { .. } => {
                (self.heuristic.score(input), ScoreSource::Heuristic, false)
            }
        };

        let (segment, action) =
            segmenter::segment_with_threshold(score.is_fraud, score.probability, self.medium_threshold);

        // Always heuristic/explanatory signals, whatever produced the score.
        let risk_metrics = segmenter::risk_metrics(input);

        debug!(
            source = ?source,
            fell_back,
            probability = score.probability,
            segment = ?segment,
            "decision complete"
        );

        Ok(DecisionResult {
            decision_id: Uuid::new_v4(),
            is_fraud: score.is_fraud,
            probability: score.probability,
            segment,
            action,
            risk_metrics,
            source,
            fell_back,
            decided_at: Utc::now(),
        })
    }

    /// Turn a model score or inference failure into the score actually used.
    ///
    /// This is the explicit fallback branch: an inference failure is consumed
    /// here, logged, and answered by the heuristic within the same request.
    fn recover(
        &self,
        model_result: Result<Score, InferenceFailure>,
        input: &TransactionInput,
    ) -> (Score, ScoreSource, bool) {
        match model_result {
            Ok(score) => (score, ScoreSource::Model, false),
            Err(e) => {
                warn!(error = %e, "inference failed, falling back to heuristic scorer");
                (self.heuristic.score(input), ScoreSource::Heuristic, true)
            }
        }
    }
}
