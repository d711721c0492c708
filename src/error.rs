//! Error taxonomy for the decision engine
//!
//! `ValidationError` is the only error a caller of
//! [`crate::engine::DecisionEngine::decide`] can see. `InferenceFailure` is an
//! internal signal consumed by the engine's fallback branch, and model load
//! problems are folded into heuristic-only mode at startup rather than
//! surfaced.

use thiserror::Error;

/// Rejected input. Scoring is never attempted on invalid input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("amount {value} outside allowed range {min}..={max}")]
    AmountOutOfRange { value: f64, min: f64, max: f64 },

    #[error("{field} value {value} outside allowed range {min}..={max}")]
    FieldOutOfRange {
        field: &'static str,
        value: u8,
        min: u8,
        max: u8,
    },

    #[error("unknown transaction method {value:?}")]
    UnknownMethod { value: String },
}

/// A loaded model failed to produce a score for one request.
///
/// Never surfaced to callers: the decision engine answers with the heuristic
/// scorer instead. What to substitute is the engine's decision, so the gateway
/// reports the failure rather than defaulting internally.
#[derive(Debug, Error)]
pub enum InferenceFailure {
    #[error("feature vector has {got} features, scaler was fitted on {expected}")]
    SchemaMismatch { expected: usize, got: usize },

    #[error("classifier inference failed: {0}")]
    Inference(String),

    #[error("classifier output contained no usable probability")]
    MissingProbability,
}
