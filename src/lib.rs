//! FinSafe Decision Engine
//!
//! Scores a single financial transaction for fraud risk and emits a risk
//! segment, recommended action, and explanatory risk metrics. The engine
//! prefers a trained ONNX classifier (with its paired feature scaler) and
//! degrades to a deterministic rule-based scorer when no model is loaded or
//! inference fails. Presentation, transport, and persistence are host
//! concerns; this crate exposes plain types and a synchronous `decide` call.

pub mod config;
pub mod engine;
pub mod error;
pub mod features;
pub mod heuristic;
pub mod models;
pub mod segmenter;
pub mod types;

pub use config::EngineConfig;
pub use engine::DecisionEngine;
pub use error::{InferenceFailure, ValidationError};
pub use features::{FeatureVector, FeatureVectorizer};
pub use heuristic::HeuristicScorer;
pub use models::{ModelBundle, ScoringSource};
pub use types::{
    DecisionResult, RecommendedAction, RiskMetric, RiskSegment, ScoreSource, TransactionInput,
    TransactionMethod,
};
