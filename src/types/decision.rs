//! Decision output types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Coarse risk bucket derived from fraud probability and label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskSegment {
    Low,
    Medium,
    High,
}

/// Recommended handling for the transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendedAction {
    /// Approve with no further checks.
    ApproveInstantly,
    /// Approve but flag for secondary review.
    ApproveWithSecondaryReview,
    /// Block the transaction and alert risk management.
    BlockAndAlert,
}

/// Which scoring path produced the probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreSource {
    /// Trained classifier via the model gateway.
    Model,
    /// Rule-based heuristic scorer.
    Heuristic,
}

/// Explanatory risk signals shown alongside a decision.
///
/// These are computed from the raw input independently of the classifier and
/// never influence the segment decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskMetric {
    AmountVolatility,
    TemporalIrregularity,
    ChannelRisk,
}

/// A fraud probability paired with the predicted label.
///
/// Both the model gateway and the heuristic scorer produce this shape, so the
/// decision engine can treat them interchangeably after the scoring stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Score {
    /// Fraud probability in [0, 1].
    pub probability: f64,
    /// Predicted label.
    pub is_fraud: bool,
}

/// Result of scoring one transaction.
///
/// Constructed fresh per request by the decision engine and immutable once
/// returned. The core never persists these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionResult {
    /// Unique decision identifier.
    pub decision_id: uuid::Uuid,

    /// Predicted label.
    pub is_fraud: bool,

    /// Fraud probability in [0, 1].
    pub probability: f64,

    /// Risk segment.
    pub segment: RiskSegment,

    /// Recommended action.
    pub action: RecommendedAction,

    /// Explanatory signals, each clamped to [0, 1].
    pub risk_metrics: BTreeMap<RiskMetric, f64>,

    /// Scoring path that produced the probability.
    pub source: ScoreSource,

    /// True when a loaded model failed at inference time and the heuristic
    /// answered instead.
    pub fell_back: bool,

    /// Decision timestamp.
    pub decided_at: DateTime<Utc>,
}
