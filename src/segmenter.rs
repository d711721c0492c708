//! Risk segmentation and explanatory risk metrics.

use std::collections::BTreeMap;

use crate::types::decision::{RecommendedAction, RiskMetric, RiskSegment};
use crate::types::transaction::{TransactionInput, TransactionMethod};

/// Probability above which a non-fraud prediction is still flagged for review.
pub const MEDIUM_RISK_THRESHOLD: f64 = 0.30;

/// Map a predicted label and probability to a segment and action.
///
/// A fraud label forces High regardless of probability; otherwise the
/// probability alone decides between Medium and Low.
pub fn segment(is_fraud: bool, probability: f64) -> (RiskSegment, RecommendedAction) {
    segment_with_threshold(is_fraud, probability, MEDIUM_RISK_THRESHOLD)
}

/// [`segment`] with a caller-supplied medium-risk threshold.
pub fn segment_with_threshold(
    is_fraud: bool,
    probability: f64,
    medium_threshold: f64,
) -> (RiskSegment, RecommendedAction) {
    if is_fraud {
        (RiskSegment::High, RecommendedAction::BlockAndAlert)
    } else if probability > medium_threshold {
        (
            RiskSegment::Medium,
            RecommendedAction::ApproveWithSecondaryReview,
        )
    } else {
        (RiskSegment::Low, RecommendedAction::ApproveInstantly)
    }
}

/// Compute the explanatory risk signals for a transaction.
///
/// Independent of the scoring source: these are always heuristic signals for
/// display, never model outputs, and must not influence the segment decision.
/// Each value is clamped to [0, 1].
pub fn risk_metrics(tx: &TransactionInput) -> BTreeMap<RiskMetric, f64> {
    let mut metrics = BTreeMap::new();

    metrics.insert(
        RiskMetric::AmountVolatility,
        (tx.amount.abs() / 1000.0).min(1.0),
    );
    metrics.insert(
        RiskMetric::TemporalIrregularity,
        if tx.hour < 6 || tx.hour > 22 { 1.0 } else { 0.2 },
    );
    metrics.insert(
        RiskMetric::ChannelRisk,
        if tx.method == TransactionMethod::Online {
            0.8
        } else {
            0.1
        },
    );

    metrics
}
