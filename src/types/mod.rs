//! Type definitions for the decision engine

pub mod decision;
pub mod transaction;

pub use decision::{
    DecisionResult, RecommendedAction, RiskMetric, RiskSegment, Score, ScoreSource,
};
pub use transaction::{TransactionInput, TransactionMethod};
