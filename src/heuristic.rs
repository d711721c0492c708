//! Rule-based fallback scorer.
//!
//! Used when no model bundle is loaded or inference fails. Operates on raw
//! input rather than the feature vector because it encodes domain rules, not
//! learned weights. Total over the validated input domain: it cannot fail.

use crate::types::decision::Score;
use crate::types::transaction::{TransactionInput, TransactionMethod};

/// Absolute amount above which an online late-night transaction is flagged.
pub const FLAG_AMOUNT: f64 = 5000.0;
/// Absolute amount above which a transaction is considered elevated risk.
pub const ELEVATED_AMOUNT: f64 = 2000.0;

const FLAG_PROBABILITY: f64 = 0.92;
const ELEVATED_PROBABILITY: f64 = 0.40;
const BASELINE_PROBABILITY: f64 = 0.05;

/// Deterministic rule-list scorer.
pub struct HeuristicScorer;

impl HeuristicScorer {
    pub fn new() -> Self {
        Self
    }

    /// Score a transaction with the ordered, first-match rule list:
    ///
    /// 1. |amount| > 5000 and method is online and hour outside 5..=23
    ///    → fraud, p = 0.92
    /// 2. |amount| > 2000 → not fraud, p = 0.40
    /// 3. otherwise → not fraud, p = 0.05
    pub fn score(&self, tx: &TransactionInput) -> Score {
        // The `hour > 23` arm is kept from the original rule set even though
        // validated input can never reach it.
        if tx.amount.abs() > FLAG_AMOUNT
            && tx.method == TransactionMethod::Online
            && (tx.hour < 5 || tx.hour > 23)
        {
            Score {
                probability: FLAG_PROBABILITY,
                is_fraud: true,
            }
        } else if tx.amount.abs() > ELEVATED_AMOUNT {
            Score {
                probability: ELEVATED_PROBABILITY,
                is_fraud: false,
            }
        } else {
            Score {
                probability: BASELINE_PROBABILITY,
                is_fraud: false,
            }
        }
    }
}

impl Default for HeuristicScorer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(amount: f64, hour: u8, method: TransactionMethod) -> TransactionInput {
        TransactionInput::new(amount, hour, 2, 6, method)
    }

    #[test]
    fn test_large_online_late_night_is_fraud() {
        let score = HeuristicScorer::new().score(&tx(7000.0, 2, TransactionMethod::Online));
        assert!(score.is_fraud);
        assert_eq!(score.probability, 0.92);
    }

    #[test]
    fn test_large_refund_online_late_night_is_fraud() {
        // Rule 1 uses the absolute amount, so a large refund matches too.
        let score = HeuristicScorer::new().score(&tx(-5001.0, 4, TransactionMethod::Online));
        assert!(score.is_fraud);
        assert_eq!(score.probability, 0.92);
    }

    #[test]
    fn test_large_online_daytime_falls_through_to_elevated() {
        let score = HeuristicScorer::new().score(&tx(7000.0, 14, TransactionMethod::Online));
        assert!(!score.is_fraud);
        assert_eq!(score.probability, 0.40);
    }

    #[test]
    fn test_large_swipe_late_night_falls_through_to_elevated() {
        // Rule 1 requires the online channel; method gates before amount.
        let score = HeuristicScorer::new().score(&tx(7000.0, 2, TransactionMethod::Swipe));
        assert!(!score.is_fraud);
        assert_eq!(score.probability, 0.40);
    }

    #[test]
    fn test_elevated_amount() {
        let score = HeuristicScorer::new().score(&tx(3000.0, 14, TransactionMethod::Swipe));
        assert!(!score.is_fraud);
        assert_eq!(score.probability, 0.40);
    }

    #[test]
    fn test_baseline() {
        let score = HeuristicScorer::new().score(&tx(25.0, 14, TransactionMethod::Chip));
        assert!(!score.is_fraud);
        assert_eq!(score.probability, 0.05);
    }

    #[test]
    fn test_boundary_amounts_are_exclusive() {
        let scorer = HeuristicScorer::new();
        assert_eq!(
            scorer.score(&tx(2000.0, 14, TransactionMethod::Chip)).probability,
            0.05
        );
        assert_eq!(
            scorer.score(&tx(5000.0, 2, TransactionMethod::Online)).probability,
            0.40
        );
    }
}
