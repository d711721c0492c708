//! Feature vectorization for classifier inference.
//!
//! Transforms a validated transaction into the fixed-order numeric vector the
//! classifier and its scaler were fitted on. Field order and count here are a
//! contract with the training pipeline; changing either requires retraining.

use crate::error::ValidationError;
use crate::types::transaction::{TransactionInput, AMOUNT_MAX, AMOUNT_MIN};

/// Number of features produced per transaction.
pub const FEATURE_COUNT: usize = 8;

/// Version tag of the method-code mapping baked into
/// [`crate::types::TransactionMethod::code`]. Stored alongside retrained
/// artifacts so encoding drift is caught at load time instead of silently
/// skewing scores.
pub const METHOD_ENCODING_VERSION: &str = "v1";

/// Feature column names in fit-time order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "amount",
    "is_refund",
    "amount_abs",
    "transaction_hour",
    "transaction_day",
    "transaction_month",
    "use_chip_encoded",
    "state_encoded",
];

/// Fixed-length, fixed-order feature vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f32; FEATURE_COUNT]);

impl FeatureVector {
    /// Feature values in fit-time column order.
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }
}

/// Vectorizer that turns raw transactions into model input features.
///
/// Pure and deterministic. Rejects out-of-range input before encoding;
/// everything downstream of it may assume validated fields.
pub struct FeatureVectorizer;

impl FeatureVectorizer {
    pub fn new() -> Self {
        Self
    }

    /// Validate bounds on a raw transaction without encoding it.
    pub fn validate(&self, tx: &TransactionInput) -> Result<(), ValidationError> {
        // NaN fails the range check and is rejected with the same error.
        if !(AMOUNT_MIN..=AMOUNT_MAX).contains(&tx.amount) {
            return Err(ValidationError::AmountOutOfRange {
                value: tx.amount,
                min: AMOUNT_MIN,
                max: AMOUNT_MAX,
            });
        }
        if tx.hour > 23 {
            return Err(ValidationError::FieldOutOfRange {
                field: "hour",
                value: tx.hour,
                min: 0,
                max: 23,
            });
        }
        if tx.day > 6 {
            return Err(ValidationError::FieldOutOfRange {
                field: "day",
                value: tx.day,
                min: 0,
                max: 6,
            });
        }
        if !(1..=12).contains(&tx.month) {
            return Err(ValidationError::FieldOutOfRange {
                field: "month",
                value: tx.month,
                min: 1,
                max: 12,
            });
        }
        Ok(())
    }

    /// Extract the feature vector for a transaction.
    ///
    /// Column order matches [`FEATURE_NAMES`]. The contextual state code
    /// encodes to 0.0 when absent; that default directly affects scores and is
    /// part of the contract.
    pub fn vectorize(&self, tx: &TransactionInput) -> Result<FeatureVector, ValidationError> {
        self.validate(tx)?;

        Ok(FeatureVector([
            tx.amount as f32,
            if tx.is_refund() { 1.0 } else { 0.0 },
            tx.amount.abs() as f32,
            tx.hour as f32,
            tx.day as f32,
            tx.month as f32,
            tx.method.code() as f32,
            tx.state.unwrap_or(0) as f32,
        ]))
    }

    /// Number of features produced.
    pub fn feature_count(&self) -> usize {
        FEATURE_COUNT
    }
}

impl Default for FeatureVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TransactionMethod;

    #[test]
    fn test_vectorize_order_and_values() {
        let vectorizer = FeatureVectorizer::new();
        let tx = TransactionInput::new(25.0, 14, 2, 6, TransactionMethod::Chip);

        let features = vectorizer.vectorize(&tx).unwrap();

        assert_eq!(
            features.as_slice(),
            &[25.0, 0.0, 25.0, 14.0, 2.0, 6.0, 0.0, 0.0]
        );
        assert_eq!(features.as_slice().len(), FEATURE_COUNT);
        assert_eq!(FEATURE_NAMES.len(), FEATURE_COUNT);
    }

    #[test]
    fn test_refund_derivation() {
        let vectorizer = FeatureVectorizer::new();
        let tx = TransactionInput::new(-50.0, 10, 0, 1, TransactionMethod::Online);

        let features = vectorizer.vectorize(&tx).unwrap();

        assert_eq!(features.as_slice()[0], -50.0);
        assert_eq!(features.as_slice()[1], 1.0); // is_refund
        assert_eq!(features.as_slice()[2], 50.0); // amount_abs
    }

    #[test]
    fn test_state_code_encoding() {
        let vectorizer = FeatureVectorizer::new();
        let mut tx = TransactionInput::new(100.0, 10, 0, 1, TransactionMethod::Swipe);

        let absent = vectorizer.vectorize(&tx).unwrap();
        assert_eq!(absent.as_slice()[7], 0.0);

        tx.state = Some(36);
        let present = vectorizer.vectorize(&tx).unwrap();
        assert_eq!(present.as_slice()[7], 36.0);
    }

    #[test]
    fn test_hour_out_of_range_rejected() {
        let vectorizer = FeatureVectorizer::new();
        let tx = TransactionInput::new(25.0, 100, 2, 6, TransactionMethod::Chip);

        let err = vectorizer.vectorize(&tx).unwrap_err();
        assert_eq!(
            err,
            ValidationError::FieldOutOfRange {
                field: "hour",
                value: 100,
                min: 0,
                max: 23,
            }
        );
    }

    #[test]
    fn test_amount_bounds_rejected() {
        let vectorizer = FeatureVectorizer::new();

        let too_high = TransactionInput::new(50000.5, 2, 2, 6, TransactionMethod::Online);
        assert!(vectorizer.vectorize(&too_high).is_err());

        let too_low = TransactionInput::new(-5000.5, 2, 2, 6, TransactionMethod::Online);
        assert!(vectorizer.vectorize(&too_low).is_err());

        let at_bound = TransactionInput::new(50000.0, 2, 2, 6, TransactionMethod::Online);
        assert!(vectorizer.vectorize(&at_bound).is_ok());
    }

    #[test]
    fn test_month_zero_rejected() {
        let vectorizer = FeatureVectorizer::new();
        let tx = TransactionInput::new(25.0, 2, 2, 0, TransactionMethod::Chip);
        assert!(vectorizer.validate(&tx).is_err());
    }
}
