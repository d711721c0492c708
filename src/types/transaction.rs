//! Transaction input types for fraud risk scoring

use serde::{Deserialize, Serialize};

/// Lowest accepted transaction amount (negative amounts are refunds).
pub const AMOUNT_MIN: f64 = -5000.0;
/// Highest accepted transaction amount.
pub const AMOUNT_MAX: f64 = 50000.0;

/// How the transaction was performed.
///
/// This is a closed set shared between feature encoding and any retraining
/// pipeline. The integer codes returned by [`TransactionMethod::code`] are
/// versioned (see [`crate::features::METHOD_ENCODING_VERSION`]) and must not
/// be reordered without retraining the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionMethod {
    Chip,
    Online,
    Swipe,
}

impl TransactionMethod {
    /// Stable integer encoding consumed by the feature vectorizer.
    pub fn code(&self) -> u8 {
        match self {
            TransactionMethod::Chip => 0,
            TransactionMethod::Online => 1,
            TransactionMethod::Swipe => 2,
        }
    }

    /// Parse a method from its canonical name.
    ///
    /// Accepts the short serde names (`"chip"`, `"online"`, `"swipe"`) as well
    /// as the long form used by upstream data sources
    /// (`"Chip Transaction"` etc.). Unknown names are a validation error so
    /// that a new category can never be silently folded into an existing code.
    pub fn parse(name: &str) -> Result<Self, crate::error::ValidationError> {
        match name {
            "chip" | "Chip Transaction" => Ok(TransactionMethod::Chip),
            "online" | "Online Transaction" => Ok(TransactionMethod::Online),
            "swipe" | "Swipe Transaction" => Ok(TransactionMethod::Swipe),
            other => Err(crate::error::ValidationError::UnknownMethod {
                value: other.to_string(),
            }),
        }
    }
}

/// Raw transaction attributes supplied by the caller.
///
/// Bounds are enforced by the vectorizer before any scoring happens; nothing
/// upstream of this crate is trusted to have clamped them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionInput {
    /// Signed amount in currency units; negative means refund.
    pub amount: f64,

    /// Hour of day, 0-23.
    pub hour: u8,

    /// Day of week, 0 = Monday .. 6 = Sunday.
    pub day: u8,

    /// Month, 1-12.
    pub month: u8,

    /// Transaction method.
    pub method: TransactionMethod,

    /// Optional region/state code from the issuing context.
    ///
    /// Encodes to 0 when absent. The zero default is part of the scoring
    /// contract: a model trained with a meaningful region signal will see
    /// every request as region 0 unless the caller supplies one.
    #[serde(default)]
    pub state: Option<u16>,
}

impl TransactionInput {
    /// Create an input with the contextual state code left unset.
    pub fn new(amount: f64, hour: u8, day: u8, month: u8, method: TransactionMethod) -> Self {
        Self {
            amount,
            hour,
            day,
            month,
            method,
            state: None,
        }
    }

    /// True when the amount is a refund.
    pub fn is_refund(&self) -> bool {
        self.amount < 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_codes_are_stable() {
        assert_eq!(TransactionMethod::Chip.code(), 0);
        assert_eq!(TransactionMethod::Online.code(), 1);
        assert_eq!(TransactionMethod::Swipe.code(), 2);
    }

    #[test]
    fn test_method_parse_long_and_short_forms() {
        assert_eq!(
            TransactionMethod::parse("Online Transaction").unwrap(),
            TransactionMethod::Online
        );
        assert_eq!(
            TransactionMethod::parse("swipe").unwrap(),
            TransactionMethod::Swipe
        );
        assert!(TransactionMethod::parse("Carrier Pigeon").is_err());
    }

    #[test]
    fn test_transaction_serialization() {
        let tx = TransactionInput::new(25.0, 14, 2, 6, TransactionMethod::Chip);

        let json = serde_json::to_string(&tx).unwrap();
        let deserialized: TransactionInput = serde_json::from_str(&json).unwrap();

        assert_eq!(tx, deserialized);
    }

    #[test]
    fn test_state_defaults_to_none_in_serde() {
        let tx: TransactionInput = serde_json::from_str(
            r#"{"amount":-50.0,"hour":3,"day":0,"month":1,"method":"online"}"#,
        )
        .unwrap();

        assert_eq!(tx.state, None);
        assert!(tx.is_refund());
    }
}
