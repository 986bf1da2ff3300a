use rust_decimal::Decimal;
use serde::Serialize;

/// Why a source could not supply a usable price.
///
/// The `Display` output is the exact message surfaced in reports and logs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuoteError {
    /// Transport failure or a body that could not be decoded at all.
    #[error("Error: {0}")]
    Request(String),

    #[error("Error: Empty response from API")]
    EmptyResponse,

    #[error("Error: API returned status {0}")]
    Status(String),

    #[error("Error: API returned errorCode {0}")]
    ErrorCode(String),

    #[error("Error: Invalid price data")]
    InvalidPrice,

    #[error("Error: Unable to get price for {0}")]
    Unavailable(String),
}

/// Result of asking one exchange for a spot price.
///
/// Either `price > 0` with no error, or `price == 0` with an error. The
/// quote-currency peg (`price == 1`) is the only success that is not a live
/// market value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExchangeQuote {
    pub source: String,
    pub price: Decimal,
    #[serde(serialize_with = "serialize_error")]
    pub error: Option<QuoteError>,
}

impl ExchangeQuote {
    pub fn ok(source: impl Into<String>, price: Decimal) -> Self {
        if price <= Decimal::ZERO {
            return Self::failed(source, QuoteError::InvalidPrice);
        }
        Self {
            source: source.into(),
            price,
            error: None,
        }
    }

    pub fn failed(source: impl Into<String>, error: QuoteError) -> Self {
        Self {
            source: source.into(),
            price: Decimal::ZERO,
            error: Some(error),
        }
    }

    /// Quote for the currency every source prices into.
    pub fn peg(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            price: Decimal::ONE,
            error: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// True when the resolver may accept this quote.
    pub fn is_usable(&self) -> bool {
        !self.is_error() && self.price > Decimal::ZERO
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }
}

fn serialize_error<S>(error: &Option<QuoteError>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match error {
        Some(err) => serializer.serialize_some(&err.to_string()),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_match_report_text() {
        assert_eq!(
            QuoteError::Request("connection refused".to_string()).to_string(),
            "Error: connection refused"
        );
        assert_eq!(
            QuoteError::EmptyResponse.to_string(),
            "Error: Empty response from API"
        );
        assert_eq!(
            QuoteError::Status("5600".to_string()).to_string(),
            "Error: API returned status 5600"
        );
        assert_eq!(
            QuoteError::ErrorCode("107".to_string()).to_string(),
            "Error: API returned errorCode 107"
        );
        assert_eq!(
            QuoteError::Unavailable("pepe".to_string()).to_string(),
            "Error: Unable to get price for pepe"
        );
    }

    #[test]
    fn non_positive_price_is_never_a_success() {
        let zero = ExchangeQuote::ok("Upbit", Decimal::ZERO);
        assert_eq!(zero.error, Some(QuoteError::InvalidPrice));
        assert_eq!(zero.price, Decimal::ZERO);

        let negative = ExchangeQuote::ok("Upbit", Decimal::NEGATIVE_ONE);
        assert!(!negative.is_usable());
        assert_eq!(negative.price, Decimal::ZERO);
    }

    #[test]
    fn peg_is_usable() {
        let quote = ExchangeQuote::peg("Bithumb");
        assert!(quote.is_usable());
        assert_eq!(quote.price, Decimal::ONE);
    }
}
