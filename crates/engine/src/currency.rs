use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine};

/// Three-letter currency code carried by every money value.
///
/// The code is validated once and stored uppercased, so two currencies are
/// equal exactly when their codes are. No conversion between currencies is
/// ever performed.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Currency(String);

impl Currency {
    /// Default currency used when a caller does not state one.
    pub const DEFAULT_CODE: &'static str = "USD";

    /// Validate a raw code: exactly three ASCII letters, no padding.
    pub fn new(code: &str) -> ResultEngine<Self> {
        if code.trim().is_empty() {
            return Err(EngineError::InvalidCurrency(
                "currency cannot be empty".to_string(),
            ));
        }
        if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(EngineError::InvalidCurrency(format!(
                "currency must be a 3-letter code, got: {code}"
            )));
        }
        Ok(Self(code.to_ascii_uppercase()))
    }

    /// Canonical currency code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.0
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self(Self::DEFAULT_CODE.to_string())
    }
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<&str> for Currency {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for Currency {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Currency> for String {
    fn from(value: Currency) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_code_uppercased() {
        assert_eq!(Currency::new("usd").unwrap().code(), "USD");
        assert_eq!(Currency::new("eUr").unwrap().code(), "EUR");
    }

    #[test]
    fn padded_code_is_rejected() {
        assert_eq!(
            Currency::new(" eur ").unwrap_err().code(),
            "INVALID_CURRENCY"
        );
        assert!(Currency::new("eur ").is_err());
    }

    #[test]
    fn non_ascii_code_is_rejected() {
        assert!(Currency::new("aßb").is_err());
        assert!(Currency::new("€UR").is_err());
        assert!(Currency::new("U5D").is_err());
    }

    #[test]
    fn rejects_blank_and_wrong_length() {
        assert_eq!(
            Currency::new("  ").unwrap_err().code(),
            "INVALID_CURRENCY"
        );
        assert!(Currency::new("US").is_err());
        assert!(Currency::new("EURO").is_err());
    }

    #[test]
    fn default_is_usd() {
        assert_eq!(Currency::default().code(), "USD");
    }
}
