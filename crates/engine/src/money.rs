use std::fmt;

use rust_decimal::Decimal;

use crate::{Currency, EngineError, ResultEngine};

/// Signed money amount in a given currency.
///
/// The amount is an exact decimal, so no floating-point drift is possible.
/// The sign carries meaning:
/// - positive = income
/// - negative = expense
///
/// Arithmetic between two values is only defined when both share the same
/// currency; otherwise [`EngineError::CurrencyMismatch`] is returned.
///
/// # Examples
///
/// ```rust
/// use engine::Money;
/// use rust_decimal::Decimal;
///
/// let amount = Money::new(Decimal::new(1234, 2), "usd").unwrap();
/// assert_eq!(amount.currency().code(), "USD");
/// assert_eq!(amount.to_string(), "12.34 USD");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    /// Creates a new amount, validating the currency code.
    pub fn new(amount: Decimal, currency: &str) -> ResultEngine<Self> {
        Ok(Self {
            amount,
            currency: Currency::new(currency)?,
        })
    }

    #[must_use]
    pub fn from_parts(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    #[must_use]
    pub fn zero(currency: Currency) -> Self {
        Self::from_parts(Decimal::ZERO, currency)
    }

    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    #[must_use]
    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    pub fn add(&self, other: &Money) -> ResultEngine<Money> {
        self.ensure_same_currency(other, "add")?;
        let amount = self
            .amount
            .checked_add(other.amount)
            .ok_or_else(|| overflow("add", self, other))?;
        Ok(Self::from_parts(amount, self.currency.clone()))
    }

    pub fn subtract(&self, other: &Money) -> ResultEngine<Money> {
        self.ensure_same_currency(other, "subtract")?;
        let amount = self
            .amount
            .checked_sub(other.amount)
            .ok_or_else(|| overflow("subtract", self, other))?;
        Ok(Self::from_parts(amount, self.currency.clone()))
    }

    pub fn multiply(&self, factor: Decimal) -> ResultEngine<Money> {
        let amount = self.amount.checked_mul(factor).ok_or_else(|| {
            EngineError::AmountOverflow(format!("cannot multiply {self} by {factor}"))
        })?;
        Ok(Self::from_parts(amount, self.currency.clone()))
    }

    #[must_use]
    pub fn abs(&self) -> Money {
        Self::from_parts(self.amount.abs(), self.currency.clone())
    }

    /// Returns `true` if the amount is strictly greater than 0.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    /// Returns `true` if the amount is strictly lower than 0.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    fn ensure_same_currency(&self, other: &Money, op: &str) -> ResultEngine<()> {
        if self.currency != other.currency {
            return Err(EngineError::CurrencyMismatch(format!(
                "cannot {op} {} and {}",
                self.currency, other.currency
            )));
        }
        Ok(())
    }
}

fn overflow(op: &str, left: &Money, right: &Money) -> EngineError {
    EngineError::AmountOverflow(format!("cannot {op} {left} and {right}"))
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} {}", self.amount, self.currency)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn usd(amount: Decimal) -> Money {
        Money::new(amount, "USD").unwrap()
    }

    #[test]
    fn add_then_subtract_restores_value() {
        let a = usd(dec!(120.45));
        let b = usd(dec!(-33.10));

        let back = a.add(&b).unwrap().subtract(&b).unwrap();

        assert_eq!(back, a);
    }

    #[test]
    fn arithmetic_across_currencies_fails() {
        let a = usd(dec!(10));
        let b = Money::new(dec!(10), "EUR").unwrap();

        assert_eq!(a.add(&b).unwrap_err().code(), "CURRENCY_MISMATCH");
        assert_eq!(a.subtract(&b).unwrap_err().code(), "CURRENCY_MISMATCH");
    }

    #[test]
    fn sign_predicates_are_strict() {
        let zero = Money::zero(Currency::default());

        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());
        assert!(usd(dec!(-0.01)).is_negative());
        assert_eq!(usd(dec!(-7.5)).abs().amount(), dec!(7.5));
    }

    #[test]
    fn multiply_keeps_currency() {
        let scaled = usd(dec!(12.5)).multiply(dec!(3)).unwrap();

        assert_eq!(scaled.amount(), dec!(37.5));
        assert_eq!(scaled.currency().code(), "USD");
    }

    #[test]
    fn arithmetic_out_of_range_is_an_error() {
        let big = usd(Decimal::MAX);

        assert_eq!(big.add(&usd(dec!(1))).unwrap_err().code(), "AMOUNT_OVERFLOW");
        assert_eq!(
            usd(Decimal::MIN).subtract(&usd(dec!(1))).unwrap_err().code(),
            "AMOUNT_OVERFLOW"
        );
        assert_eq!(big.multiply(dec!(2)).unwrap_err().code(), "AMOUNT_OVERFLOW");
    }

    #[test]
    fn display_uses_two_decimals() {
        assert_eq!(usd(dec!(75)).to_string(), "75.00 USD");
        assert_eq!(usd(dec!(-0.5)).to_string(), "-0.50 USD");
    }

    #[test]
    fn invalid_currency_is_rejected() {
        assert!(Money::new(dec!(1), "").is_err());
        assert!(Money::new(dec!(1), "DOLLAR").is_err());
    }
}
