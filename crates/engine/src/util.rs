//! Internal helpers for model validation and conversion.
//!
//! These utilities are **not** part of the public API. Constructors call them
//! explicitly so every entity enforces the same invariants.

use std::str::FromStr;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{Currency, EngineError, ResultEngine};

/// Trim a display name and reject it when empty.
pub(crate) fn normalize_required_name(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidName(format!(
            "{label} name must not be empty"
        )));
    }
    Ok(trimmed.to_string())
}

/// Reject blank owner ids.
pub(crate) fn ensure_user_id(user_id: &str) -> ResultEngine<()> {
    if user_id.trim().is_empty() {
        return Err(EngineError::EmptyValue("user id".to_string()));
    }
    Ok(())
}

/// Parse a UUID from storage and return a labeled error on failure.
pub(crate) fn parse_uuid(value: &str, label: &str) -> ResultEngine<Uuid> {
    Uuid::parse_str(value).map_err(|_| EngineError::InvalidId(format!("invalid {label} id")))
}

/// Parse a decimal amount stored as text.
pub(crate) fn parse_decimal(value: &str, label: &str) -> ResultEngine<Decimal> {
    Decimal::from_str(value.trim())
        .map_err(|_| EngineError::InvalidAmount(format!("invalid {label}: {value}")))
}

/// Parse a currency code stored in the DB into a strongly typed `Currency`.
pub(crate) fn model_currency(value: &str) -> ResultEngine<Currency> {
    Currency::new(value)
}
