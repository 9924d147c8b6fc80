//! Request shape checks run before a request reaches the engine.
//!
//! Failures here are `400 Bad Request`; domain rules (currency equality,
//! negative totals, catalog linkage) stay in the engine.

use api_types::{
    budget::{BudgetNew, BudgetUpdate},
    record::{RecordNew, RecordUpdate},
};
use axum::{
    Json,
    extract::{
        Path, Query,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
};
use rust_decimal::Decimal;

use crate::ServerError;

const MAX_DESCRIPTION_LEN: usize = 500;

pub(crate) fn json<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ServerError> {
    payload
        .map(|Json(value)| value)
        .map_err(|err| ServerError::Generic(err.body_text()))
}

pub(crate) fn query<T>(payload: Result<Query<T>, QueryRejection>) -> Result<T, ServerError> {
    payload
        .map(|Query(value)| value)
        .map_err(|err| ServerError::Generic(err.body_text()))
}

pub(crate) fn path<T>(payload: Result<Path<T>, PathRejection>) -> Result<T, ServerError> {
    payload
        .map(|Path(value)| value)
        .map_err(|err| ServerError::Generic(err.body_text()))
}

fn bad(message: impl Into<String>) -> ServerError {
    ServerError::Generic(message.into())
}

fn check_positive_id(value: i32, label: &str) -> Result<(), ServerError> {
    if value <= 0 {
        return Err(bad(format!("{label} must be greater than 0")));
    }
    Ok(())
}

fn check_currency(value: &str) -> Result<(), ServerError> {
    if value.len() != 3 || !value.bytes().all(|b| b.is_ascii_alphabetic()) {
        return Err(bad("currency must be a 3-letter code"));
    }
    Ok(())
}

fn check_description(value: &str) -> Result<(), ServerError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(bad("description is required"));
    }
    if value.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(bad(format!(
            "description cannot exceed {MAX_DESCRIPTION_LEN} characters"
        )));
    }
    Ok(())
}

fn check_non_zero_amount(value: Decimal) -> Result<(), ServerError> {
    if value.is_zero() {
        return Err(bad("amount cannot be zero"));
    }
    Ok(())
}

fn check_planned(value: Decimal) -> Result<(), ServerError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(bad("planned amount must be greater than or equal to 0"));
    }
    Ok(())
}

pub(crate) fn record_new(payload: &RecordNew) -> Result<(), ServerError> {
    check_non_zero_amount(payload.amount)?;
    check_currency(&payload.currency)?;
    check_positive_id(payload.category_id, "category_id")?;
    check_positive_id(payload.subcategory_id, "subcategory_id")?;
    check_description(&payload.description)
}

pub(crate) fn record_update(payload: &RecordUpdate) -> Result<(), ServerError> {
    if payload.amount.is_none() && payload.currency.is_none() && payload.description.is_none()
    {
        return Err(bad("nothing to update"));
    }
    if let Some(amount) = payload.amount {
        check_non_zero_amount(amount)?;
    }
    if let Some(currency) = &payload.currency {
        check_currency(currency)?;
    }
    if let Some(description) = &payload.description {
        check_description(description)?;
    }
    Ok(())
}

pub(crate) fn budget_new(payload: &BudgetNew) -> Result<(), ServerError> {
    check_positive_id(payload.subcategory_id, "subcategory_id")?;
    check_planned(payload.planned_amount)?;
    check_currency(&payload.currency)
}

pub(crate) fn budget_update(payload: &BudgetUpdate) -> Result<(), ServerError> {
    check_planned(payload.planned_amount)?;
    if let Some(currency) = &payload.currency {
        check_currency(currency)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn record(amount: Decimal, description: &str) -> RecordNew {
        RecordNew {
            amount,
            currency: "USD".to_string(),
            category_id: 2,
            subcategory_id: 7,
            occurred_at: Utc::now(),
            description: description.to_string(),
        }
    }

    #[test]
    fn record_amount_must_be_non_zero() {
        assert!(record_new(&record(Decimal::ZERO, "x")).is_err());
        assert!(record_new(&record(Decimal::new(-75, 0), "Shoes")).is_ok());
    }

    #[test]
    fn record_description_is_bounded() {
        assert!(record_new(&record(Decimal::ONE, &"a".repeat(501))).is_err());
        assert!(record_new(&record(Decimal::ONE, "   ")).is_err());
    }

    #[test]
    fn padded_description_is_measured_trimmed() {
        let padded = format!("  {}  ", "a".repeat(500));
        assert!(record_new(&record(Decimal::ONE, &padded)).is_ok());
    }

    #[test]
    fn currency_must_be_three_ascii_letters() {
        let mut payload = record(Decimal::ONE, "Shoes");
        payload.currency = " eur ".to_string();
        assert!(record_new(&payload).is_err());
        payload.currency = "aßb".to_string();
        assert!(record_new(&payload).is_err());
        payload.currency = "eur".to_string();
        assert!(record_new(&payload).is_ok());
    }

    #[test]
    fn empty_record_update_is_rejected() {
        assert!(record_update(&RecordUpdate::default()).is_err());
    }

    #[test]
    fn currency_only_record_update_is_accepted() {
        let payload = RecordUpdate {
            currency: Some("USD".to_string()),
            ..RecordUpdate::default()
        };
        assert!(record_update(&payload).is_ok());
    }

    #[test]
    fn budget_shape_checks() {
        let mut budget = BudgetNew {
            year: 2024,
            month: 3,
            subcategory_id: 7,
            planned_amount: Decimal::ZERO,
            currency: "USD".to_string(),
        };
        assert!(budget_new(&budget).is_ok());

        budget.planned_amount = Decimal::NEGATIVE_ONE;
        assert!(budget_new(&budget).is_err());

        budget.planned_amount = Decimal::ONE;
        budget.currency = "DOLLAR".to_string();
        assert!(budget_new(&budget).is_err());

        budget.currency = "USD".to_string();
        budget.subcategory_id = 0;
        assert!(budget_new(&budget).is_err());
    }
}
