//! Command structs for engine operations.
//!
//! These types group parameters for write operations on records and budgets,
//! keeping call sites readable and avoiding long argument lists. Values are
//! raw (strings, decimals, plain integers); the engine validates them.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::{BudgetId, Currency, RecordId};

/// Create a record.
#[derive(Clone, Debug)]
pub struct CreateRecordCmd {
    pub user_id: String,
    pub amount: Decimal,
    pub currency: String,
    pub category_id: i32,
    pub subcategory_id: i32,
    pub occurred_at: DateTime<Utc>,
    pub description: String,
}

impl CreateRecordCmd {
    /// New command in the default currency.
    #[must_use]
    pub fn new(
        user_id: impl Into<String>,
        amount: Decimal,
        category_id: i32,
        subcategory_id: i32,
        occurred_at: DateTime<Utc>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            amount,
            currency: Currency::DEFAULT_CODE.to_string(),
            category_id,
            subcategory_id,
            occurred_at,
            description: description.into(),
        }
    }

    #[must_use]
    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }
}

/// Edit amount and/or description of an existing record.
///
/// Category, subcategory and time cannot change.
#[derive(Clone, Debug)]
pub struct UpdateRecordCmd {
    pub record_id: RecordId,
    pub user_id: String,
    pub amount: Option<Decimal>,
    /// When set, must match the record currency.
    pub currency: Option<String>,
    pub description: Option<String>,
}

impl UpdateRecordCmd {
    #[must_use]
    pub fn new(record_id: RecordId, user_id: impl Into<String>) -> Self {
        Self {
            record_id,
            user_id: user_id.into(),
            amount: None,
            currency: None,
            description: None,
        }
    }

    #[must_use]
    pub fn amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    #[must_use]
    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Create a monthly budget for one subcategory.
#[derive(Clone, Debug)]
pub struct CreateBudgetCmd {
    pub user_id: String,
    pub year: i32,
    pub month: u32,
    pub subcategory_id: i32,
    pub planned_amount: Decimal,
    pub currency: String,
}

impl CreateBudgetCmd {
    #[must_use]
    pub fn new(
        user_id: impl Into<String>,
        year: i32,
        month: u32,
        subcategory_id: i32,
        planned_amount: Decimal,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            year,
            month,
            subcategory_id,
            planned_amount,
            currency: Currency::DEFAULT_CODE.to_string(),
        }
    }

    #[must_use]
    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }
}

/// Change the planned amount of a budget.
#[derive(Clone, Debug)]
pub struct UpdateBudgetCmd {
    pub budget_id: BudgetId,
    pub user_id: String,
    pub planned_amount: Decimal,
    /// Defaults to the budget currency; any other value is rejected.
    pub currency: Option<String>,
}

impl UpdateBudgetCmd {
    #[must_use]
    pub fn new(budget_id: BudgetId, user_id: impl Into<String>, planned_amount: Decimal) -> Self {
        Self {
            budget_id,
            user_id: user_id.into(),
            planned_amount,
            currency: None,
        }
    }

    #[must_use]
    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }
}

/// Filter for listing records of one month.
#[derive(Clone, Debug)]
pub struct RecordQuery {
    pub user_id: String,
    pub year: i32,
    pub month: u32,
    pub subcategory_id: Option<i32>,
}

impl RecordQuery {
    #[must_use]
    pub fn new(user_id: impl Into<String>, year: i32, month: u32) -> Self {
        Self {
            user_id: user_id.into(),
            year,
            month,
            subcategory_id: None,
        }
    }

    #[must_use]
    pub fn subcategory_id(mut self, subcategory_id: i32) -> Self {
        self.subcategory_id = Some(subcategory_id);
        self
    }
}
