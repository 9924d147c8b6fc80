//! The module contains the errors the engine can return.
//!
//! Every [`EngineError`] carries a stable machine-readable [`code`] and
//! belongs to one [`ErrorKind`], so outer layers can translate failures
//! without matching on messages:
//!
//! - [`Validation`]: malformed money, calendar values, names and ids, amounts
//!   whose arithmetic leaves the decimal range, or a rejected mutation on an
//!   entity.
//! - [`NotFound`]: unknown id, or an id owned by another user.
//! - [`Conflict`]: the request contradicts stored state (duplicate budget,
//!   subcategory outside the stated category).
//!
//!  [`code`]: EngineError::code
//!  [`Validation`]: ErrorKind::Validation
//!  [`NotFound`]: ErrorKind::NotFound
//!  [`Conflict`]: ErrorKind::Conflict
use sea_orm::DbErr;
use thiserror::Error;

/// Coarse classification used to map errors onto caller outcomes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    Cancelled,
    Internal,
}

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid currency: {0}")]
    InvalidCurrency(String),
    #[error("Currency mismatch: {0}")]
    CurrencyMismatch(String),
    #[error("Year must be between 1900 and 3000, got: {0}")]
    InvalidYear(i32),
    #[error("Month must be between 1 and 12, got: {0}")]
    InvalidMonth(u32),
    #[error("Note text cannot be empty")]
    InvalidNote,
    #[error("Note text cannot exceed {max} characters, got: {len}")]
    NoteTooLong { len: usize, max: usize },
    #[error("Invalid name: {0}")]
    InvalidName(String),
    #[error("{0} cannot be empty")]
    EmptyValue(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Amount out of range: {0}")]
    AmountOverflow(String),
    #[error("Invalid id: {0}")]
    InvalidId(String),
    #[error("Subcategory belongs to category {subcategory_category}, not {category}")]
    CategoryMismatch {
        category: i32,
        subcategory_category: i32,
    },
    #[error("Subcategory with id {0} already exists")]
    DuplicateSubcategory(i32),
    #[error("Subcategory {subcategory} does not belong to category {category}")]
    InvalidSubcategory { category: i32, subcategory: i32 },
    #[error("Currency change not allowed: {0}")]
    CurrencyChangeNotAllowed(String),
    #[error("Planned budget cannot be negative")]
    NegativePlannedBudget,
    #[error("Actual spent cannot be negative")]
    NegativeActualSpent,
    #[error("Expense amount cannot be negative")]
    NegativeExpenseAmount,
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("Budget already exists: {0}")]
    BudgetAlreadyExists(String),
    #[error("Operation cancelled")]
    Cancelled,
    #[error("Missing store: {0}")]
    MissingStore(&'static str),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl EngineError {
    /// Stable machine-readable code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidCurrency(_) => "INVALID_CURRENCY",
            Self::CurrencyMismatch(_) => "CURRENCY_MISMATCH",
            Self::InvalidYear(_) => "INVALID_YEAR",
            Self::InvalidMonth(_) => "INVALID_MONTH",
            Self::InvalidNote => "INVALID_NOTE",
            Self::NoteTooLong { .. } => "NOTE_TOO_LONG",
            Self::InvalidName(_) => "INVALID_NAME",
            Self::EmptyValue(_) => "EMPTY_VALUE",
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::AmountOverflow(_) => "AMOUNT_OVERFLOW",
            Self::InvalidId(_) => "INVALID_ID",
            Self::CategoryMismatch { .. } => "SUBCATEGORY_CATEGORY_MISMATCH",
            Self::DuplicateSubcategory(_) => "DUPLICATE_SUBCATEGORY",
            Self::InvalidSubcategory { .. } => "INVALID_SUBCATEGORY_CATEGORY",
            Self::CurrencyChangeNotAllowed(_) => "CURRENCY_CHANGE_NOT_ALLOWED",
            Self::NegativePlannedBudget => "NEGATIVE_PLANNED_BUDGET",
            Self::NegativeActualSpent => "NEGATIVE_ACTUAL_SPENT",
            Self::NegativeExpenseAmount => "NEGATIVE_EXPENSE_AMOUNT",
            Self::KeyNotFound(_) => "NOT_FOUND",
            Self::BudgetAlreadyExists(_) => "DUPLICATE_BUDGET",
            Self::Cancelled => "OPERATION_CANCELLED",
            Self::MissingStore(_) => "MISSING_STORE",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::KeyNotFound(_) => ErrorKind::NotFound,
            Self::BudgetAlreadyExists(_) | Self::InvalidSubcategory { .. } => ErrorKind::Conflict,
            Self::Cancelled => ErrorKind::Cancelled,
            Self::MissingStore(_) | Self::Database(_) => ErrorKind::Internal,
            _ => ErrorKind::Validation,
        }
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        self.code() == other.code() && self.to_string() == other.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_separate_not_found_from_conflict() {
        assert_eq!(
            EngineError::KeyNotFound("record".to_string()).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            EngineError::BudgetAlreadyExists("x".to_string()).kind(),
            ErrorKind::Conflict
        );
        assert_eq!(
            EngineError::InvalidSubcategory {
                category: 1,
                subcategory: 7
            }
            .kind(),
            ErrorKind::Conflict
        );
        assert_eq!(EngineError::NegativePlannedBudget.kind(), ErrorKind::Validation);
        assert_eq!(
            EngineError::AmountOverflow("sum".to_string()).kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            EngineError::Database(DbErr::Custom("boom".to_string())).kind(),
            ErrorKind::Internal
        );
    }

    #[test]
    fn codes_are_stable() {
        assert_eq!(
            EngineError::CurrencyMismatch("USD/EUR".to_string()).code(),
            "CURRENCY_MISMATCH"
        );
        assert_eq!(EngineError::InvalidYear(1800).code(), "INVALID_YEAR");
        assert_eq!(
            EngineError::CategoryMismatch {
                category: 1,
                subcategory_category: 2
            }
            .code(),
            "SUBCATEGORY_CATEGORY_MISMATCH"
        );
    }
}
