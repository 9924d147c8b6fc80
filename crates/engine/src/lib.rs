//! Budget tracking engine.
//!
//! Records are signed money entries filed under a two-level category
//! taxonomy. A [`MonthCategoryBudget`] tracks planned vs. actual spending of
//! one user on one subcategory for one month; its actual spent is recomputed
//! from the record set after every record mutation (see
//! [`Engine::reconcile_budget`]).

pub use budgets::MonthCategoryBudget;
pub use categories::RecordCategory;
pub use commands::{CreateBudgetCmd, CreateRecordCmd, RecordQuery, UpdateBudgetCmd, UpdateRecordCmd};
pub use currency::Currency;
pub use error::{EngineError, ErrorKind};
pub use ids::{BudgetId, RecordId};
pub use money::Money;
pub use note::Note;
pub use ops::{Engine, EngineBuilder, ReconcileOutcome};
pub use records::Record;
pub use store::{BudgetStore, CatalogStore, RecordStore, SeaStore};
pub use subcategories::RecordSubcategory;
pub use year_month::YearMonth;

pub mod budgets;
pub mod categories;
mod commands;
mod currency;
mod error;
mod ids;
mod money;
mod note;
mod ops;
pub mod records;
mod store;
pub mod subcategories;
mod util;
mod year_month;

pub type ResultEngine<T> = Result<T, EngineError>;
