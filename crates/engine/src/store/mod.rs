//! Storage contracts used by the engine, plus the SQL implementation.
//!
//! The engine only talks to storage through [`RecordStore`], [`BudgetStore`]
//! and [`CatalogStore`], so tests can swap in in-memory fakes. Every lookup of
//! user data is keyed by `user_id`: a row owned by someone else behaves
//! exactly like a missing row.

use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::{
    BudgetId, Currency, Money, MonthCategoryBudget, Record, RecordCategory, RecordId,
    RecordSubcategory, ResultEngine, YearMonth,
};

mod budgets;
mod catalog;
mod records;

#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn add(&self, record: &Record) -> ResultEngine<()>;

    async fn get_by_id(&self, id: RecordId, user_id: &str) -> ResultEngine<Option<Record>>;

    /// Records of `user_id` whose time falls in `month`, oldest first.
    async fn get_by_user_and_month(
        &self,
        user_id: &str,
        month: YearMonth,
    ) -> ResultEngine<Vec<Record>>;

    async fn get_by_subcategory_and_month(
        &self,
        user_id: &str,
        subcategory_id: i32,
        month: YearMonth,
    ) -> ResultEngine<Vec<Record>>;

    /// Absolute value of the signed sum of the matching records in
    /// `currency`. Records in other currencies are ignored.
    async fn total_spent_for_subcategory_in_month(
        &self,
        user_id: &str,
        subcategory_id: i32,
        month: YearMonth,
        currency: &Currency,
    ) -> ResultEngine<Money>;

    async fn update(&self, record: &Record) -> ResultEngine<()>;

    /// Returns `false` when nothing was deleted.
    async fn delete(&self, id: RecordId, user_id: &str) -> ResultEngine<bool>;
}

#[async_trait]
pub trait BudgetStore: Send + Sync {
    /// Fails with `BudgetAlreadyExists` when the (user, subcategory, month)
    /// slot is taken.
    async fn add(&self, budget: &MonthCategoryBudget) -> ResultEngine<()>;

    async fn get_by_id(
        &self,
        id: BudgetId,
        user_id: &str,
    ) -> ResultEngine<Option<MonthCategoryBudget>>;

    async fn get_by_subcategory_and_month(
        &self,
        user_id: &str,
        subcategory_id: i32,
        month: YearMonth,
    ) -> ResultEngine<Option<MonthCategoryBudget>>;

    async fn get_by_user_and_month(
        &self,
        user_id: &str,
        month: YearMonth,
    ) -> ResultEngine<Vec<MonthCategoryBudget>>;

    async fn update(&self, budget: &MonthCategoryBudget) -> ResultEngine<()>;

    /// Returns `false` when nothing was deleted.
    async fn delete(&self, id: BudgetId, user_id: &str) -> ResultEngine<bool>;
}

/// Read access to the reference taxonomy.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Category with its subcategories attached.
    async fn category_by_id(&self, id: i32) -> ResultEngine<Option<RecordCategory>>;

    async fn all_categories(&self) -> ResultEngine<Vec<RecordCategory>>;

    async fn subcategory_by_id(&self, id: i32) -> ResultEngine<Option<RecordSubcategory>>;
}

/// SQL-backed store implementing every contract on one connection.
#[derive(Clone, Debug)]
pub struct SeaStore {
    database: DatabaseConnection,
}

impl SeaStore {
    #[must_use]
    pub fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }
}
