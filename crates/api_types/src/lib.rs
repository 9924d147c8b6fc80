//! Request and response bodies of the HTTP API.
//!
//! Amounts are decimals serialized as strings (`"-75.00"`), currencies are
//! 3-letter codes and ids are UUID strings.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Currency used when a request omits it.
pub const DEFAULT_CURRENCY: &str = "USD";

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

/// Error body returned for every failed request.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: String,
}

/// Body of a `201 Created` response.
#[derive(Debug, Serialize, Deserialize)]
pub struct Created {
    pub id: Uuid,
}

pub mod record {
    use chrono::{DateTime, Utc};

    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RecordNew {
        /// Signed amount: negative for expenses.
        pub amount: Decimal,
        #[serde(default = "default_currency")]
        pub currency: String,
        pub category_id: i32,
        pub subcategory_id: i32,
        /// RFC3339 timestamp, normalized to UTC.
        pub occurred_at: DateTime<Utc>,
        pub description: String,
    }

    /// Partial update; absent fields are left untouched.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct RecordUpdate {
        pub amount: Option<Decimal>,
        pub currency: Option<String>,
        pub description: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RecordList {
        pub year: i32,
        pub month: u32,
        pub subcategory_id: Option<i32>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RecordView {
        pub id: Uuid,
        pub amount: Decimal,
        pub currency: String,
        pub category_id: i32,
        pub category: String,
        pub subcategory_id: i32,
        pub subcategory: String,
        pub occurred_at: DateTime<Utc>,
        pub description: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RecordListResponse {
        pub records: Vec<RecordView>,
    }
}

pub mod budget {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetNew {
        pub year: i32,
        pub month: u32,
        pub subcategory_id: i32,
        pub planned_amount: Decimal,
        #[serde(default = "default_currency")]
        pub currency: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetUpdate {
        pub planned_amount: Decimal,
        /// Must match the budget currency when present.
        pub currency: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetList {
        pub year: i32,
        pub month: u32,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetView {
        pub id: Uuid,
        pub year: i32,
        pub month: u32,
        pub subcategory_id: i32,
        pub subcategory: String,
        pub currency: String,
        pub planned_amount: Decimal,
        pub actual_spent: Decimal,
        pub remaining: Decimal,
        /// Percentage of the planned amount already spent.
        pub utilization: Decimal,
        pub over_budget: bool,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetListResponse {
        pub budgets: Vec<BudgetView>,
    }
}

pub mod category {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SubcategoryView {
        pub id: i32,
        pub name: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryView {
        pub id: i32,
        pub name: String,
        pub subcategories: Vec<SubcategoryView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryListResponse {
        pub categories: Vec<CategoryView>,
    }
}
