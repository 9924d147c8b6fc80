//! The module contains `Record`, a single income or expense entry.

use chrono::{DateTime, Utc};
use sea_orm::entity::{ActiveValue, prelude::*};

use crate::{
    EngineError, Money, Note, RecordCategory, RecordId, RecordSubcategory, ResultEngine,
    YearMonth,
    util::{ensure_user_id, model_currency, parse_decimal, parse_uuid},
};

/// One financial transaction of a user.
///
/// The amount is signed: expenses are negative, income positive. After
/// creation only the amount (in the same currency) and the description can
/// change; category, subcategory and time are fixed.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    id: RecordId,
    user_id: String,
    amount: Money,
    category: RecordCategory,
    subcategory: RecordSubcategory,
    time: DateTime<Utc>,
    description: Note,
}

impl Record {
    /// Create a new record with a fresh id.
    ///
    /// Fails with [`EngineError::InvalidSubcategory`] when `subcategory` is
    /// not one of `category`'s subcategories.
    pub fn create(
        user_id: &str,
        amount: Money,
        category: RecordCategory,
        subcategory: RecordSubcategory,
        time: DateTime<Utc>,
        description: Note,
    ) -> ResultEngine<Self> {
        Self::with_id(
            RecordId::new(),
            user_id,
            amount,
            category,
            subcategory,
            time,
            description,
        )
    }

    /// Rebuild a record with a known id (used when loading from storage).
    pub fn with_id(
        id: RecordId,
        user_id: &str,
        amount: Money,
        category: RecordCategory,
        subcategory: RecordSubcategory,
        time: DateTime<Utc>,
        description: Note,
    ) -> ResultEngine<Self> {
        ensure_user_id(user_id)?;
        if !category.has_subcategory(subcategory.id()) {
            return Err(EngineError::InvalidSubcategory {
                category: category.id(),
                subcategory: subcategory.id(),
            });
        }
        Ok(Self {
            id,
            user_id: user_id.to_string(),
            amount,
            category,
            subcategory,
            time,
            description,
        })
    }

    pub fn update_amount(&mut self, amount: Money) -> ResultEngine<()> {
        if amount.currency() != self.amount.currency() {
            return Err(EngineError::CurrencyChangeNotAllowed(format!(
                "record currency is {}, got {}",
                self.amount.currency(),
                amount.currency()
            )));
        }
        self.amount = amount;
        Ok(())
    }

    pub fn update_description(&mut self, description: Note) {
        self.description = description;
    }

    #[must_use]
    pub fn id(&self) -> RecordId {
        self.id
    }

    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    #[must_use]
    pub fn amount(&self) -> &Money {
        &self.amount
    }

    #[must_use]
    pub fn category(&self) -> &RecordCategory {
        &self.category
    }

    #[must_use]
    pub fn subcategory(&self) -> &RecordSubcategory {
        &self.subcategory
    }

    #[must_use]
    pub fn time(&self) -> DateTime<Utc> {
        self.time
    }

    #[must_use]
    pub fn description(&self) -> &Note {
        &self.description
    }

    /// Calendar month the record falls in.
    pub fn month(&self) -> ResultEngine<YearMonth> {
        YearMonth::from_timestamp(self.time)
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "records")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub amount: String,
    pub currency: String,
    pub category_id: i32,
    pub subcategory_id: i32,
    pub occurred_at: DateTimeUtc,
    pub description: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::subcategories::Entity",
        from = "Column::SubcategoryId",
        to = "super::subcategories::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Subcategory,
}

impl Related<super::subcategories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subcategory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Record> for ActiveModel {
    fn from(value: &Record) -> Self {
        Self {
            id: ActiveValue::Set(value.id.to_string()),
            user_id: ActiveValue::Set(value.user_id.clone()),
            amount: ActiveValue::Set(value.amount.amount().to_string()),
            currency: ActiveValue::Set(value.amount.currency().code().to_string()),
            category_id: ActiveValue::Set(value.category.id()),
            subcategory_id: ActiveValue::Set(value.subcategory.id()),
            occurred_at: ActiveValue::Set(value.time),
            description: ActiveValue::Set(value.description.as_str().to_string()),
        }
    }
}

/// Hydrate a stored row using the category it references.
impl TryFrom<(Model, RecordCategory)> for Record {
    type Error = EngineError;

    fn try_from((model, category): (Model, RecordCategory)) -> ResultEngine<Self> {
        let subcategory = category
            .subcategory(model.subcategory_id)
            .cloned()
            .ok_or(EngineError::InvalidSubcategory {
                category: category.id(),
                subcategory: model.subcategory_id,
            })?;
        let amount = Money::from_parts(
            parse_decimal(&model.amount, "record amount")?,
            model_currency(&model.currency)?,
        );
        Record::with_id(
            RecordId::from_uuid(parse_uuid(&model.id, "record")?),
            &model.user_id,
            amount,
            category,
            subcategory,
            model.occurred_at,
            Note::new(&model.description)?,
        )
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    use super::*;

    fn catalog() -> (RecordCategory, RecordCategory) {
        let mut income = RecordCategory::new(1, "Income").unwrap();
        income
            .add_subcategory(RecordSubcategory::new(1, 1, "Salary").unwrap())
            .unwrap();
        let mut expenses = RecordCategory::new(2, "Expenses").unwrap();
        expenses
            .add_subcategory(RecordSubcategory::new(7, 2, "Shopping").unwrap())
            .unwrap();
        (income, expenses)
    }

    fn record() -> Record {
        let (_, expenses) = catalog();
        let shopping = expenses.subcategory(7).unwrap().clone();
        Record::create(
            "alice",
            Money::new(dec!(-75), "USD").unwrap(),
            expenses,
            shopping,
            Utc.with_ymd_and_hms(2024, 3, 14, 10, 0, 0).unwrap(),
            Note::new("Shoes").unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn create_derives_month() {
        let record = record();
        assert_eq!(record.month().unwrap(), YearMonth::new(2024, 3).unwrap());
        assert_eq!(record.user_id(), "alice");
        assert_eq!(record.subcategory().id(), 7);
    }

    #[test]
    fn subcategory_of_other_category_is_rejected() {
        let (income, expenses) = catalog();
        let shopping = expenses.subcategory(7).unwrap().clone();

        let err = Record::create(
            "alice",
            Money::new(dec!(-10), "USD").unwrap(),
            income,
            shopping,
            Utc::now(),
            Note::new("Mixed up").unwrap(),
        )
        .unwrap_err();

        assert_eq!(
            err,
            EngineError::InvalidSubcategory {
                category: 1,
                subcategory: 7
            }
        );
    }

    #[test]
    fn update_amount_keeps_currency() {
        let mut record = record();
        record
            .update_amount(Money::new(dec!(-90), "usd").unwrap())
            .unwrap();
        assert_eq!(record.amount().amount(), dec!(-90));

        let err = record
            .update_amount(Money::new(dec!(-90), "EUR").unwrap())
            .unwrap_err();
        assert_eq!(err.code(), "CURRENCY_CHANGE_NOT_ALLOWED");
        assert_eq!(record.amount().currency().code(), "USD");
    }

    #[test]
    fn update_description_replaces_note() {
        let mut record = record();
        record.update_description(Note::new("Boots").unwrap());
        assert_eq!(record.description().as_str(), "Boots");
    }

    #[test]
    fn stored_row_round_trips() {
        let record = record();
        let active: ActiveModel = (&record).into();
        let model = Model {
            id: active.id.unwrap(),
            user_id: active.user_id.unwrap(),
            amount: active.amount.unwrap(),
            currency: active.currency.unwrap(),
            category_id: active.category_id.unwrap(),
            subcategory_id: active.subcategory_id.unwrap(),
            occurred_at: active.occurred_at.unwrap(),
            description: active.description.unwrap(),
        };

        let loaded = Record::try_from((model, record.category().clone())).unwrap();
        assert_eq!(loaded, record);
    }
}
