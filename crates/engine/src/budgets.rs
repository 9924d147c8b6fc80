//! The module contains `MonthCategoryBudget`: planned vs. actual spending of
//! one user on one subcategory during one month.

use rust_decimal::Decimal;
use sea_orm::entity::{ActiveValue, prelude::*};

use crate::{
    BudgetId, EngineError, Money, RecordSubcategory, ResultEngine, YearMonth,
    util::{ensure_user_id, model_currency, parse_decimal, parse_uuid},
};

/// Monthly budget for a subcategory.
///
/// Planned and actual amounts share the currency fixed at creation and are
/// never negative. `actual_spent` is owned by the reconciliation step; the
/// owner can only edit the planned amount.
#[derive(Clone, Debug, PartialEq)]
pub struct MonthCategoryBudget {
    id: BudgetId,
    user_id: String,
    month: YearMonth,
    subcategory: RecordSubcategory,
    planned_budget: Money,
    actual_spent: Money,
}

impl MonthCategoryBudget {
    /// Create a budget. `initial_actual` defaults to zero in the planned
    /// currency.
    pub fn create(
        id: BudgetId,
        user_id: &str,
        month: YearMonth,
        subcategory: RecordSubcategory,
        planned_budget: Money,
        initial_actual: Option<Money>,
    ) -> ResultEngine<Self> {
        ensure_user_id(user_id)?;
        if planned_budget.is_negative() {
            return Err(EngineError::NegativePlannedBudget);
        }
        let actual_spent =
            initial_actual.unwrap_or_else(|| Money::zero(planned_budget.currency().clone()));
        if actual_spent.currency() != planned_budget.currency() {
            return Err(EngineError::CurrencyMismatch(format!(
                "planned budget is in {}, actual spent in {}",
                planned_budget.currency(),
                actual_spent.currency()
            )));
        }
        if actual_spent.is_negative() {
            return Err(EngineError::NegativeActualSpent);
        }
        Ok(Self {
            id,
            user_id: user_id.to_string(),
            month,
            subcategory,
            planned_budget,
            actual_spent,
        })
    }

    pub fn change_planned_budget(&mut self, planned: Money) -> ResultEngine<()> {
        if planned.is_negative() {
            return Err(EngineError::NegativePlannedBudget);
        }
        self.ensure_currency(&planned)?;
        self.planned_budget = planned;
        Ok(())
    }

    /// Overwrite the actual spent with a freshly recomputed total.
    pub fn adjust_actual_spent(&mut self, actual: Money) -> ResultEngine<()> {
        self.ensure_currency(&actual)?;
        if actual.is_negative() {
            return Err(EngineError::NegativeActualSpent);
        }
        self.actual_spent = actual;
        Ok(())
    }

    /// Add one expense to the running total.
    #[deprecated(note = "incremental updates drift; use `adjust_actual_spent` with a recomputed total")]
    pub fn register_record_expense(&mut self, expense: Money) -> ResultEngine<()> {
        if expense.is_negative() {
            return Err(EngineError::NegativeExpenseAmount);
        }
        self.actual_spent = self.actual_spent.add(&expense)?;
        Ok(())
    }

    /// `planned - actual`; negative once over budget.
    ///
    /// Both operands are non-negative so the difference stays in range; the
    /// subtraction saturates all the same.
    #[must_use]
    pub fn remaining_budget(&self) -> Money {
        Money::from_parts(
            self.planned_budget
                .amount()
                .saturating_sub(self.actual_spent.amount()),
            self.planned_budget.currency().clone(),
        )
    }

    /// Percentage of the planned amount already spent, 0 when nothing is
    /// planned.
    ///
    /// Saturates at `Decimal::MAX` when the ratio leaves the decimal range
    /// (a tiny planned amount against a huge actual).
    #[must_use]
    pub fn utilization_percentage(&self) -> Decimal {
        if self.planned_budget.is_zero() {
            return Decimal::ZERO;
        }
        self.actual_spent
            .amount()
            .checked_div(self.planned_budget.amount())
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .unwrap_or(Decimal::MAX)
    }

    #[must_use]
    pub fn is_over_budget(&self) -> bool {
        self.actual_spent.amount() > self.planned_budget.amount()
    }

    #[must_use]
    pub fn id(&self) -> BudgetId {
        self.id
    }

    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    #[must_use]
    pub fn month(&self) -> YearMonth {
        self.month
    }

    #[must_use]
    pub fn subcategory(&self) -> &RecordSubcategory {
        &self.subcategory
    }

    #[must_use]
    pub fn planned_budget(&self) -> &Money {
        &self.planned_budget
    }

    #[must_use]
    pub fn actual_spent(&self) -> &Money {
        &self.actual_spent
    }

    fn ensure_currency(&self, value: &Money) -> ResultEngine<()> {
        if value.currency() != self.planned_budget.currency() {
            return Err(EngineError::CurrencyChangeNotAllowed(format!(
                "budget currency is {}, got {}",
                self.planned_budget.currency(),
                value.currency()
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "budgets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub year: i32,
    pub month: i32,
    pub subcategory_id: i32,
    pub planned_amount: String,
    pub actual_spent: String,
    pub currency: String,
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

impl From<&MonthCategoryBudget> for ActiveModel {
    fn from(value: &MonthCategoryBudget) -> Self {
        Self {
            id: ActiveValue::Set(value.id.to_string()),
            user_id: ActiveValue::Set(value.user_id.clone()),
            year: ActiveValue::Set(value.month.year()),
            // Month is validated to 1..=12.
            month: ActiveValue::Set(value.month.month() as i32),
            subcategory_id: ActiveValue::Set(value.subcategory.id()),
            planned_amount: ActiveValue::Set(value.planned_budget.amount().to_string()),
            actual_spent: ActiveValue::Set(value.actual_spent.amount().to_string()),
            currency: ActiveValue::Set(value.planned_budget.currency().code().to_string()),
        }
    }
}

impl TryFrom<(Model, RecordSubcategory)> for MonthCategoryBudget {
    type Error = EngineError;

    fn try_from((model, subcategory): (Model, RecordSubcategory)) -> ResultEngine<Self> {
        let currency = model_currency(&model.currency)?;
        let month = u32::try_from(model.month).map_err(|_| EngineError::InvalidMonth(0))?;
        MonthCategoryBudget::create(
            BudgetId::from_uuid(parse_uuid(&model.id, "budget")?),
            &model.user_id,
            YearMonth::new(model.year, month)?,
            subcategory,
            Money::from_parts(
                parse_decimal(&model.planned_amount, "planned amount")?,
                currency.clone(),
            ),
            Some(Money::from_parts(
                parse_decimal(&model.actual_spent, "actual spent")?,
                currency,
            )),
        )
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn usd(amount: Decimal) -> Money {
        Money::new(amount, "USD").unwrap()
    }

    fn budget(planned: Decimal) -> MonthCategoryBudget {
        MonthCategoryBudget::create(
            BudgetId::new(),
            "alice",
            YearMonth::new(2024, 3).unwrap(),
            RecordSubcategory::new(7, 2, "Shopping").unwrap(),
            usd(planned),
            None,
        )
        .unwrap()
    }

    #[test]
    fn create_starts_from_zero_actual() {
        let budget = budget(dec!(500));
        assert!(budget.actual_spent().is_zero());
        assert_eq!(budget.actual_spent().currency().code(), "USD");
    }

    #[test]
    fn create_validates_amounts() {
        let sub = RecordSubcategory::new(7, 2, "Shopping").unwrap();
        let month = YearMonth::new(2024, 3).unwrap();

        let negative = MonthCategoryBudget::create(
            BudgetId::new(),
            "alice",
            month,
            sub.clone(),
            usd(dec!(-1)),
            None,
        );
        assert_eq!(negative.unwrap_err(), EngineError::NegativePlannedBudget);

        let mixed = MonthCategoryBudget::create(
            BudgetId::new(),
            "alice",
            month,
            sub.clone(),
            usd(dec!(100)),
            Some(Money::new(dec!(5), "EUR").unwrap()),
        );
        assert_eq!(mixed.unwrap_err().code(), "CURRENCY_MISMATCH");

        let negative_actual = MonthCategoryBudget::create(
            BudgetId::new(),
            "alice",
            month,
            sub,
            usd(dec!(100)),
            Some(usd(dec!(-5))),
        );
        assert_eq!(negative_actual.unwrap_err(), EngineError::NegativeActualSpent);
    }

    #[test]
    fn derived_figures_follow_actual() {
        let mut budget = budget(dec!(500));
        budget.adjust_actual_spent(usd(dec!(75))).unwrap();

        assert_eq!(budget.remaining_budget(), usd(dec!(425)));
        assert_eq!(budget.utilization_percentage(), dec!(15));
        assert!(!budget.is_over_budget());

        budget.adjust_actual_spent(usd(dec!(600))).unwrap();
        assert!(budget.is_over_budget());
        assert_eq!(budget.remaining_budget(), usd(dec!(-100)));
    }

    #[test]
    fn zero_planned_has_zero_utilization() {
        let mut budget = budget(dec!(0));
        budget.adjust_actual_spent(usd(dec!(10))).unwrap();

        assert_eq!(budget.utilization_percentage(), Decimal::ZERO);
        assert!(budget.is_over_budget());
    }

    #[test]
    fn utilization_saturates_instead_of_overflowing() {
        let mut budget = budget(dec!(0.0000000001));
        budget
            .adjust_actual_spent(usd(dec!(10000000000000000000000)))
            .unwrap();

        assert_eq!(budget.utilization_percentage(), Decimal::MAX);
        assert!(budget.is_over_budget());
        assert!(budget.remaining_budget().is_negative());
    }

    #[test]
    fn remaining_budget_holds_at_range_edges() {
        let mut budget = budget(Decimal::MAX);
        assert_eq!(budget.remaining_budget(), usd(Decimal::MAX));

        let mut empty = budget.clone();
        empty.change_planned_budget(usd(dec!(0))).unwrap();
        empty.adjust_actual_spent(usd(Decimal::MAX)).unwrap();
        assert_eq!(empty.remaining_budget(), usd(Decimal::MIN));

        budget.adjust_actual_spent(usd(Decimal::MAX)).unwrap();
        assert!(budget.remaining_budget().is_zero());
    }

    #[test]
    fn change_planned_budget_rules() {
        let mut budget = budget(dec!(500));

        assert_eq!(
            budget
                .change_planned_budget(Money::new(dec!(300), "EUR").unwrap())
                .unwrap_err()
                .code(),
            "CURRENCY_CHANGE_NOT_ALLOWED"
        );
        assert_eq!(
            budget.change_planned_budget(usd(dec!(-1))),
            Err(EngineError::NegativePlannedBudget)
        );

        budget.change_planned_budget(usd(dec!(300))).unwrap();
        assert_eq!(budget.planned_budget(), &usd(dec!(300)));
    }

    #[test]
    fn adjust_actual_rejects_negative_and_foreign_currency() {
        let mut budget = budget(dec!(500));

        assert_eq!(
            budget.adjust_actual_spent(usd(dec!(-1))),
            Err(EngineError::NegativeActualSpent)
        );
        assert!(
            budget
                .adjust_actual_spent(Money::new(dec!(1), "EUR").unwrap())
                .is_err()
        );
        assert!(budget.actual_spent().is_zero());
    }

    #[test]
    #[allow(deprecated)]
    fn register_record_expense_is_additive() {
        let mut budget = budget(dec!(500));
        budget.register_record_expense(usd(dec!(20))).unwrap();
        budget.register_record_expense(usd(dec!(5.5))).unwrap();

        assert_eq!(budget.actual_spent(), &usd(dec!(25.5)));
        assert_eq!(
            budget.register_record_expense(usd(dec!(-1))),
            Err(EngineError::NegativeExpenseAmount)
        );
        assert_eq!(
            budget
                .register_record_expense(Money::new(dec!(1), "EUR").unwrap())
                .unwrap_err()
                .code(),
            "CURRENCY_MISMATCH"
        );
    }
}
