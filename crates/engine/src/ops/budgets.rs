use tokio_util::sync::CancellationToken;

use crate::{
    BudgetId, CreateBudgetCmd, Currency, EngineError, Money, MonthCategoryBudget, ResultEngine,
    UpdateBudgetCmd, YearMonth, util::ensure_user_id,
};

use super::{Engine, ensure_active};

impl Engine {
    /// Return a budget owned by `user_id`.
    pub async fn budget(
        &self,
        budget_id: BudgetId,
        user_id: &str,
    ) -> ResultEngine<MonthCategoryBudget> {
        self.budgets
            .get_by_id(budget_id, user_id)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound(format!("budget {budget_id}")))
    }

    /// List every budget of a user for one month.
    pub async fn list_budgets(
        &self,
        user_id: &str,
        year: i32,
        month: u32,
    ) -> ResultEngine<Vec<MonthCategoryBudget>> {
        ensure_user_id(user_id)?;
        let month = YearMonth::new(year, month)?;
        self.budgets.get_by_user_and_month(user_id, month).await
    }

    /// Create a budget whose actual spent starts from the records already in
    /// the month.
    pub async fn create_budget(
        &self,
        cmd: CreateBudgetCmd,
        cancel: &CancellationToken,
    ) -> ResultEngine<BudgetId> {
        ensure_user_id(&cmd.user_id)?;
        let month = YearMonth::new(cmd.year, cmd.month)?;
        let planned = Money::new(cmd.planned_amount, &cmd.currency)?;

        let subcategory = self
            .catalog
            .subcategory_by_id(cmd.subcategory_id)
            .await?
            .ok_or_else(|| {
                EngineError::KeyNotFound(format!("subcategory {}", cmd.subcategory_id))
            })?;

        if self
            .budgets
            .get_by_subcategory_and_month(&cmd.user_id, subcategory.id(), month)
            .await?
            .is_some()
        {
            return Err(EngineError::BudgetAlreadyExists(format!(
                "subcategory {} in {month}",
                subcategory.id()
            )));
        }

        let actual = self
            .records
            .total_spent_for_subcategory_in_month(
                &cmd.user_id,
                subcategory.id(),
                month,
                planned.currency(),
            )
            .await?;
        let budget = MonthCategoryBudget::create(
            BudgetId::new(),
            &cmd.user_id,
            month,
            subcategory,
            planned,
            Some(actual),
        )?;

        ensure_active(cancel)?;
        self.budgets.add(&budget).await?;
        tracing::info!(
            user_id = %cmd.user_id,
            budget_id = %budget.id(),
            %month,
            planned = %budget.planned_budget(),
            "budget created"
        );
        Ok(budget.id())
    }

    /// Change the planned amount; the currency stays the one fixed at creation.
    pub async fn update_budget(
        &self,
        cmd: UpdateBudgetCmd,
        cancel: &CancellationToken,
    ) -> ResultEngine<()> {
        let mut budget = self.budget(cmd.budget_id, &cmd.user_id).await?;
        let currency = match cmd.currency.as_deref() {
            Some(code) => Currency::new(code)?,
            None => budget.planned_budget().currency().clone(),
        };
        budget.change_planned_budget(Money::from_parts(cmd.planned_amount, currency))?;

        ensure_active(cancel)?;
        self.budgets.update(&budget).await?;
        tracing::debug!(user_id = %cmd.user_id, budget_id = %budget.id(), "budget updated");
        Ok(())
    }

    pub async fn delete_budget(
        &self,
        budget_id: BudgetId,
        user_id: &str,
        cancel: &CancellationToken,
    ) -> ResultEngine<()> {
        self.budget(budget_id, user_id).await?;

        ensure_active(cancel)?;
        if !self.budgets.delete(budget_id, user_id).await? {
            return Err(EngineError::KeyNotFound(format!("budget {budget_id}")));
        }
        tracing::debug!(user_id, %budget_id, "budget deleted");
        Ok(())
    }
}
