use crate::{MonthCategoryBudget, ResultEngine, YearMonth};

use super::Engine;

/// What a reconciliation pass did.
#[derive(Clone, Debug, PartialEq)]
pub enum ReconcileOutcome {
    /// No budget covers the scope; nothing to do.
    NoBudget,
    /// The budget was recomputed and persisted.
    Adjusted(MonthCategoryBudget),
}

impl Engine {
    /// Recompute the actual spent of the budget covering (user, subcategory,
    /// month) from the current record set.
    ///
    /// The total is rebuilt from scratch on every call, so running it twice is
    /// harmless and a stale figure heals on the next pass.
    pub async fn reconcile_budget(
        &self,
        user_id: &str,
        subcategory_id: i32,
        month: YearMonth,
    ) -> ResultEngine<ReconcileOutcome> {
        let Some(mut budget) = self
            .budgets
            .get_by_subcategory_and_month(user_id, subcategory_id, month)
            .await?
        else {
            tracing::debug!(user_id, subcategory_id, %month, "no budget to reconcile");
            return Ok(ReconcileOutcome::NoBudget);
        };

        let total = self
            .records
            .total_spent_for_subcategory_in_month(
                user_id,
                subcategory_id,
                month,
                budget.planned_budget().currency(),
            )
            .await?;
        let previous = budget.actual_spent().clone();
        budget.adjust_actual_spent(total)?;
        self.budgets.update(&budget).await?;

        tracing::info!(
            user_id,
            subcategory_id,
            %month,
            budget_id = %budget.id(),
            from = %previous,
            to = %budget.actual_spent(),
            "budget reconciled"
        );
        Ok(ReconcileOutcome::Adjusted(budget))
    }
}
