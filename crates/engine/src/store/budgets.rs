use async_trait::async_trait;
use sea_orm::{QueryFilter, QueryOrder, SqlErr, prelude::*};

use crate::{BudgetId, EngineError, MonthCategoryBudget, ResultEngine, YearMonth, budgets};

use super::{BudgetStore, CatalogStore, SeaStore};

impl SeaStore {
    async fn hydrate_budget(&self, model: budgets::Model) -> ResultEngine<MonthCategoryBudget> {
        let subcategory = self
            .subcategory_by_id(model.subcategory_id)
            .await?
            .ok_or_else(|| {
                EngineError::KeyNotFound(format!("subcategory {}", model.subcategory_id))
            })?;
        MonthCategoryBudget::try_from((model, subcategory))
    }
}

#[async_trait]
impl BudgetStore for SeaStore {
    async fn add(&self, budget: &MonthCategoryBudget) -> ResultEngine<()> {
        match budgets::ActiveModel::from(budget)
            .insert(&self.database)
            .await
        {
            Ok(_) => Ok(()),
            Err(err) => match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    Err(EngineError::BudgetAlreadyExists(format!(
                        "subcategory {} in {}",
                        budget.subcategory().id(),
                        budget.month()
                    )))
                }
                _ => Err(err.into()),
            },
        }
    }

    async fn get_by_id(
        &self,
        id: BudgetId,
        user_id: &str,
    ) -> ResultEngine<Option<MonthCategoryBudget>> {
        match budgets::Entity::find_by_id(id.to_string())
            .filter(budgets::Column::UserId.eq(user_id))
            .one(&self.database)
            .await?
        {
            Some(model) => self.hydrate_budget(model).await.map(Some),
            None => Ok(None),
        }
    }

    async fn get_by_subcategory_and_month(
        &self,
        user_id: &str,
        subcategory_id: i32,
        month: YearMonth,
    ) -> ResultEngine<Option<MonthCategoryBudget>> {
        match budgets::Entity::find()
            .filter(budgets::Column::UserId.eq(user_id))
            .filter(budgets::Column::SubcategoryId.eq(subcategory_id))
            .filter(budgets::Column::Year.eq(month.year()))
            .filter(budgets::Column::Month.eq(month.month()))
            .one(&self.database)
            .await?
        {
            Some(model) => self.hydrate_budget(model).await.map(Some),
            None => Ok(None),
        }
    }

    async fn get_by_user_and_month(
        &self,
        user_id: &str,
        month: YearMonth,
    ) -> ResultEngine<Vec<MonthCategoryBudget>> {
        let models = budgets::Entity::find()
            .filter(budgets::Column::UserId.eq(user_id))
            .filter(budgets::Column::Year.eq(month.year()))
            .filter(budgets::Column::Month.eq(month.month()))
            .order_by_asc(budgets::Column::SubcategoryId)
            .all(&self.database)
            .await?;

        let mut out = Vec::with_capacity(models.len());
        for model in models {
            out.push(self.hydrate_budget(model).await?);
        }
        Ok(out)
    }

    async fn update(&self, budget: &MonthCategoryBudget) -> ResultEngine<()> {
        budgets::ActiveModel::from(budget)
            .update(&self.database)
            .await?;
        Ok(())
    }

    async fn delete(&self, id: BudgetId, user_id: &str) -> ResultEngine<bool> {
        let result = budgets::Entity::delete_many()
            .filter(budgets::Column::Id.eq(id.to_string()))
            .filter(budgets::Column::UserId.eq(user_id))
            .exec(&self.database)
            .await?;
        Ok(result.rows_affected > 0)
    }
}
