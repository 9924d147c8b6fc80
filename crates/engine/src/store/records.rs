use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use sea_orm::{QueryFilter, QueryOrder, QuerySelect, Select, prelude::*};

use crate::{
    Currency, EngineError, Money, Record, RecordCategory, RecordId, ResultEngine, YearMonth,
    records, util::parse_decimal,
};

use super::{CatalogStore, RecordStore, SeaStore};

fn in_month(select: Select<records::Entity>, month: YearMonth) -> Select<records::Entity> {
    let (start, end) = month.utc_bounds();
    select
        .filter(records::Column::OccurredAt.gte(start))
        .filter(records::Column::OccurredAt.lt(end))
}

impl SeaStore {
    /// Turn rows into records, attaching each row's category.
    async fn hydrate_records(&self, models: Vec<records::Model>) -> ResultEngine<Vec<Record>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }
        let catalog: HashMap<i32, RecordCategory> = self
            .all_categories()
            .await?
            .into_iter()
            .map(|category| (category.id(), category))
            .collect();

        models
            .into_iter()
            .map(|model| {
                let category = catalog.get(&model.category_id).cloned().ok_or_else(|| {
                    EngineError::KeyNotFound(format!("category {}", model.category_id))
                })?;
                Record::try_from((model, category))
            })
            .collect()
    }
}

#[async_trait]
impl RecordStore for SeaStore {
    async fn add(&self, record: &Record) -> ResultEngine<()> {
        records::ActiveModel::from(record)
            .insert(&self.database)
            .await?;
        Ok(())
    }

    async fn get_by_id(&self, id: RecordId, user_id: &str) -> ResultEngine<Option<Record>> {
        let Some(model) = records::Entity::find_by_id(id.to_string())
            .filter(records::Column::UserId.eq(user_id))
            .one(&self.database)
            .await?
        else {
            return Ok(None);
        };
        Ok(self.hydrate_records(vec![model]).await?.pop())
    }

    async fn get_by_user_and_month(
        &self,
        user_id: &str,
        month: YearMonth,
    ) -> ResultEngine<Vec<Record>> {
        let models = in_month(records::Entity::find(), month)
            .filter(records::Column::UserId.eq(user_id))
            .order_by_asc(records::Column::OccurredAt)
            .all(&self.database)
            .await?;
        self.hydrate_records(models).await
    }

    async fn get_by_subcategory_and_month(
        &self,
        user_id: &str,
        subcategory_id: i32,
        month: YearMonth,
    ) -> ResultEngine<Vec<Record>> {
        let models = in_month(records::Entity::find(), month)
            .filter(records::Column::UserId.eq(user_id))
            .filter(records::Column::SubcategoryId.eq(subcategory_id))
            .order_by_asc(records::Column::OccurredAt)
            .all(&self.database)
            .await?;
        self.hydrate_records(models).await
    }

    async fn total_spent_for_subcategory_in_month(
        &self,
        user_id: &str,
        subcategory_id: i32,
        month: YearMonth,
        currency: &Currency,
    ) -> ResultEngine<Money> {
        // Amounts are decimal text, so the sum happens here rather than in SQL.
        let amounts: Vec<String> = in_month(records::Entity::find(), month)
            .select_only()
            .column(records::Column::Amount)
            .filter(records::Column::UserId.eq(user_id))
            .filter(records::Column::SubcategoryId.eq(subcategory_id))
            .filter(records::Column::Currency.eq(currency.code()))
            .into_tuple()
            .all(&self.database)
            .await?;

        let mut total = Decimal::ZERO;
        for amount in &amounts {
            total = total
                .checked_add(parse_decimal(amount, "record amount")?)
                .ok_or_else(|| {
                    EngineError::AmountOverflow(format!(
                        "total of subcategory {subcategory_id} in {month}"
                    ))
                })?;
        }
        Ok(Money::from_parts(total, currency.clone()).abs())
    }

    async fn update(&self, record: &Record) -> ResultEngine<()> {
        records::ActiveModel::from(record)
            .update(&self.database)
            .await?;
        Ok(())
    }

    async fn delete(&self, id: RecordId, user_id: &str) -> ResultEngine<bool> {
        let result = records::Entity::delete_many()
            .filter(records::Column::Id.eq(id.to_string()))
            .filter(records::Column::UserId.eq(user_id))
            .exec(&self.database)
            .await?;
        Ok(result.rows_affected > 0)
    }
}
