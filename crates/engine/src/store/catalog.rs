use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{QueryFilter, QueryOrder, prelude::*};

use crate::{
    EngineError, RecordCategory, RecordSubcategory, ResultEngine, categories, subcategories,
};

use super::{CatalogStore, SeaStore};

#[async_trait]
impl CatalogStore for SeaStore {
    async fn category_by_id(&self, id: i32) -> ResultEngine<Option<RecordCategory>> {
        let Some(model) = categories::Entity::find_by_id(id)
            .one(&self.database)
            .await?
        else {
            return Ok(None);
        };
        let subs = subcategories::Entity::find()
            .filter(subcategories::Column::CategoryId.eq(id))
            .order_by_asc(subcategories::Column::Id)
            .all(&self.database)
            .await?;
        RecordCategory::try_from((model, subs)).map(Some)
    }

    async fn all_categories(&self) -> ResultEngine<Vec<RecordCategory>> {
        let models = categories::Entity::find()
            .order_by_asc(categories::Column::Id)
            .all(&self.database)
            .await?;
        let mut subs_by_category: HashMap<i32, Vec<subcategories::Model>> = HashMap::new();
        for sub in subcategories::Entity::find()
            .order_by_asc(subcategories::Column::Id)
            .all(&self.database)
            .await?
        {
            subs_by_category.entry(sub.category_id).or_default().push(sub);
        }

        models
            .into_iter()
            .map(|model| {
                let subs = subs_by_category.remove(&model.id).unwrap_or_default();
                RecordCategory::try_from((model, subs))
            })
            .collect()
    }

    async fn subcategory_by_id(&self, id: i32) -> ResultEngine<Option<RecordSubcategory>> {
        subcategories::Entity::find_by_id(id)
            .one(&self.database)
            .await?
            .map(RecordSubcategory::try_from)
            .transpose()
    }
}

impl SeaStore {
    /// Register a new top-level category.
    pub async fn insert_category(&self, category: &RecordCategory) -> ResultEngine<()> {
        if categories::Entity::find_by_id(category.id())
            .one(&self.database)
            .await?
            .is_some()
        {
            return Err(EngineError::InvalidName(format!(
                "category {} already exists",
                category.id()
            )));
        }
        categories::ActiveModel::from(category)
            .insert(&self.database)
            .await?;
        Ok(())
    }

    /// Attach a subcategory to its existing category.
    pub async fn insert_subcategory(&self, subcategory: &RecordSubcategory) -> ResultEngine<()> {
        let mut category = self
            .category_by_id(subcategory.category_id())
            .await?
            .ok_or_else(|| {
                EngineError::KeyNotFound(format!("category {}", subcategory.category_id()))
            })?;
        if self.subcategory_by_id(subcategory.id()).await?.is_some() {
            return Err(EngineError::DuplicateSubcategory(subcategory.id()));
        }
        category.add_subcategory(subcategory.clone())?;
        subcategories::ActiveModel::from(subcategory)
            .insert(&self.database)
            .await?;
        Ok(())
    }
}
