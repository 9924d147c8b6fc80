use crate::{EngineError, RecordCategory, ResultEngine};

use super::Engine;

impl Engine {
    /// Full taxonomy, categories and subcategories ordered by id.
    pub async fn categories(&self) -> ResultEngine<Vec<RecordCategory>> {
        self.catalog.all_categories().await
    }

    pub async fn category(&self, category_id: i32) -> ResultEngine<RecordCategory> {
        self.catalog
            .category_by_id(category_id)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound(format!("category {category_id}")))
    }
}
