//! Two-level record taxonomy: `RecordCategory` owning its subcategories.

use sea_orm::entity::{ActiveValue, prelude::*};

use crate::{EngineError, RecordSubcategory, ResultEngine, util::normalize_required_name};

/// Top level of the taxonomy (e.g. "Income", "Expenses").
///
/// Invariants held by construction:
/// - every contained subcategory has `category_id == self.id`
/// - subcategory ids are unique inside the category
///
/// Subcategories keep their insertion order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordCategory {
    id: i32,
    name: String,
    subcategories: Vec<RecordSubcategory>,
}

impl RecordCategory {
    pub fn new(id: i32, name: &str) -> ResultEngine<Self> {
        Ok(Self {
            id,
            name: normalize_required_name(name, "category")?,
            subcategories: Vec::new(),
        })
    }

    #[must_use]
    pub fn id(&self) -> i32 {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn subcategories(&self) -> &[RecordSubcategory] {
        &self.subcategories
    }

    pub fn add_subcategory(&mut self, subcategory: RecordSubcategory) -> ResultEngine<()> {
        if subcategory.category_id() != self.id {
            return Err(EngineError::CategoryMismatch {
                category: self.id,
                subcategory_category: subcategory.category_id(),
            });
        }
        if self.has_subcategory(subcategory.id()) {
            return Err(EngineError::DuplicateSubcategory(subcategory.id()));
        }
        self.subcategories.push(subcategory);
        Ok(())
    }

    #[must_use]
    pub fn has_subcategory(&self, subcategory_id: i32) -> bool {
        self.subcategories.iter().any(|s| s.id() == subcategory_id)
    }

    #[must_use]
    pub fn subcategory(&self, subcategory_id: i32) -> Option<&RecordSubcategory> {
        self.subcategories.iter().find(|s| s.id() == subcategory_id)
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "record_categories")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::subcategories::Entity")]
    Subcategories,
}

impl Related<super::subcategories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subcategories.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<(Model, Vec<super::subcategories::Model>)> for RecordCategory {
    type Error = EngineError;

    fn try_from(
        (model, subcategories): (Model, Vec<super::subcategories::Model>),
    ) -> ResultEngine<Self> {
        let mut category = RecordCategory::new(model.id, &model.name)?;
        for sub in subcategories {
            category.add_subcategory(RecordSubcategory::try_from(sub)?)?;
        }
        Ok(category)
    }
}

impl From<&RecordCategory> for ActiveModel {
    fn from(value: &RecordCategory) -> Self {
        Self {
            id: ActiveValue::Set(value.id),
            name: ActiveValue::Set(value.name.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expenses() -> RecordCategory {
        RecordCategory::new(2, "Expenses").unwrap()
    }

    #[test]
    fn add_subcategory_keeps_order() {
        let mut category = expenses();
        category
            .add_subcategory(RecordSubcategory::new(7, 2, "Shopping").unwrap())
            .unwrap();
        category
            .add_subcategory(RecordSubcategory::new(5, 2, "Food").unwrap())
            .unwrap();

        let ids: Vec<i32> = category.subcategories().iter().map(|s| s.id()).collect();
        assert_eq!(ids, vec![7, 5]);
        assert!(category.has_subcategory(5));
        assert!(!category.has_subcategory(1));
        assert_eq!(category.subcategory(7).unwrap().name(), "Shopping");
    }

    #[test]
    fn foreign_subcategory_is_rejected() {
        let mut category = expenses();
        let err = category
            .add_subcategory(RecordSubcategory::new(1, 1, "Salary").unwrap())
            .unwrap_err();

        assert_eq!(
            err,
            EngineError::CategoryMismatch {
                category: 2,
                subcategory_category: 1
            }
        );
        assert!(category.subcategories().is_empty());
    }

    #[test]
    fn duplicate_subcategory_is_rejected() {
        let mut category = expenses();
        category
            .add_subcategory(RecordSubcategory::new(7, 2, "Shopping").unwrap())
            .unwrap();

        let err = category
            .add_subcategory(RecordSubcategory::new(7, 2, "Clothes").unwrap())
            .unwrap_err();

        assert_eq!(err, EngineError::DuplicateSubcategory(7));
        assert_eq!(category.subcategories().len(), 1);
    }

    #[test]
    fn blank_name_is_rejected() {
        assert_eq!(RecordCategory::new(3, "  ").unwrap_err().code(), "INVALID_NAME");
    }
}
