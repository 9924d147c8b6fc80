//! The module contains `RecordSubcategory` and its persisted form.

use sea_orm::entity::{ActiveValue, prelude::*};

use crate::{ResultEngine, util::normalize_required_name};

/// Leaf of the two-level category taxonomy.
///
/// A subcategory belongs to exactly one category for its whole lifetime.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordSubcategory {
    id: i32,
    category_id: i32,
    name: String,
}

impl RecordSubcategory {
    pub fn new(id: i32, category_id: i32, name: &str) -> ResultEngine<Self> {
        Ok(Self {
            id,
            category_id,
            name: normalize_required_name(name, "subcategory")?,
        })
    }

    #[must_use]
    pub fn id(&self) -> i32 {
        self.id
    }

    #[must_use]
    pub fn category_id(&self) -> i32 {
        self.category_id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "record_subcategories")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    pub category_id: i32,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Category,
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for RecordSubcategory {
    type Error = crate::EngineError;

    fn try_from(model: Model) -> ResultEngine<Self> {
        RecordSubcategory::new(model.id, model.category_id, &model.name)
    }
}

impl From<&RecordSubcategory> for ActiveModel {
    fn from(value: &RecordSubcategory) -> Self {
        Self {
            id: ActiveValue::Set(value.id),
            category_id: ActiveValue::Set(value.category_id),
            name: ActiveValue::Set(value.name.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_required() {
        assert!(RecordSubcategory::new(7, 2, " ").is_err());
        assert_eq!(RecordSubcategory::new(7, 2, " Shopping").unwrap().name(), "Shopping");
    }
}
