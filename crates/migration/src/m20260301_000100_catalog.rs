//! Category taxonomy tables and the default catalog.

use sea_orm::{ConnectionTrait, Statement};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum RecordCategories {
    Table,
    Id,
    Name,
}

#[derive(Iden)]
enum RecordSubcategories {
    Table,
    Id,
    CategoryId,
    Name,
}

const CATEGORIES: &[(i32, &str)] = &[(1, "Income"), (2, "Expenses")];

const SUBCATEGORIES: &[(i32, i32, &str)] = &[
    (1, 1, "Salary"),
    (2, 1, "Freelance"),
    (3, 1, "Investments"),
    (4, 1, "Other"),
    (5, 2, "Food"),
    (6, 2, "Transportation"),
    (7, 2, "Shopping"),
    (8, 2, "Entertainment"),
    (9, 2, "Bills"),
    (10, 2, "Healthcare"),
    (11, 2, "Education"),
    (12, 2, "Travel"),
    (13, 2, "Other"),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RecordCategories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RecordCategories::Id)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RecordCategories::Name).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RecordSubcategories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RecordSubcategories::Id)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(RecordSubcategories::CategoryId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RecordSubcategories::Name)
                            .string()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-record_subcategories-category_id")
                            .from(RecordSubcategories::Table, RecordSubcategories::CategoryId)
                            .to(RecordCategories::Table, RecordCategories::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        seed_catalog(manager).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RecordSubcategories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RecordCategories::Table).to_owned())
            .await
    }
}

async fn seed_catalog(manager: &SchemaManager<'_>) -> Result<(), DbErr> {
    let db = manager.get_connection();
    let backend = db.get_database_backend();

    for (id, name) in CATEGORIES {
        db.execute(Statement::from_sql_and_values(
            backend,
            "INSERT INTO record_categories (id, name) VALUES (?, ?);",
            vec![(*id).into(), (*name).into()],
        ))
        .await?;
    }
    for (id, category_id, name) in SUBCATEGORIES {
        db.execute(Statement::from_sql_and_values(
            backend,
            "INSERT INTO record_subcategories (id, category_id, name) VALUES (?, ?, ?);",
            vec![(*id).into(), (*category_id).into(), (*name).into()],
        ))
        .await?;
    }
    Ok(())
}
