use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Budgets {
    Table,
    Id,
    UserId,
    Year,
    Month,
    SubcategoryId,
    PlannedAmount,
    ActualSpent,
    Currency,
}

#[derive(Iden)]
enum Users {
    Table,
    Username,
}

#[derive(Iden)]
enum RecordSubcategories {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Budgets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Budgets::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Budgets::UserId).string().not_null())
                    .col(ColumnDef::new(Budgets::Year).integer().not_null())
                    .col(ColumnDef::new(Budgets::Month).integer().not_null())
                    .col(ColumnDef::new(Budgets::SubcategoryId).integer().not_null())
                    .col(ColumnDef::new(Budgets::PlannedAmount).string().not_null())
                    .col(
                        ColumnDef::new(Budgets::ActualSpent)
                            .string()
                            .not_null()
                            .default("0"),
                    )
                    .col(ColumnDef::new(Budgets::Currency).string_len(3).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-budgets-user_id")
                            .from(Budgets::Table, Budgets::UserId)
                            .to(Users::Table, Users::Username),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-budgets-subcategory_id")
                            .from(Budgets::Table, Budgets::SubcategoryId)
                            .to(RecordSubcategories::Table, RecordSubcategories::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // One budget per user, subcategory and month.
        manager
            .create_index(
                Index::create()
                    .name("idx-budgets-user_id-subcategory_id-year-month-unique")
                    .table(Budgets::Table)
                    .col(Budgets::UserId)
                    .col(Budgets::SubcategoryId)
                    .col(Budgets::Year)
                    .col(Budgets::Month)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Budgets::Table).to_owned())
            .await
    }
}
