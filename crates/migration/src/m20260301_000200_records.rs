use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Records {
    Table,
    Id,
    UserId,
    Amount,
    Currency,
    CategoryId,
    SubcategoryId,
    OccurredAt,
    Description,
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
                    .table(Records::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Records::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Records::UserId).string().not_null())
                    // Canonical decimal text, signed.
                    .col(ColumnDef::new(Records::Amount).string().not_null())
                    .col(ColumnDef::new(Records::Currency).string_len(3).not_null())
                    .col(ColumnDef::new(Records::CategoryId).integer().not_null())
                    .col(ColumnDef::new(Records::SubcategoryId).integer().not_null())
                    .col(
                        ColumnDef::new(Records::OccurredAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Records::Description).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-records-user_id")
                            .from(Records::Table, Records::UserId)
                            .to(Users::Table, Users::Username),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-records-subcategory_id")
                            .from(Records::Table, Records::SubcategoryId)
                            .to(RecordSubcategories::Table, RecordSubcategories::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-records-user_id-subcategory_id-occurred_at")
                    .table(Records::Table)
                    .col(Records::UserId)
                    .col(Records::SubcategoryId)
                    .col(Records::OccurredAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Records::Table).to_owned())
            .await
    }
}
