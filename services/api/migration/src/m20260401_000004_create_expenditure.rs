use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Expenditure::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Expenditure::Uuid)
                            .string_len(11)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Expenditure::ParentUuid)
                            .string_len(11)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Expenditure::Name).string_len(20).not_null())
                    .col(ColumnDef::new(Expenditure::Amount).big_integer().not_null())
                    .col(ColumnDef::new(Expenditure::Rating).integer().not_null())
                    .col(ColumnDef::new(Expenditure::Link).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_expenditure_parent_uuid")
                            .from(Expenditure::Table, Expenditure::ParentUuid)
                            .to(ParentAuth::Table, ParentAuth::Uuid)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Expenditure::Table)
                    .col(Expenditure::ParentUuid)
                    .name("idx_expenditure_parent_uuid")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Expenditure::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Expenditure {
    Table,
    Uuid,
    ParentUuid,
    Name,
    Amount,
    Rating,
    Link,
}

#[derive(Iden)]
enum ParentAuth {
    Table,
    Uuid,
}
