use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ExpenditureChildTag::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ExpenditureChildTag::ExpenditureUuid)
                            .string_len(11)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ExpenditureChildTag::ChildUuid)
                            .string_len(11)
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(ExpenditureChildTag::ExpenditureUuid)
                            .col(ExpenditureChildTag::ChildUuid),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_expenditure_child_tag_expenditure_uuid")
                            .from(
                                ExpenditureChildTag::Table,
                                ExpenditureChildTag::ExpenditureUuid,
                            )
                            .to(Expenditure::Table, Expenditure::Uuid)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_expenditure_child_tag_child_uuid")
                            .from(
                                ExpenditureChildTag::Table,
                                ExpenditureChildTag::ChildUuid,
                            )
                            .to(Children::Table, Children::Uuid)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ExpenditureChildTag::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ExpenditureChildTag {
    Table,
    ExpenditureUuid,
    ChildUuid,
}

#[derive(Iden)]
enum Expenditure {
    Table,
    Uuid,
}

#[derive(Iden)]
enum Children {
    Table,
    Uuid,
}
