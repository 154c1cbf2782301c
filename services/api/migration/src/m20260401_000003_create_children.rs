use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Children::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Children::Uuid)
                            .string_len(11)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Children::ParentUuid).string_len(11).not_null())
                    .col(ColumnDef::new(Children::Name).string_len(10).not_null())
                    .col(
                        ColumnDef::new(Children::Birth)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Children::Sex).string_len(10).not_null())
                    .col(ColumnDef::new(Children::ProfileUri).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_children_parent_uuid")
                            .from(Children::Table, Children::ParentUuid)
                            .to(ParentAuth::Table, ParentAuth::Uuid)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Children::Table)
                    .col(Children::ParentUuid)
                    .name("idx_children_parent_uuid")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Children::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Children {
    Table,
    Uuid,
    ParentUuid,
    Name,
    Birth,
    Sex,
    ProfileUri,
}

#[derive(Iden)]
enum ParentAuth {
    Table,
    Uuid,
}
