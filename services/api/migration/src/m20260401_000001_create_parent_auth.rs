use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ParentAuth::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ParentAuth::Uuid)
                            .string_len(11)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ParentAuth::LoginId)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(ParentAuth::PasswordHash).string().not_null())
                    .col(ColumnDef::new(ParentAuth::Name).string_len(20).not_null())
                    .col(ColumnDef::new(ParentAuth::ProfileUri).string())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(ParentAuth::Table)
                    .col(ParentAuth::LoginId)
                    .unique()
                    .name("idx_parent_auth_login_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ParentAuth::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ParentAuth {
    Table,
    Uuid,
    LoginId,
    PasswordHash,
    Name,
    ProfileUri,
}
