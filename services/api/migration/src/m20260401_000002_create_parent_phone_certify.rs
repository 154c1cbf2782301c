use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ParentPhoneCertify::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ParentPhoneCertify::PhoneNumber)
                            .string_len(11)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ParentPhoneCertify::CertifyCode)
                            .string_len(6)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ParentPhoneCertify::Certified)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(ParentPhoneCertify::ParentUuid).string_len(11))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_parent_phone_certify_parent_uuid")
                            .from(
                                ParentPhoneCertify::Table,
                                ParentPhoneCertify::ParentUuid,
                            )
                            .to(ParentAuth::Table, ParentAuth::Uuid)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ParentPhoneCertify::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ParentPhoneCertify {
    Table,
    PhoneNumber,
    CertifyCode,
    Certified,
    ParentUuid,
}

#[derive(Iden)]
enum ParentAuth {
    Table,
    Uuid,
}
