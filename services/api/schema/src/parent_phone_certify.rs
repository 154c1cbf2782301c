use sea_orm::entity::prelude::*;

/// Phone verification row: one per phone number. `parent_uuid` is set exactly
/// once when the certified phone is bound to an account at sign-up.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "parent_phone_certify")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub phone_number: String,
    pub certify_code: String,
    pub certified: bool,
    pub parent_uuid: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::parent_auth::Entity",
        from = "Column::ParentUuid",
        to = "super::parent_auth::Column::Uuid",
        on_delete = "Cascade"
    )]
    ParentAuth,
}

impl Related<super::parent_auth::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ParentAuth.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
