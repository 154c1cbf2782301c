use sea_orm::entity::prelude::*;

/// Parent account identity record. `uuid` is `p` + 10 digits; `login_id` is
/// the human-chosen unique login name.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "parent_auth")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub uuid: String,
    #[sea_orm(unique)]
    pub login_id: String,
    pub password_hash: String,
    pub name: String,
    pub profile_uri: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::parent_phone_certify::Entity")]
    ParentPhoneCertify,
    #[sea_orm(has_many = "super::children::Entity")]
    Children,
    #[sea_orm(has_many = "super::expenditure::Entity")]
    Expenditure,
}

impl Related<super::parent_phone_certify::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ParentPhoneCertify.def()
    }
}

impl Related<super::children::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Children.def()
    }
}

impl Related<super::expenditure::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Expenditure.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
