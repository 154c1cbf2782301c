use sea_orm::entity::prelude::*;

/// Child profile owned by a parent account. `uuid` is `c` + 10 digits.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "children")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub uuid: String,
    pub parent_uuid: String,
    pub name: String,
    pub birth: chrono::DateTime<chrono::Utc>,
    pub sex: String,
    pub profile_uri: Option<String>,
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
