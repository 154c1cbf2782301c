use sea_orm::entity::prelude::*;

/// Childcare expenditure record. `uuid` is `e` + 10 digits; tagged children
/// live in `expenditure_child_tag`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "expenditure")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub uuid: String,
    pub parent_uuid: String,
    pub name: String,
    pub amount: i64,
    pub rating: i32,
    pub link: Option<String>,
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
    #[sea_orm(has_many = "super::expenditure_child_tag::Entity")]
    ExpenditureChildTag,
}

impl Related<super::parent_auth::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ParentAuth.def()
    }
}

impl Related<super::expenditure_child_tag::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExpenditureChildTag.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
