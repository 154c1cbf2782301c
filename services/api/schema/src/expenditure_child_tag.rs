use sea_orm::entity::prelude::*;

/// Join row tagging a child on an expenditure.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "expenditure_child_tag")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub expenditure_uuid: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub child_uuid: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::expenditure::Entity",
        from = "Column::ExpenditureUuid",
        to = "super::expenditure::Column::Uuid",
        on_delete = "Cascade"
    )]
    Expenditure,
    #[sea_orm(
        belongs_to = "super::children::Entity",
        from = "Column::ChildUuid",
        to = "super::children::Column::Uuid",
        on_delete = "Cascade"
    )]
    Children,
}

impl Related<super::expenditure::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Expenditure.def()
    }
}

impl Related<super::children::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Children.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
