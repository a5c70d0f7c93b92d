//! Rating entity

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "ratings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub horse_id: i32,

    /// 0..=5
    pub value: i32,

    pub rating_date: DateTimeUtc,

    pub description: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::horse::Entity",
        from = "Column::HorseId",
        to = "super::horse::Column::Id",
        on_delete = "Cascade"
    )]
    Horse,
}

impl Related<super::horse::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Horse.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
