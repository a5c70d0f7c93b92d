//! Stable entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stables")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,

    /// Lowercased name, unique
    pub name_key: String,

    pub max_capacity: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::horse::Entity")]
    Horses,
}

impl Related<super::horse::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Horses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
