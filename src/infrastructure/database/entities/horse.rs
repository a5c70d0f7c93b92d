//! Horse entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::{HorseCondition, HorseType as DomainHorseType};

/// Breed class, stored by its wire code
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum HorseType {
    #[sea_orm(string_value = "GORACOKRWISTY")]
    HotBlooded,
    #[sea_orm(string_value = "CIEPLOKRWISTY")]
    WarmBlooded,
    #[sea_orm(string_value = "ZIMNOKRWISTY")]
    ColdBlooded,
    #[sea_orm(string_value = "KUC")]
    Pony,
}

impl From<DomainHorseType> for HorseType {
    fn from(t: DomainHorseType) -> Self {
        match t {
            DomainHorseType::HotBlooded => Self::HotBlooded,
            DomainHorseType::WarmBlooded => Self::WarmBlooded,
            DomainHorseType::ColdBlooded => Self::ColdBlooded,
            DomainHorseType::Pony => Self::Pony,
        }
    }
}

impl From<HorseType> for DomainHorseType {
    fn from(t: HorseType) -> Self {
        match t {
            HorseType::HotBlooded => Self::HotBlooded,
            HorseType::WarmBlooded => Self::WarmBlooded,
            HorseType::ColdBlooded => Self::ColdBlooded,
            HorseType::Pony => Self::Pony,
        }
    }
}

/// Condition, stored by its wire code
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum HorseStatus {
    #[sea_orm(string_value = "ZDROWY")]
    Healthy,
    #[sea_orm(string_value = "CHORY")]
    Sick,
    #[sea_orm(string_value = "TRENING")]
    InTraining,
    #[sea_orm(string_value = "KARENCJA")]
    Quarantine,
    #[sea_orm(string_value = "SPRZEDANY")]
    Sold,
}

impl From<HorseCondition> for HorseStatus {
    fn from(s: HorseCondition) -> Self {
        match s {
            HorseCondition::Healthy => Self::Healthy,
            HorseCondition::Sick => Self::Sick,
            HorseCondition::InTraining => Self::InTraining,
            HorseCondition::Quarantine => Self::Quarantine,
            HorseCondition::Sold => Self::Sold,
        }
    }
}

impl From<HorseStatus> for HorseCondition {
    fn from(s: HorseStatus) -> Self {
        match s {
            HorseStatus::Healthy => Self::Healthy,
            HorseStatus::Sick => Self::Sick,
            HorseStatus::InTraining => Self::InTraining,
            HorseStatus::Quarantine => Self::Quarantine,
            HorseStatus::Sold => Self::Sold,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "horses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub stable_id: i32,

    pub name: String,

    pub breed: String,

    /// Duplicate key parts, see `DuplicateKey`
    pub name_key: String,

    pub breed_key: String,

    pub horse_type: HorseType,

    pub status: HorseStatus,

    pub age: i32,

    pub price: f64,

    pub weight_kg: f64,

    pub height_cm: f64,

    /// Empty when unknown
    pub microchip_id: String,

    pub acquisition_date: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::stable::Entity",
        from = "Column::StableId",
        to = "super::stable::Column::Id",
        on_delete = "Cascade"
    )]
    Stable,
    #[sea_orm(has_many = "super::rating::Entity")]
    Ratings,
}

impl Related<super::stable::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Stable.def()
    }
}

impl Related<super::rating::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ratings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
