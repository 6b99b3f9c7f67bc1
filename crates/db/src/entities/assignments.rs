//! `SeaORM` Entity for assignments table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::TravelType;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "assignments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub assignment_number: String,
    pub purpose: String,
    pub budget_line_code: String,
    pub origin: String,
    pub destination: String,
    pub travel_type: TravelType,
    pub transportation: String,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub duration_days: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::cost_lines::Entity")]
    CostLines,
}

impl Related<super::cost_lines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CostLines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
