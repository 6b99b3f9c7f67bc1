//! `SeaORM` Entity for cost_lines table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "cost_lines")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub assignment_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub traveler_id: Uuid,
    pub position: i32,
    pub daily_allowance: Decimal,
    pub daily_days: i32,
    pub lodging: Decimal,
    pub lodging_days: i32,
    pub fuel_transport: Decimal,
    pub sea_transport: Decimal,
    pub air_transport: Decimal,
    pub local_transport: Decimal,
    pub representation: Decimal,
    pub representation_days: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assignments::Entity",
        from = "Column::AssignmentId",
        to = "super::assignments::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Assignments,
}

impl Related<super::assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
