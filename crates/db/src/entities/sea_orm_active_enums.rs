//! `SeaORM` active enums mapped to `PostgreSQL` enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "travel_type")]
pub enum TravelType {
    #[sea_orm(string_value = "within_region")]
    WithinRegion,
    #[sea_orm(string_value = "out_of_region")]
    OutOfRegion,
}
