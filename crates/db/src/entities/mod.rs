//! `SeaORM` entity definitions.

pub mod assignments;
pub mod budget_lines;
pub mod cost_lines;
pub mod rate_entries;
pub mod sea_orm_active_enums;
pub mod travelers;
