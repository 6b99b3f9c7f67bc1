//! Initial schema for travel assignments and budget reconciliation.
//!
//! Assignments refer to budget lines, travelers and rate entries by key
//! without foreign keys; deletions are guarded by the repositories instead.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(REFERENCE_DATA_SQL).await?;
        db.execute_unprepared(ASSIGNMENTS_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_SQL).await?;
        Ok(())
    }
}

const REFERENCE_DATA_SQL: &str = r"
-- Employees who can be assigned to travel
CREATE TABLE travelers (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name TEXT NOT NULL,
    nip VARCHAR(32) NOT NULL DEFAULT '',
    rank TEXT NOT NULL DEFAULT '',
    position TEXT NOT NULL DEFAULT '',
    representation_within_region NUMERIC(19, 2) NOT NULL DEFAULT 0,
    representation_out_of_region NUMERIC(19, 2) NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_travelers_representation CHECK (
        representation_within_region >= 0 AND representation_out_of_region >= 0
    )
);

CREATE INDEX idx_travelers_name ON travelers(name);

-- Sub-activity budget lines; disbursement ceiling is kept as entered
CREATE TABLE budget_lines (
    code VARCHAR(64) PRIMARY KEY,
    name TEXT NOT NULL,
    budget_ceiling NUMERIC(19, 2) NOT NULL DEFAULT 0,
    disbursement_ceiling TEXT NOT NULL DEFAULT '',
    q1 NUMERIC(19, 2) NOT NULL DEFAULT 0,
    q2 NUMERIC(19, 2) NOT NULL DEFAULT 0,
    q3 NUMERIC(19, 2) NOT NULL DEFAULT 0,
    q4 NUMERIC(19, 2) NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_budget_lines_code CHECK (length(trim(code)) > 0),
    CONSTRAINT chk_budget_lines_amounts CHECK (
        budget_ceiling >= 0 AND q1 >= 0 AND q2 >= 0 AND q3 >= 0 AND q4 >= 0
    )
);

-- Standard rates per destination (exact, case-sensitive key)
CREATE TABLE rate_entries (
    destination TEXT PRIMARY KEY,
    daily_allowance NUMERIC(19, 2) NOT NULL DEFAULT 0,
    lodging NUMERIC(19, 2) NOT NULL DEFAULT 0,
    fuel_transport NUMERIC(19, 2) NOT NULL DEFAULT 0,
    sea_transport NUMERIC(19, 2) NOT NULL DEFAULT 0,
    air_transport NUMERIC(19, 2) NOT NULL DEFAULT 0,
    local_transport NUMERIC(19, 2) NOT NULL DEFAULT 0,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_rate_entries_amounts CHECK (
        daily_allowance >= 0 AND lodging >= 0 AND fuel_transport >= 0
        AND sea_transport >= 0 AND air_transport >= 0 AND local_transport >= 0
    )
);
";

const ASSIGNMENTS_SQL: &str = r"
CREATE TYPE travel_type AS ENUM ('within_region', 'out_of_region');

-- Travel assignments (SPT/SPPD)
CREATE TABLE assignments (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    assignment_number TEXT NOT NULL DEFAULT '',
    purpose TEXT NOT NULL DEFAULT '',
    budget_line_code VARCHAR(64) NOT NULL,
    origin TEXT NOT NULL DEFAULT '',
    destination TEXT NOT NULL,
    travel_type travel_type NOT NULL,
    transportation TEXT NOT NULL DEFAULT '',
    start_date DATE,
    end_date DATE,
    duration_days INTEGER NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_assignments_dates CHECK (end_date IS NULL OR start_date IS NULL OR end_date >= start_date),
    CONSTRAINT chk_assignments_duration CHECK (duration_days >= 0)
);

-- Integrity guards count references by these keys
CREATE INDEX idx_assignments_budget_line ON assignments(budget_line_code);
CREATE INDEX idx_assignments_destination ON assignments(destination);
CREATE INDEX idx_assignments_created ON assignments(created_at);

-- One priced line per traveler per assignment, in selection order
CREATE TABLE cost_lines (
    assignment_id UUID NOT NULL REFERENCES assignments(id) ON DELETE CASCADE,
    traveler_id UUID NOT NULL,
    position INTEGER NOT NULL,
    daily_allowance NUMERIC(19, 2) NOT NULL DEFAULT 0,
    daily_days INTEGER NOT NULL DEFAULT 0,
    lodging NUMERIC(19, 2) NOT NULL DEFAULT 0,
    lodging_days INTEGER NOT NULL DEFAULT 0,
    fuel_transport NUMERIC(19, 2) NOT NULL DEFAULT 0,
    sea_transport NUMERIC(19, 2) NOT NULL DEFAULT 0,
    air_transport NUMERIC(19, 2) NOT NULL DEFAULT 0,
    local_transport NUMERIC(19, 2) NOT NULL DEFAULT 0,
    representation NUMERIC(19, 2) NOT NULL DEFAULT 0,
    representation_days INTEGER NOT NULL DEFAULT 0,
    PRIMARY KEY (assignment_id, traveler_id),
    CONSTRAINT uq_cost_lines_position UNIQUE (assignment_id, position),
    CONSTRAINT chk_cost_lines_days CHECK (
        daily_days >= 0 AND lodging_days >= 0 AND representation_days >= 0
    ),
    CONSTRAINT chk_cost_lines_amounts CHECK (
        daily_allowance >= 0 AND lodging >= 0 AND fuel_transport >= 0 AND sea_transport >= 0
        AND air_transport >= 0 AND local_transport >= 0 AND representation >= 0
    )
);

CREATE INDEX idx_cost_lines_traveler ON cost_lines(traveler_id);
";

const DROP_SQL: &str = r"
DROP TABLE IF EXISTS cost_lines CASCADE;
DROP TABLE IF EXISTS assignments CASCADE;
DROP TYPE IF EXISTS travel_type;
DROP TABLE IF EXISTS rate_entries CASCADE;
DROP TABLE IF EXISTS budget_lines CASCADE;
DROP TABLE IF EXISTS travelers CASCADE;
";
