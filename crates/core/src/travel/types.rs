//! Travel assignment data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sppd_shared::types::{AssignmentId, TravelerId};

use super::destinations::DEFAULT_ORIGIN;
use super::duration::lodging_nights;
use crate::rates::RateEntry;

/// Travel region classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelType {
    /// Travel within the home province.
    WithinRegion,
    /// Travel to another province.
    OutOfRegion,
}

impl TravelType {
    /// Storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WithinRegion => "within_region",
            Self::OutOfRegion => "out_of_region",
        }
    }
}

impl std::fmt::Display for TravelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TravelType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "within_region" | "dalam_daerah" => Ok(Self::WithinRegion),
            "out_of_region" | "luar_daerah" => Ok(Self::OutOfRegion),
            _ => Err(format!("Unknown travel type: {s}")),
        }
    }
}

/// An employee who can be assigned to travel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Traveler {
    /// Traveler ID.
    pub id: TravelerId,
    /// Full name.
    pub name: String,
    /// Civil servant identifier (NIP).
    pub nip: String,
    /// Rank / grade.
    pub rank: String,
    /// Position.
    pub position: String,
    /// Daily representation allowance for within-region travel.
    pub representation_within_region: Decimal,
    /// Daily representation allowance for out-of-region travel.
    pub representation_out_of_region: Decimal,
}

impl Traveler {
    /// Representation rate applicable to a travel type.
    #[must_use]
    pub const fn representation_rate(&self, travel_type: TravelType) -> Decimal {
        match travel_type {
            TravelType::WithinRegion => self.representation_within_region,
            TravelType::OutOfRegion => self.representation_out_of_region,
        }
    }
}

/// Manually editable amount fields of a cost line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostField {
    /// Daily allowance rate.
    DailyAllowance,
    /// Lodging rate per night.
    Lodging,
    /// Fuel / public transport.
    FuelTransport,
    /// Sea transport.
    SeaTransport,
    /// Air transport.
    AirTransport,
    /// Taxi / local transport.
    LocalTransport,
    /// Representation rate per day.
    Representation,
}

impl CostField {
    /// Field name as stored.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DailyAllowance => "daily_allowance",
            Self::Lodging => "lodging",
            Self::FuelTransport => "fuel_transport",
            Self::SeaTransport => "sea_transport",
            Self::AirTransport => "air_transport",
            Self::LocalTransport => "local_transport",
            Self::Representation => "representation",
        }
    }
}

/// Priced cost breakdown for one traveler on one assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostLine {
    /// Traveler this line prices.
    pub traveler_id: TravelerId,
    /// Daily allowance rate.
    pub daily_allowance: Decimal,
    /// Days paid at the daily allowance.
    pub daily_days: u32,
    /// Lodging rate per night.
    pub lodging: Decimal,
    /// Nights paid at the lodging rate.
    pub lodging_days: u32,
    /// Fuel / public transport.
    pub fuel_transport: Decimal,
    /// Sea transport.
    pub sea_transport: Decimal,
    /// Air transport.
    pub air_transport: Decimal,
    /// Taxi / local transport.
    pub local_transport: Decimal,
    /// Representation rate per day.
    pub representation: Decimal,
    /// Days paid at the representation rate.
    pub representation_days: u32,
}

impl CostLine {
    /// A line with zero amounts and zero days.
    #[must_use]
    pub const fn empty(traveler_id: TravelerId) -> Self {
        Self {
            traveler_id,
            daily_allowance: Decimal::ZERO,
            daily_days: 0,
            lodging: Decimal::ZERO,
            lodging_days: 0,
            fuel_transport: Decimal::ZERO,
            sea_transport: Decimal::ZERO,
            air_transport: Decimal::ZERO,
            local_transport: Decimal::ZERO,
            representation: Decimal::ZERO,
            representation_days: 0,
        }
    }

    /// Sets the day-dependent quantities from a trip duration.
    pub fn set_days(&mut self, duration_days: u32) {
        self.daily_days = duration_days;
        self.lodging_days = lodging_nights(duration_days);
        self.representation_days = duration_days;
    }

    /// Copies the six rate fields from a rate entry.
    pub fn apply_rates(&mut self, entry: &RateEntry) {
        self.daily_allowance = entry.daily_allowance;
        self.lodging = entry.lodging;
        self.fuel_transport = entry.fuel_transport;
        self.sea_transport = entry.sea_transport;
        self.air_transport = entry.air_transport;
        self.local_transport = entry.local_transport;
    }

    /// Overwrites one amount field.
    pub fn set_field(&mut self, field: CostField, value: Decimal) {
        let slot = match field {
            CostField::DailyAllowance => &mut self.daily_allowance,
            CostField::Lodging => &mut self.lodging,
            CostField::FuelTransport => &mut self.fuel_transport,
            CostField::SeaTransport => &mut self.sea_transport,
            CostField::AirTransport => &mut self.air_transport,
            CostField::LocalTransport => &mut self.local_transport,
            CostField::Representation => &mut self.representation,
        };
        *slot = value;
    }

    /// Amount fields paired with their names.
    #[must_use]
    pub fn amounts(&self) -> [(CostField, Decimal); 7] {
        [
            (CostField::DailyAllowance, self.daily_allowance),
            (CostField::Lodging, self.lodging),
            (CostField::FuelTransport, self.fuel_transport),
            (CostField::SeaTransport, self.sea_transport),
            (CostField::AirTransport, self.air_transport),
            (CostField::LocalTransport, self.local_transport),
            (CostField::Representation, self.representation),
        ]
    }
}

/// A travel assignment (SPT/SPPD) and its per-traveler cost lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Assignment ID.
    pub id: AssignmentId,
    /// Assignment letter number.
    pub assignment_number: String,
    /// Purpose of travel.
    pub purpose: String,
    /// Budget line code charged.
    pub budget_line_code: String,
    /// Place of departure.
    pub origin: String,
    /// Destination name.
    pub destination: String,
    /// Travel region classification.
    pub travel_type: TravelType,
    /// Mode of transportation.
    pub transportation: String,
    /// Departure date.
    pub start_date: Option<NaiveDate>,
    /// Return date.
    pub end_date: Option<NaiveDate>,
    /// Inclusive day count between start and end.
    pub duration_days: u32,
    /// Selected travelers, in selection order.
    pub traveler_ids: Vec<TravelerId>,
    /// One cost line per selected traveler, same order.
    pub cost_lines: Vec<CostLine>,
}

impl Assignment {
    /// Creates a blank assignment charged to a budget line.
    #[must_use]
    pub fn new(budget_line_code: impl Into<String>, travel_type: TravelType) -> Self {
        Self {
            id: AssignmentId::new(),
            assignment_number: String::new(),
            purpose: String::new(),
            budget_line_code: budget_line_code.into(),
            origin: DEFAULT_ORIGIN.to_string(),
            destination: String::new(),
            travel_type,
            transportation: String::new(),
            start_date: None,
            end_date: None,
            duration_days: 0,
            traveler_ids: Vec::new(),
            cost_lines: Vec::new(),
        }
    }

    /// Whether a traveler is selected.
    #[must_use]
    pub fn has_traveler(&self, traveler_id: TravelerId) -> bool {
        self.traveler_ids.contains(&traveler_id)
    }

    /// Cost line for a traveler.
    #[must_use]
    pub fn cost_line(&self, traveler_id: TravelerId) -> Option<&CostLine> {
        self.cost_lines.iter().find(|c| c.traveler_id == traveler_id)
    }

    /// Mutable cost line for a traveler.
    pub fn cost_line_mut(&mut self, traveler_id: TravelerId) -> Option<&mut CostLine> {
        self.cost_lines
            .iter_mut()
            .find(|c| c.traveler_id == traveler_id)
    }
}
