//! Rate table data types.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sppd_shared::types::fits_amount_scale;

use super::error::RateError;

/// Standard rates for one destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateEntry {
    /// Destination name (exact, case-sensitive key).
    pub destination: String,
    /// Daily allowance per day.
    pub daily_allowance: Decimal,
    /// Lodging per night.
    pub lodging: Decimal,
    /// Fuel / public transport, round trip.
    pub fuel_transport: Decimal,
    /// Sea transport.
    pub sea_transport: Decimal,
    /// Air transport.
    pub air_transport: Decimal,
    /// Taxi / local transport.
    pub local_transport: Decimal,
}

impl RateEntry {
    /// Creates an entry with all rates at zero.
    #[must_use]
    pub fn new(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            daily_allowance: Decimal::ZERO,
            lodging: Decimal::ZERO,
            fuel_transport: Decimal::ZERO,
            sea_transport: Decimal::ZERO,
            air_transport: Decimal::ZERO,
            local_transport: Decimal::ZERO,
        }
    }

    /// Rate amounts paired with their field names.
    #[must_use]
    pub fn amounts(&self) -> [(&'static str, Decimal); 6] {
        [
            ("daily_allowance", self.daily_allowance),
            ("lodging", self.lodging),
            ("fuel_transport", self.fuel_transport),
            ("sea_transport", self.sea_transport),
            ("air_transport", self.air_transport),
            ("local_transport", self.local_transport),
        ]
    }

    /// Validates the entry.
    ///
    /// # Errors
    ///
    /// Returns `RateError::EmptyDestination` for a blank key and
    /// `RateError::NegativeAmount` for any negative rate, and
    /// `RateError::TooPrecise` for a rate with more than two decimal places.
    pub fn validate(&self) -> Result<(), RateError> {
        if self.destination.trim().is_empty() {
            return Err(RateError::EmptyDestination);
        }

        if let Some((field, _)) = self
            .amounts()
            .into_iter()
            .find(|(_, amount)| *amount < Decimal::ZERO)
        {
            return Err(RateError::NegativeAmount {
                destination: self.destination.clone(),
                field,
            });
        }

        if let Some((field, _)) = self
            .amounts()
            .into_iter()
            .find(|(_, amount)| !fits_amount_scale(*amount))
        {
            return Err(RateError::TooPrecise {
                destination: self.destination.clone(),
                field,
            });
        }

        Ok(())
    }
}

/// Lookup of standard rates keyed by destination.
///
/// Holds at most one entry per destination.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTable {
    entries: BTreeMap<String, RateEntry>,
}

impl RateTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from entries; later entries replace earlier ones for the same destination.
    ///
    /// # Errors
    ///
    /// Returns the first validation error encountered.
    pub fn try_from_entries(entries: impl IntoIterator<Item = RateEntry>) -> Result<Self, RateError> {
        let mut table = Self::new();
        for entry in entries {
            table.upsert(entry)?;
        }
        Ok(table)
    }

    /// Looks up the entry for a destination (exact match).
    #[must_use]
    pub fn get(&self, destination: &str) -> Option<&RateEntry> {
        self.entries.get(destination)
    }

    /// Inserts or wholly replaces the entry for its destination.
    ///
    /// Returns the replaced entry, if any.
    ///
    /// # Errors
    ///
    /// Returns a validation error and leaves the table unchanged when the entry is invalid.
    pub fn upsert(&mut self, entry: RateEntry) -> Result<Option<RateEntry>, RateError> {
        entry.validate()?;
        Ok(self.entries.insert(entry.destination.clone(), entry))
    }

    /// Removes the entry for a destination.
    ///
    /// Callers deleting persisted entries check `integrity::ensure_unreferenced` first.
    ///
    /// # Errors
    ///
    /// Returns `RateError::NotFound` when no entry exists.
    pub fn remove(&mut self, destination: &str) -> Result<RateEntry, RateError> {
        self.entries
            .remove(destination)
            .ok_or_else(|| RateError::NotFound(destination.to_string()))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries ordered by destination.
    pub fn iter(&self) -> impl Iterator<Item = &RateEntry> {
        self.entries.values()
    }
}
