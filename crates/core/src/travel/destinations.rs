//! Region-appropriate destination lists.

use serde::{Deserialize, Serialize};

use super::types::TravelType;

/// Default place of departure.
pub const DEFAULT_ORIGIN: &str = "Mataram";

/// Regencies and cities of West Nusa Tenggara.
pub const NTB_REGENCIES: [&str; 10] = [
    "Kota Mataram",
    "Lombok Barat",
    "Lombok Tengah",
    "Lombok Timur",
    "Lombok Utara",
    "Sumbawa Barat",
    "Sumbawa",
    "Dompu",
    "Bima",
    "Kota Bima",
];

/// Indonesian provinces other than West Nusa Tenggara.
pub const OTHER_PROVINCES: [&str; 37] = [
    "Aceh",
    "Sumatera Utara",
    "Sumatera Barat",
    "Riau",
    "Kepulauan Riau",
    "Jambi",
    "Sumatera Selatan",
    "Kepulauan Bangka Belitung",
    "Bengkulu",
    "Lampung",
    "DKI Jakarta",
    "Jawa Barat",
    "Banten",
    "Jawa Tengah",
    "DI Yogyakarta",
    "Jawa Timur",
    "Bali",
    "Nusa Tenggara Timur",
    "Kalimantan Barat",
    "Kalimantan Tengah",
    "Kalimantan Selatan",
    "Kalimantan Timur",
    "Kalimantan Utara",
    "Sulawesi Utara",
    "Gorontalo",
    "Sulawesi Tengah",
    "Sulawesi Barat",
    "Sulawesi Selatan",
    "Sulawesi Tenggara",
    "Maluku",
    "Maluku Utara",
    "Papua",
    "Papua Barat",
    "Papua Barat Daya",
    "Papua Tengah",
    "Papua Pegunungan",
    "Papua Selatan",
];

/// Valid destinations per travel type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationCatalog {
    within_region: Vec<String>,
    out_of_region: Vec<String>,
}

impl Default for DestinationCatalog {
    fn default() -> Self {
        Self::new(
            NTB_REGENCIES.iter().map(ToString::to_string).collect(),
            OTHER_PROVINCES.iter().map(ToString::to_string).collect(),
        )
    }
}

impl DestinationCatalog {
    /// Creates a catalog from explicit lists.
    #[must_use]
    pub const fn new(within_region: Vec<String>, out_of_region: Vec<String>) -> Self {
        Self {
            within_region,
            out_of_region,
        }
    }

    /// Default catalog with either list replaced when an override is given.
    #[must_use]
    pub fn with_overrides(
        within_region: Option<Vec<String>>,
        out_of_region: Option<Vec<String>>,
    ) -> Self {
        let defaults = Self::default();
        Self::new(
            within_region.unwrap_or(defaults.within_region),
            out_of_region.unwrap_or(defaults.out_of_region),
        )
    }

    /// Destinations allowed for a travel type, in display order.
    #[must_use]
    pub fn allowed(&self, travel_type: TravelType) -> &[String] {
        match travel_type {
            TravelType::WithinRegion => &self.within_region,
            TravelType::OutOfRegion => &self.out_of_region,
        }
    }

    /// Whether a destination is valid for a travel type (exact match).
    #[must_use]
    pub fn contains(&self, travel_type: TravelType, destination: &str) -> bool {
        self.allowed(travel_type).iter().any(|d| d == destination)
    }
}
