use std::collections::BTreeMap;

use tracing::warn;

use super::category::EmissionCategory;

/// Accumulated raw quantities per canonical category. Every category is
/// present from the start so downstream math never deals with gaps.
#[derive(Debug, Clone, PartialEq)]
pub struct Quantities(BTreeMap<EmissionCategory, f64>);

impl Quantities {
    pub fn zeroed() -> Self {
        let mut map = BTreeMap::new();
        for category in EmissionCategory::ordered() {
            map.insert(category, 0.0);
        }
        Self(map)
    }

    pub fn get(&self, category: EmissionCategory) -> f64 {
        self.0.get(&category).copied().unwrap_or(0.0)
    }

    pub fn add(&mut self, category: EmissionCategory, amount: f64) {
        *self.0.entry(category).or_insert(0.0) += amount;
    }

    pub fn iter(&self) -> impl Iterator<Item = (EmissionCategory, f64)> + '_ {
        self.0.iter().map(|(category, value)| (*category, *value))
    }
}

impl Default for Quantities {
    fn default() -> Self {
        Self::zeroed()
    }
}

/// Survey reading codes and the trip-distance assumptions baked into the
/// conversion. Flights are round trips: a long flight assumes 3,000 miles
/// each way, medium 1,800, short 300.
fn conversion(code: &str) -> Option<(EmissionCategory, f64)> {
    let mapped = match code {
        "WA" => (EmissionCategory::Waste, 1.0),
        "WS" => (EmissionCategory::Servers, 1.0),
        "MD" => (EmissionCategory::MeatDays, 1.0),
        "CM" => (EmissionCategory::CarMiles, 1.0),
        "EG" => (EmissionCategory::NaturalGasTherms, 1.0),
        "EO" => (EmissionCategory::OilGallons, 1.0),
        "EP" => (EmissionCategory::ElectricityKwh, 1.0),
        "ER" => (EmissionCategory::PropaneGallons, 1.0),
        "HD" => (EmissionCategory::HotelDays, 1.0),
        "OA" | "HA" => (EmissionCategory::OfficeSqft, 1.0),
        "BL" => (EmissionCategory::BusMiles, 1000.0),
        "BM" => (EmissionCategory::BusMiles, 500.0),
        "BS" => (EmissionCategory::BusMiles, 200.0),
        "TL" => (EmissionCategory::TrainMiles, 1000.0),
        "TM" => (EmissionCategory::TrainMiles, 500.0),
        "TS" => (EmissionCategory::TrainMiles, 200.0),
        "SL" => (EmissionCategory::SubwayMiles, 5.0),
        "SS" => (EmissionCategory::SubwayMiles, 1.0),
        "FL" => (EmissionCategory::FlightMilesLong, 6000.0),
        "FM" => (EmissionCategory::FlightMilesMedium, 3600.0),
        "FS" => (EmissionCategory::FlightMilesShort, 600.0),
        _ => return None,
    };

    Some(mapped)
}

/// Codes that carry survey data but no emission contribution.
fn is_informational(code: &str) -> bool {
    code == "HP"
}

/// Whether a survey code maps to an emission category (or is known to be
/// informational). Flow-control questions return false and never produce
/// emissions rows.
pub fn is_emission_code(code: &str) -> bool {
    conversion(code).is_some() || is_informational(code)
}

/// Convert raw survey readings into canonical category quantities.
/// Readings for the same category accumulate additively; unknown codes
/// contribute nothing but are logged so catalog/converter drift is
/// visible in tests and telemetry.
pub fn convert_readings<'a, I>(readings: I) -> Quantities
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    let mut quantities = Quantities::zeroed();

    for (code, value) in readings {
        match conversion(code) {
            Some((category, scale)) => quantities.add(category, value * scale),
            None if is_informational(code) => {}
            None => {
                warn!(code, "unknown emission reading code, contributing zero");
            }
        }
    }

    quantities
}
