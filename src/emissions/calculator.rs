use serde::Serialize;

use super::category::EmissionCategory;
use super::converter::Quantities;

// Metric tons of CO2e per category-native unit.
const MT_WASTE: f64 = 0.000453592; // per pound
const MT_BUS: f64 = 0.000055; // per mile
const MT_MEAT_DAY: f64 = 0.007;
const MT_GASOLINE: f64 = 0.000355; // per car mile
const MT_HEATING_OIL: f64 = 0.01015; // per gallon
const MT_RAIL_TRAIN: f64 = 0.000169; // per mile
const MT_RAIL_SUBWAY: f64 = 0.000121; // per mile
const MT_OFFICE_SQFT: f64 = 0.00547809; // per square foot
const MT_HOTEL_DAY: f64 = 0.0168; // per night
const MT_PROPANE: f64 = 0.00574; // per gallon
const MT_ELECTRICITY: f64 = 0.0005925; // per kWh
const MT_NATURAL_GAS: f64 = 0.005; // per therm
const MT_FLIGHT_LONG: f64 = 0.000167; // per mile
const MT_FLIGHT_SHORT: f64 = 0.000251;
const MT_FLIGHT_MEDIUM: f64 = 0.000143;

// A server draws a steady 0.25 kW, billed as electricity year round.
const KWH_PER_SERVER: f64 = 0.25;

/// Multiplier covering the non-CO2 climate impact of aviation.
pub const RADIATIVE_FORCING: f64 = 2.7;

/// Offset vendor price in USD per metric ton (COTAP).
pub const PRICE_PER_METRIC_TON: f64 = 9.8;

/// One category's contribution to the total.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryBreakdown {
    pub category: EmissionCategory,
    pub quantity: f64,
    pub metric_tons: f64,
}

/// Stateless converter from category quantities to metric tons and an
/// offset price. Radiative forcing is enabled for user-facing totals and
/// disabled only for the internal raw mode.
#[derive(Debug, Clone)]
pub struct EmissionsCalculator {
    pub use_radiative_forcing: bool,
    pub price_per_metric_ton: f64,
}

impl Default for EmissionsCalculator {
    fn default() -> Self {
        Self {
            use_radiative_forcing: true,
            price_per_metric_ton: PRICE_PER_METRIC_TON,
        }
    }
}

impl EmissionsCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculator with radiative forcing disabled.
    pub fn raw() -> Self {
        Self {
            use_radiative_forcing: false,
            ..Self::default()
        }
    }

    pub fn with_price(price_per_metric_ton: f64) -> Self {
        Self {
            price_per_metric_ton,
            ..Self::default()
        }
    }

    /// Total metric tons for the given quantities.
    pub fn calculate(&self, quantities: &Quantities) -> f64 {
        quantities
            .iter()
            .map(|(category, value)| self.metric_tons(category, value))
            .sum()
    }

    /// Per-category contributions, omitting categories with nothing in them.
    pub fn breakdown(&self, quantities: &Quantities) -> Vec<CategoryBreakdown> {
        quantities
            .iter()
            .filter_map(|(category, value)| {
                let metric_tons = self.metric_tons(category, value);
                (metric_tons != 0.0).then_some(CategoryBreakdown {
                    category,
                    quantity: value,
                    metric_tons,
                })
            })
            .collect()
    }

    /// USD offset price for a number of metric tons.
    pub fn price(&self, metric_tons: f64) -> f64 {
        metric_tons * self.price_per_metric_ton
    }

    fn metric_tons(&self, category: EmissionCategory, value: f64) -> f64 {
        let forcing = if self.use_radiative_forcing {
            RADIATIVE_FORCING
        } else {
            1.0
        };

        match category {
            EmissionCategory::Waste => value * MT_WASTE,
            EmissionCategory::Servers => {
                value * KWH_PER_SERVER * MT_ELECTRICITY * 24.0 * 365.0
            }
            EmissionCategory::BusMiles => value * MT_BUS,
            EmissionCategory::MeatDays => value * MT_MEAT_DAY,
            EmissionCategory::CarMiles => value * MT_GASOLINE,
            EmissionCategory::OilGallons => value * MT_HEATING_OIL,
            EmissionCategory::TrainMiles => value * MT_RAIL_TRAIN,
            EmissionCategory::OfficeSqft => value * MT_OFFICE_SQFT,
            EmissionCategory::HotelDays => value * MT_HOTEL_DAY,
            EmissionCategory::SubwayMiles => value * MT_RAIL_SUBWAY,
            EmissionCategory::PropaneGallons => value * MT_PROPANE,
            EmissionCategory::ElectricityKwh => value * MT_ELECTRICITY,
            EmissionCategory::NaturalGasTherms => value * MT_NATURAL_GAS,
            EmissionCategory::FlightMilesLong => value * MT_FLIGHT_LONG * forcing,
            EmissionCategory::FlightMilesShort => value * MT_FLIGHT_SHORT * forcing,
            EmissionCategory::FlightMilesMedium => value * MT_FLIGHT_MEDIUM * forcing,
        }
    }
}
