use serde::{Deserialize, Serialize};

/// Canonical emission categories that raw survey readings convert into.
/// Each carries a quantity in category-native units (miles, pounds,
/// therms, kWh) until the calculator turns it into metric tons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmissionCategory {
    Waste,
    Servers,
    BusMiles,
    MeatDays,
    CarMiles,
    OilGallons,
    TrainMiles,
    OfficeSqft,
    HotelDays,
    SubwayMiles,
    PropaneGallons,
    ElectricityKwh,
    FlightMilesLong,
    NaturalGasTherms,
    FlightMilesShort,
    FlightMilesMedium,
}

impl EmissionCategory {
    pub const fn ordered() -> [Self; 16] {
        [
            Self::Waste,
            Self::Servers,
            Self::BusMiles,
            Self::MeatDays,
            Self::CarMiles,
            Self::OilGallons,
            Self::TrainMiles,
            Self::OfficeSqft,
            Self::HotelDays,
            Self::SubwayMiles,
            Self::PropaneGallons,
            Self::ElectricityKwh,
            Self::FlightMilesLong,
            Self::NaturalGasTherms,
            Self::FlightMilesShort,
            Self::FlightMilesMedium,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Waste => "waste",
            Self::Servers => "servers",
            Self::BusMiles => "bus_miles",
            Self::MeatDays => "meat_days",
            Self::CarMiles => "car_miles",
            Self::OilGallons => "oil_gallons",
            Self::TrainMiles => "train_miles",
            Self::OfficeSqft => "office_sqft",
            Self::HotelDays => "hotel_days",
            Self::SubwayMiles => "subway_miles",
            Self::PropaneGallons => "propane_gallons",
            Self::ElectricityKwh => "electricity_kwh",
            Self::FlightMilesLong => "flight_miles_long",
            Self::NaturalGasTherms => "natural_gas_therms",
            Self::FlightMilesShort => "flight_miles_short",
            Self::FlightMilesMedium => "flight_miles_medium",
        }
    }

    /// Flight categories get the radiative forcing multiplier.
    pub const fn is_flight(self) -> bool {
        matches!(
            self,
            Self::FlightMilesLong | Self::FlightMilesShort | Self::FlightMilesMedium
        )
    }
}
