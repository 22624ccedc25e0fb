use std::ops::Index;
use serde::Deserialize;

/// Unit systems supported by the forecast provider
#[derive(Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    Si,
    Us,
    Ca,
    Uk2,
}

impl UnitSystem {
    /// The code used in provider requests
    pub fn code(&self) -> &'static str {
        match self {
            UnitSystem::Si  => "si",
            UnitSystem::Us  => "us",
            UnitSystem::Ca  => "ca",
            UnitSystem::Uk2 => "uk2",
        }
    }
}

/// Measurement categories reported by the forecast provider
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Measurement {
    NearestStormDistance,
    PrecipIntensity,
    PrecipIntensityMax,
    PrecipAccumulation,
    Temperature,
    TemperatureMin,
    TemperatureMax,
    ApparentTemperature,
    DewPoint,
    WindSpeed,
    WindGust,
    Pressure,
    Visibility,
}

const MEASUREMENTS: usize = 13;

impl Measurement {
    fn slot(&self) -> usize {
        *self as usize
    }
}

/// The SI table, all other systems are expressed as overrides of it
const SI_BASE: [&str; MEASUREMENTS] = [
    "Kilometers",
    "Millimeters per hour",
    "Millimeters per hour",
    "Centimeters",
    "Degrees Celsius",
    "Degrees Celsius",
    "Degrees Celsius",
    "Degrees Celsius",
    "Degrees Celsius",
    "Meters per second",
    "Meters per second",
    "Hectopascals",
    "Kilometers",
];

const CA_OVERRIDES: &[(Measurement, &str)] = &[
    (Measurement::WindSpeed, "Kilometers per hour"),
    (Measurement::WindGust, "Kilometers per hour"),
];

const UK2_OVERRIDES: &[(Measurement, &str)] = &[
    (Measurement::NearestStormDistance, "Miles"),
    (Measurement::Visibility, "Miles"),
    (Measurement::WindSpeed, "Miles per hour"),
    (Measurement::WindGust, "Miles per hour"),
];

const US_OVERRIDES: &[(Measurement, &str)] = &[
    (Measurement::NearestStormDistance, "Miles"),
    (Measurement::PrecipIntensity, "Inches per hour"),
    (Measurement::PrecipIntensityMax, "Inches per hour"),
    (Measurement::PrecipAccumulation, "Inches"),
    (Measurement::Temperature, "Degrees Fahrenheit"),
    (Measurement::TemperatureMin, "Degrees Fahrenheit"),
    (Measurement::TemperatureMax, "Degrees Fahrenheit"),
    (Measurement::ApparentTemperature, "Degrees Fahrenheit"),
    (Measurement::DewPoint, "Degrees Fahrenheit"),
    (Measurement::WindSpeed, "Miles per hour"),
    (Measurement::WindGust, "Miles per hour"),
    (Measurement::Pressure, "Millibars"),
    (Measurement::Visibility, "Miles"),
];

/// Mapping from measurement category to unit name for one unit system
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnitTable {
    names: [&'static str; MEASUREMENTS],
}

impl Index<Measurement> for UnitTable {
    type Output = str;

    fn index(&self, measurement: Measurement) -> &str {
        self.names[measurement.slot()]
    }
}

/// Returns the unit table for the given unit system
///
/// # Arguments
///
/// * 'units' - the unit system
pub fn units_decoder(units: UnitSystem) -> UnitTable {
    let overrides = match units {
        UnitSystem::Si  => &[][..],
        UnitSystem::Ca  => CA_OVERRIDES,
        UnitSystem::Uk2 => UK2_OVERRIDES,
        UnitSystem::Us  => US_OVERRIDES,
    };

    let mut names = SI_BASE;
    for (measurement, name) in overrides {
        names[measurement.slot()] = *name;
    }

    UnitTable { names }
}

/// Abbreviates a phrase by taking the lowercased first letter of each word
///
/// # Arguments
///
/// * 'phrase' - e.g. "Miles per hour"
pub fn get_abbreviation(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .filter_map(|w| w.chars().next())
        .flat_map(|c| c.to_lowercase())
        .collect()
}

/// Returns the wind speed abbreviation for a unit system, e.g. "mph"
///
/// # Arguments
///
/// * 'units' - the unit system
pub fn get_windspeed_abbreviation(units: UnitSystem) -> String {
    get_abbreviation(&units_decoder(units)[Measurement::WindSpeed])
}

/// Returns the temperature letter for a unit system, e.g. 'C'
///
/// The letter is the uppercased first letter of the last word of the unit name.
///
/// # Arguments
///
/// * 'units' - the unit system
pub fn get_temperature_letter(units: UnitSystem) -> String {
    units_decoder(units)[Measurement::Temperature]
        .split_whitespace()
        .last()
        .and_then(|w| w.chars().next())
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}

const COMPASS: [&str; 16] = [
    "N", "NNE", "NE", "ENE",
    "E", "ESE", "SE", "SSE",
    "S", "SSW", "SW", "WSW",
    "W", "WNW", "NW", "NNW",
];

/// Converts a wind bearing in degrees to one of 16 compass points
///
/// # Arguments
///
/// * 'degrees' - bearing in degrees, 0 is north
pub fn deg_to_compass(degrees: f64) -> &'static str {
    let val = (degrees / 22.5).round_ties_even() as i64;

    COMPASS[val.rem_euclid(16) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn us_wind_speed_is_mph() {
        let table = units_decoder(UnitSystem::Us);

        assert_eq!(&table[Measurement::WindSpeed], "Miles per hour");
        assert_eq!(get_windspeed_abbreviation(UnitSystem::Us), "mph");
    }

    #[test]
    fn wind_abbreviations_per_system() {
        assert_eq!(get_windspeed_abbreviation(UnitSystem::Si), "mps");
        assert_eq!(get_windspeed_abbreviation(UnitSystem::Ca), "kph");
        assert_eq!(get_windspeed_abbreviation(UnitSystem::Uk2), "mph");
    }

    #[test]
    fn temperature_letters() {
        assert_eq!(get_temperature_letter(UnitSystem::Us), "F");
        assert_eq!(get_temperature_letter(UnitSystem::Si), "C");
        assert_eq!(get_temperature_letter(UnitSystem::Ca), "C");
        assert_eq!(get_temperature_letter(UnitSystem::Uk2), "C");
    }

    #[test]
    fn overrides_leave_other_fields_alone() {
        let si = units_decoder(UnitSystem::Si);
        let uk2 = units_decoder(UnitSystem::Uk2);
        let ca = units_decoder(UnitSystem::Ca);

        assert_eq!(&uk2[Measurement::Visibility], "Miles");
        assert_eq!(&uk2[Measurement::Pressure], &si[Measurement::Pressure]);
        assert_eq!(&ca[Measurement::WindGust], "Kilometers per hour");
        assert_eq!(&ca[Measurement::Visibility], "Kilometers");
        assert_eq!(&units_decoder(UnitSystem::Us)[Measurement::Pressure], "Millibars");
    }

    #[test]
    fn compass_points() {
        assert_eq!(deg_to_compass(0.0), "N");
        assert_eq!(deg_to_compass(22.5), "NNE");
        assert_eq!(deg_to_compass(348.75), "N");
        assert_eq!(deg_to_compass(180.0), "S");
        assert_eq!(deg_to_compass(270.0), "W");
        assert_eq!(deg_to_compass(359.9), "N");
        assert_eq!(deg_to_compass(11.25), "N");
        assert_eq!(deg_to_compass(33.75), "NE");
    }
}
