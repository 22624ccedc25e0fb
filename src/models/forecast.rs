use chrono::{DateTime, Local, TimeZone};
use crate::errors::FetchError;
use crate::models::darksky_forecast::{FullDataPoint, FullForecast};

/// Current conditions
#[derive(Clone, Debug, PartialEq)]
pub struct Currently {
    pub summary: String,
    pub icon: String,
    pub temperature: f64,
    pub apparent_temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub wind_bearing: Option<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DailyEntry {
    pub time: DateTime<Local>,
    pub sunrise: DateTime<Local>,
    pub sunset: DateTime<Local>,
    pub temperature_high: f64,
    pub temperature_low: f64,
    pub precip_probability: f64,
    pub icon: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HourlyEntry {
    pub time: DateTime<Local>,
    pub temperature: f64,
    pub precip_probability: f64,
    pub icon: String,
}

/// One successfully fetched and parsed forecast. Never mutated, a refresh replaces it.
#[derive(Clone, Debug, PartialEq)]
pub struct ForecastSnapshot {
    pub currently: Currently,
    pub daily: Vec<DailyEntry>,
    pub hourly: Vec<HourlyEntry>,
}

impl TryFrom<FullForecast> for ForecastSnapshot {
    type Error = FetchError;

    fn try_from(full: FullForecast) -> Result<Self, Self::Error> {
        let currently = required(full.currently, "currently")?;
        let daily = required(full.daily, "daily")?;
        let hourly = full.hourly.unwrap_or_default();

        let daily = daily.data
            .into_iter()
            .map(daily_entry)
            .collect::<Result<Vec<DailyEntry>, FetchError>>()?;

        if daily.is_empty() {
            return Err(FetchError::MalformedPayload("daily.data is empty".to_string()));
        }

        let hourly = hourly.data
            .into_iter()
            .map(hourly_entry)
            .collect::<Result<Vec<HourlyEntry>, FetchError>>()?;

        Ok(ForecastSnapshot {
            currently: currently_entry(currently)?,
            daily,
            hourly,
        })
    }
}

/// Parses a raw provider document into a snapshot
///
/// # Arguments
///
/// * 'json' - the response body
pub fn parse_forecast(json: &str) -> Result<ForecastSnapshot, FetchError> {
    let full: FullForecast = serde_json::from_str(json)?;

    ForecastSnapshot::try_from(full)
}

fn currently_entry(p: FullDataPoint) -> Result<Currently, FetchError> {
    Ok(Currently {
        summary: p.summary.unwrap_or_default(),
        icon: required(p.icon, "currently.icon")?,
        temperature: required(p.temperature, "currently.temperature")?,
        apparent_temperature: required(p.apparent_temperature, "currently.apparentTemperature")?,
        humidity: required(p.humidity, "currently.humidity")?,
        wind_speed: required(p.wind_speed, "currently.windSpeed")?,
        wind_bearing: p.wind_bearing,
    })
}

fn daily_entry(p: FullDataPoint) -> Result<DailyEntry, FetchError> {
    Ok(DailyEntry {
        time: to_local(required(p.time, "daily.time")?)?,
        sunrise: to_local(required(p.sunrise_time, "daily.sunriseTime")?)?,
        sunset: to_local(required(p.sunset_time, "daily.sunsetTime")?)?,
        temperature_high: required(p.temperature_high.or(p.temperature_max), "daily.temperatureHigh")?,
        temperature_low: required(p.temperature_low.or(p.temperature_min), "daily.temperatureLow")?,
        precip_probability: p.precip_probability.unwrap_or(0.0),
        icon: required(p.icon, "daily.icon")?,
    })
}

fn hourly_entry(p: FullDataPoint) -> Result<HourlyEntry, FetchError> {
    Ok(HourlyEntry {
        time: to_local(required(p.time, "hourly.time")?)?,
        temperature: required(p.temperature, "hourly.temperature")?,
        precip_probability: p.precip_probability.unwrap_or(0.0),
        icon: required(p.icon, "hourly.icon")?,
    })
}

fn required<T>(value: Option<T>, field: &str) -> Result<T, FetchError> {
    value.ok_or_else(|| FetchError::MalformedPayload(format!("missing field {}", field)))
}

fn to_local(timestamp: i64) -> Result<DateTime<Local>, FetchError> {
    Local.timestamp_opt(timestamp, 0)
        .single()
        .ok_or_else(|| FetchError::MalformedPayload(format!("invalid timestamp {}", timestamp)))
}

/// Snapshot builders shared by tests across the crate
#[cfg(test)]
pub mod fixtures {
    use chrono::{DateTime, Local, TimeDelta, TimeZone};
    use super::*;

    /// A local instant on a date without daylight saving transitions
    pub fn at(hour: u32, minute: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 6, 12, hour, minute, 0).unwrap()
    }

    /// A snapshot for 2024-06-12 with sunrise 05:00, sunset 21:00 and four days
    /// of daily entries, hourly entries from 00:00 every hour for 48 hours
    pub fn snapshot() -> ForecastSnapshot {
        let midnight = at(0, 0);

        let daily = (0..4)
            .map(|d| {
                let day = midnight + TimeDelta::days(d);
                DailyEntry {
                    time: day,
                    sunrise: day + TimeDelta::hours(5),
                    sunset: day + TimeDelta::hours(21),
                    temperature_high: 21.4 + d as f64,
                    temperature_low: 11.6 - d as f64,
                    precip_probability: 0.1,
                    icon: "partly-cloudy-day".to_string(),
                }
            })
            .collect();

        let hourly = (0..48)
            .map(|h| HourlyEntry {
                time: midnight + TimeDelta::hours(h),
                temperature: 15.0,
                precip_probability: 0.0,
                icon: "cloudy".to_string(),
            })
            .collect();

        ForecastSnapshot {
            currently: Currently {
                summary: "Mostly Cloudy".to_string(),
                icon: "cloudy".to_string(),
                temperature: 17.6,
                apparent_temperature: 16.2,
                humidity: 0.63,
                wind_speed: 4.4,
                wind_bearing: Some(22.5),
            },
            daily,
            hourly,
        }
    }
}
