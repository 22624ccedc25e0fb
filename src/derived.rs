use chrono::{DateTime, Local, TimeDelta};
use crate::errors::FetchError;
use crate::models::forecast::ForecastSnapshot;

/// Probability from which an hour of daylight rain calls for an umbrella
const UMBRELLA_PRECIP_PROBABILITY: f64 = 0.25;

/// Facts computed from a snapshot at the time it was fetched
#[derive(Clone, Debug, PartialEq)]
pub struct DerivedFacts {
    pub sunrise: DateTime<Local>,
    pub sunrise_label: String,
    pub sunset: DateTime<Local>,
    pub sunset_label: String,
    pub take_umbrella: bool,
}

/// Computes derived facts for a snapshot
///
/// Sunrise and sunset are picked from today until today's sunset has passed, after
/// that both are picked from tomorrow.
///
/// # Arguments
///
/// * 'snapshot' - the forecast to evaluate
/// * 'now' - the instant to evaluate at
pub fn evaluate(snapshot: &ForecastSnapshot, now: DateTime<Local>) -> Result<DerivedFacts, FetchError> {
    let today = snapshot.daily.first()
        .ok_or_else(|| FetchError::MalformedPayload("no daily entry for today".to_string()))?;

    let (index, sr_suffix, ss_suffix) = if now < today.sunset {
        (0, "today", "tonight")
    } else {
        (1, "tomorrow", "tomorrow")
    };

    let day = snapshot.daily.get(index)
        .ok_or_else(|| FetchError::MalformedPayload("no daily entry for tomorrow".to_string()))?;

    Ok(DerivedFacts {
        sunrise: day.sunrise,
        sunrise_label: time_label(day.sunrise, sr_suffix),
        sunset: day.sunset,
        sunset_label: time_label(day.sunset, ss_suffix),
        take_umbrella: take_umbrella(snapshot, now),
    })
}

/// Decides if an umbrella is needed today
///
/// Rain now or rain as today's icon settles it. Otherwise the first hour of today's
/// daylight with a precipitation probability of at least 25% does.
///
/// # Arguments
///
/// * 'snapshot' - the forecast to check
/// * 'now' - the instant defining what today is
pub fn take_umbrella(snapshot: &ForecastSnapshot, now: DateTime<Local>) -> bool {
    if snapshot.currently.icon == "rain" {
        return true;
    }

    let Some(today) = snapshot.daily.first() else {
        return false;
    };

    if today.icon == "rain" {
        return true;
    }

    let date = now.date_naive();
    snapshot.hourly
        .iter()
        .any(|h| h.time.date_naive() == date
            && h.time >= today.sunrise
            && h.time <= today.sunset
            && h.precip_probability >= UMBRELLA_PRECIP_PROBABILITY)
}

fn time_label(time: DateTime<Local>, suffix: &str) -> String {
    format!("{} {}", time.format("%I:%M %p"), suffix)
}

/// Where we are in relation to today's daylight
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Daylight {
    pub in_daylight: bool,
    pub day_length: TimeDelta,
    pub until_sunrise: TimeDelta,
    pub until_sunset: TimeDelta,
}

/// Computes daylight info for the info screen
///
/// When the sun is up, time until sunset is set and time until sunrise is zero. When
/// it is down it is the other way around, after sunset the next sunrise is tomorrow's.
///
/// # Arguments
///
/// * 'snapshot' - the forecast holding sunrise and sunset times
/// * 'now' - the current instant
pub fn daylight(snapshot: &ForecastSnapshot, now: DateTime<Local>) -> Option<Daylight> {
    let today = snapshot.daily.first()?;
    let day_length = today.sunset - today.sunrise;

    if now > today.sunrise && now < today.sunset {
        Some(Daylight {
            in_daylight: true,
            day_length,
            until_sunrise: TimeDelta::zero(),
            until_sunset: today.sunset - now,
        })
    } else {
        let next_sunrise = if now >= today.sunset {
            snapshot.daily.get(1)?.sunrise
        } else {
            today.sunrise
        };

        Some(Daylight {
            in_daylight: false,
            day_length,
            until_sunrise: next_sunrise - now,
            until_sunset: TimeDelta::zero(),
        })
    }
}

/// Splits a duration into whole hours and remaining minutes
///
/// # Arguments
///
/// * 'delta' - the duration to split
pub fn hours_minutes(delta: TimeDelta) -> (i64, i64) {
    let minutes = delta.num_minutes();
    (minutes / 60, minutes % 60)
}
