use chrono::{DateTime, Local, TimeDelta};
use log::{error, info};
use crate::derived::{evaluate, DerivedFacts};
use crate::errors::FetchError;
use crate::models::forecast::ForecastSnapshot;

/// Anything that can produce a forecast snapshot, one attempt per call
pub trait ForecastSource {
    fn fetch(&mut self) -> Result<ForecastSnapshot, FetchError>;
}

/// A snapshot together with the facts derived from it, always replaced as one
#[derive(Clone, Debug, PartialEq)]
pub struct Forecast {
    pub snapshot: ForecastSnapshot,
    pub derived: DerivedFacts,
}

/// Rate limited forecast cache
///
/// Fetch attempts are spaced by at least the refresh interval once a forecast exists.
/// A failed attempt keeps whatever forecast was held before.
pub struct ForecastCache<S: ForecastSource> {
    source: S,
    refresh_interval: TimeDelta,
    last_fetch: Option<DateTime<Local>>,
    current: Option<Forecast>,
}

impl<S: ForecastSource> ForecastCache<S> {
    /// Returns a new, empty, ForecastCache
    ///
    /// # Arguments
    ///
    /// * 'source' - where forecasts are fetched from
    /// * 'update_freq' - refresh interval in seconds
    pub fn new(source: S, update_freq: u64) -> Self {
        let refresh_interval = i64::try_from(update_freq)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .unwrap_or(TimeDelta::MAX);

        Self { source, refresh_interval, last_fetch: None, current: None }
    }

    /// Makes sure the held forecast is not older than the refresh interval
    ///
    pub fn ensure_fresh(&mut self) -> Result<(), FetchError> {
        self.ensure_fresh_at(Local::now())
    }

    /// Makes sure the held forecast is not older than the refresh interval, as seen at
    /// the given instant.
    ///
    /// The attempt time is recorded before the result is looked at, so a failing provider
    /// is not retried faster than the refresh interval once a forecast is held.
    ///
    /// # Arguments
    ///
    /// * 'now' - the current instant
    pub fn ensure_fresh_at(&mut self, now: DateTime<Local>) -> Result<(), FetchError> {
        if self.current.is_some() && self.last_fetch.is_some_and(|t| now - t < self.refresh_interval) {
            return Ok(());
        }

        self.last_fetch = Some(now);

        let result = self.source.fetch()
            .and_then(|snapshot| {
                let derived = evaluate(&snapshot, now)?;
                Ok(Forecast { snapshot, derived })
            });

        match result {
            Ok(forecast) => {
                info!("forecast updated, umbrella needed: {}", forecast.derived.take_umbrella);
                self.current = Some(forecast);
                Ok(())
            }
            Err(e) => {
                if self.current.is_some() {
                    error!("{}, keeping previous forecast", e);
                } else {
                    error!("{}, no forecast available", e);
                }
                Err(e)
            }
        }
    }

    /// Returns the held forecast, None until the first successful fetch
    pub fn current(&self) -> Option<&Forecast> {
        self.current.as_ref()
    }

    /// Returns the time of the last fetch attempt
    pub fn last_fetch(&self) -> Option<DateTime<Local>> {
        self.last_fetch
    }

    pub fn refresh_interval(&self) -> TimeDelta {
        self.refresh_interval
    }
}
