use std::time::Duration;
use log::debug;
use ureq::Agent;
use crate::cache::ForecastSource;
use crate::config::WeatherParameters;
use crate::errors::FetchError;
use crate::models::forecast::{parse_forecast, ForecastSnapshot};
use crate::units::UnitSystem;

const REQUEST_DOMAIN: &str = "https://api.darksky.net";

/// Minute level data is never used, so it is never requested
const EXCLUDE: &str = "minutely";

/// Struct for fetching weather forecasts from Dark Sky
pub struct DarkSky {
    agent: Agent,
    api_key: String,
    lat: f64,
    lon: f64,
    units: UnitSystem,
    lang: String,
}

impl DarkSky {
    /// Returns a DarkSky struct ready for fetching forecasts
    ///
    /// # Arguments
    ///
    /// * 'config' - weather section of the configuration
    pub fn new(config: &WeatherParameters) -> DarkSky {
        let agent_config = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(30)))
            .build();

        let agent = agent_config.into();

        Self {
            agent,
            api_key: config.api_key.to_string(),
            lat: config.lat,
            lon: config.lon,
            units: config.units,
            lang: config.lang.to_string(),
        }
    }

    /// Builds the request url and query pairs for a forecast request
    fn request(&self) -> (String, Vec<(&'static str, String)>) {
        let url = format!("{}/forecast/{}/{},{}", REQUEST_DOMAIN, self.api_key, self.lat, self.lon);
        let query = vec![
            ("exclude", EXCLUDE.to_string()),
            ("units", self.units.code().to_string()),
            ("lang", self.lang.to_string()),
        ];

        (url, query)
    }
}

impl ForecastSource for DarkSky {
    /// Retrieves a forecast, one request per call.
    ///
    /// Transport errors and non 2xx statuses are reported as unreachable while a body
    /// that doesn't hold a complete forecast is reported as malformed.
    fn fetch(&mut self) -> Result<ForecastSnapshot, FetchError> {
        let (url, query) = self.request();
        debug!("requesting forecast for {},{}", self.lat, self.lon);

        let json = self.agent
            .get(url)
            .query_pairs(query.iter().map(|(k, v)| (*k, v.as_str())))
            .call()?
            .body_mut()
            .read_to_string()?;

        parse_forecast(&json)
    }
}
