use std::fs;
use log::LevelFilter;
use serde::Deserialize;
use crate::errors::ConfigError;
use crate::pages::Page;
use crate::units::UnitSystem;

#[derive(Deserialize, Clone, Debug)]
pub struct WeatherParameters {
    pub api_key: String,
    pub lat: f64,
    pub lon: f64,
    pub units: UnitSystem,
    #[serde(default = "default_lang")]
    pub lang: String,
    pub update_freq: u64,
}

#[derive(Deserialize, Clone, Debug)]
pub struct DisplayParameters {
    pub width: u32,
    pub height: u32,
    #[serde(default = "default_icon_size")]
    pub icon_size: String,
    pub page_secs: u64,
    pub pages: Vec<Page>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct General {
    pub log_path: String,
    pub log_level: LevelFilter,
    pub log_to_stdout: bool,
}

#[derive(Deserialize, Clone, Debug)]
pub struct Config {
    pub weather: WeatherParameters,
    pub display: DisplayParameters,
    pub general: General,
}

fn default_lang() -> String {
    "en".to_string()
}

fn default_icon_size() -> String {
    "64".to_string()
}

/// Loads the configuration file and returns a struct with all configuration items
///
/// # Arguments
///
/// * 'config_path' - path to the configuration file
pub fn load_config(config_path: &str) -> Result<Config, ConfigError> {
    let toml = fs::read_to_string(config_path)?;

    parse_config(&toml)
}

/// Parses and validates a configuration document
///
/// # Arguments
///
/// * 'toml' - the configuration as a toml string
pub fn parse_config(toml: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(toml)?;

    validate(&config)?;

    Ok(config)
}

/// Checks value ranges that serde can't express
///
/// # Arguments
///
/// * 'config' - the configuration to check
fn validate(config: &Config) -> Result<(), ConfigError> {
    let weather = &config.weather;

    if weather.api_key.trim().is_empty() {
        return Err(ConfigError::from("api_key must not be empty"));
    }
    if weather.update_freq < 1 {
        return Err(ConfigError::from("update_freq must be at least 1 second"));
    }
    if !(-90.0..=90.0).contains(&weather.lat) {
        return Err(ConfigError::Value(format!("lat out of range: {}", weather.lat)));
    }
    if !(-180.0..=180.0).contains(&weather.lon) {
        return Err(ConfigError::Value(format!("lon out of range: {}", weather.lon)));
    }
    if config.display.pages.is_empty() {
        return Err(ConfigError::from("at least one page must be configured"));
    }
    if config.display.page_secs < 1 {
        return Err(ConfigError::from("page_secs must be at least 1 second"));
    }

    Ok(())
}
