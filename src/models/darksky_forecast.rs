use serde::Deserialize;

/// One data point as delivered by the provider, used for currently, hourly and daily.
/// Every field is optional on the wire, requirements are checked when building a snapshot.
#[derive(Deserialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct FullDataPoint {
    pub time: Option<i64>,
    pub summary: Option<String>,
    pub icon: Option<String>,
    pub temperature: Option<f64>,
    pub apparent_temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_bearing: Option<f64>,
    pub precip_probability: Option<f64>,
    pub sunrise_time: Option<i64>,
    pub sunset_time: Option<i64>,
    pub temperature_high: Option<f64>,
    pub temperature_low: Option<f64>,
    pub temperature_max: Option<f64>,
    pub temperature_min: Option<f64>,
}

#[derive(Deserialize, Default, Debug)]
pub struct FullDataBlock {
    #[serde(default)]
    pub data: Vec<FullDataPoint>,
}

#[derive(Deserialize, Debug)]
pub struct FullForecast {
    pub currently: Option<FullDataPoint>,
    pub hourly: Option<FullDataBlock>,
    pub daily: Option<FullDataBlock>,
}
