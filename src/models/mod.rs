pub mod darksky_forecast;
pub mod forecast;
