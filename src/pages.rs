use std::fmt;
use chrono::{DateTime, Local, Timelike};
use serde::Deserialize;
use crate::cache::Forecast;
use crate::derived::{daylight, hours_minutes};
use crate::models::forecast::{DailyEntry, HourlyEntry};
use crate::units::{deg_to_compass, get_temperature_letter, get_windspeed_abbreviation, UnitSystem};

const DEGREE: char = '\u{b0}';

/// Number of sub windows on the daily and hourly pages
const SUBWINDOWS: usize = 4;

/// Available layouts, shown in configured order
#[derive(Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    Current,
    Daily,
    Hourly,
    Info,
}

/// Implementation of the Display Trait for pretty print
impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Page::Current => write!(f, "Current"),
            Page::Daily   => write!(f, "Daily"),
            Page::Hourly  => write!(f, "Hourly"),
            Page::Info    => write!(f, "Info"),
        }
    }
}

/// One of the small forecast boxes at the bottom of the daily and hourly pages
#[derive(Clone, Debug, PartialEq)]
pub struct SubWindow {
    pub caption: String,
    pub temperature: String,
    pub precip: String,
    pub icon_path: String,
}

/// Everything a renderer needs to draw one page, already formatted
#[derive(Clone, Debug, PartialEq)]
pub struct Screen {
    pub page: Page,
    pub clock: String,
    pub temperature: Option<String>,
    pub summary: Option<String>,
    pub conditions: Vec<(String, String)>,
    pub umbrella: Option<String>,
    pub subwindows: Vec<SubWindow>,
    pub lines: Vec<String>,
}

impl Screen {
    fn empty(page: Page, clock: String) -> Screen {
        Screen {
            page,
            clock,
            temperature: None,
            summary: None,
            conditions: Vec::new(),
            umbrella: None,
            subwindows: Vec::new(),
            lines: Vec::new(),
        }
    }
}

/// Builds page view models from a forecast
pub struct PageBuilder {
    units: UnitSystem,
    icon_size: String,
}

impl PageBuilder {
    /// Returns a new PageBuilder
    ///
    /// # Arguments
    ///
    /// * 'units' - unit system the forecast is expressed in
    /// * 'icon_size' - icon set directory name, e.g. "64"
    pub fn new(units: UnitSystem, icon_size: &str) -> PageBuilder {
        PageBuilder { units, icon_size: icon_size.to_string() }
    }

    /// Builds the view model for a page
    ///
    /// # Arguments
    ///
    /// * 'page' - the page to build
    /// * 'forecast' - the forecast and its derived facts
    /// * 'last_fetch' - time of the last fetch attempt
    /// * 'now' - the current instant
    pub fn build(&self, page: Page, forecast: &Forecast, last_fetch: Option<DateTime<Local>>, now: DateTime<Local>) -> Screen {
        match page {
            Page::Current => self.current(page, forecast, now),
            Page::Daily => {
                let mut screen = self.current(page, forecast, now);
                screen.subwindows = self.daily_subwindows(&forecast.snapshot.daily);
                screen
            }
            Page::Hourly => {
                let mut screen = self.current(page, forecast, now);
                screen.subwindows = self.hourly_subwindows(&forecast.snapshot.hourly);
                screen
            }
            Page::Info => self.info(forecast, last_fetch, now),
        }
    }

    fn current(&self, page: Page, forecast: &Forecast, now: DateTime<Local>) -> Screen {
        let currently = &forecast.snapshot.currently;
        let mut screen = Screen::empty(page, now.format("%a, %b %d   %I:%M %p").to_string());

        let wind_direction = currently.wind_bearing
            .map(|b| format!("{} @ ", deg_to_compass(b)))
            .unwrap_or_default();
        let wind = format!("{}{} {}",
                           wind_direction,
                           currently.wind_speed.round_ties_even() as i64,
                           get_windspeed_abbreviation(self.units));

        screen.temperature = Some(self.temperature(currently.temperature));
        screen.summary = Some(currently.summary.clone());
        screen.conditions = vec![
            ("Feels Like:".to_string(), self.temperature(currently.apparent_temperature)),
            ("Wind:".to_string(), wind),
            ("Humidity:".to_string(), percent(currently.humidity)),
        ];
        screen.umbrella = Some(if forecast.derived.take_umbrella {
            "Grab your umbrella!".to_string()
        } else {
            "No umbrella needed today.".to_string()
        });

        screen
    }

    fn daily_subwindows(&self, daily: &[DailyEntry]) -> Vec<SubWindow> {
        daily.iter()
            .take(SUBWINDOWS)
            .enumerate()
            .map(|(i, d)| SubWindow {
                caption: if i == 0 { "Today".to_string() } else { d.time.format("%A").to_string() },
                temperature: format!("{}{} / {}",
                                     d.temperature_low.round_ties_even() as i64,
                                     DEGREE,
                                     self.temperature(d.temperature_high)),
                precip: percent(d.precip_probability),
                icon_path: icon_mapping(&d.icon, &self.icon_size),
            })
            .collect()
    }

    fn hourly_subwindows(&self, hourly: &[HourlyEntry]) -> Vec<SubWindow> {
        hourly.iter()
            .take(SUBWINDOWS)
            .map(|h| SubWindow {
                caption: hour_caption(h.time),
                temperature: self.temperature(h.temperature),
                precip: percent(h.precip_probability),
                icon_path: icon_mapping(&h.icon, &self.icon_size),
            })
            .collect()
    }

    fn info(&self, forecast: &Forecast, last_fetch: Option<DateTime<Local>>, now: DateTime<Local>) -> Screen {
        let mut screen = Screen::empty(Page::Info, now.format("%I:%M %p").to_string());

        screen.lines.push("A weather rock powered by Dark Sky".to_string());
        screen.lines.push(format!("Sunrise: {}", forecast.derived.sunrise_label));
        screen.lines.push(format!("Sunset:  {}", forecast.derived.sunset_label));

        if let Some(daylight) = daylight(&forecast.snapshot, now) {
            let (day_hrs, day_mins) = hours_minutes(daylight.day_length);
            screen.lines.push(format!("Daylight: {} hrs {:02} min", day_hrs, day_mins));

            if daylight.in_daylight {
                let (hrs, mins) = hours_minutes(daylight.until_sunset);
                screen.lines.push(format!("Sunset in {} hrs {:02} min", hrs, mins));
            } else {
                let (hrs, mins) = hours_minutes(daylight.until_sunrise);
                screen.lines.push(format!("Sunrise in {} hrs {:02} min", hrs, mins));
            }
        }

        if let Some(checked) = last_fetch {
            screen.lines.push("Weather checked at".to_string());
            screen.lines.push(format!("    {}", checked.format("%I:%M:%S %p %Z on %a. %d %b %Y")));
        }

        screen
    }

    fn temperature(&self, value: f64) -> String {
        format!("{}{}{}", value.round_ties_even() as i64, DEGREE, get_temperature_letter(self.units))
    }
}

fn percent(fraction: f64) -> String {
    format!("{}%", (fraction * 100.0).round_ties_even() as i64)
}

/// Hour caption like "3 p.m."
///
/// # Arguments
///
/// * 'time' - the hour to caption
fn hour_caption(time: DateTime<Local>) -> String {
    let ampm = if time.hour() <= 11 { "a.m." } else { "p.m." };
    let (_, hour12) = time.hour12();

    format!("{} {}", hour12, ampm)
}

/// Maps a provider icon name to an icon file, unknown names get the unknown icon
///
/// # Arguments
///
/// * 'icon' - provider icon name, e.g. "partly-cloudy-day"
/// * 'size' - icon set directory name
pub fn icon_mapping(icon: &str, size: &str) -> String {
    let file = match icon {
        "clear-day"           => "clear",
        "clear-night"         => "nt_clear",
        "rain"                => "rain",
        "snow"                => "snow",
        "sleet"               => "sleet",
        "wind"                => return format!("icons/alt_icons/{}/wind.png", size),
        "fog"                 => "fog",
        "cloudy"              => "cloudy",
        "partly-cloudy-day"   => "partlycloudy",
        "partly-cloudy-night" => "nt_partlycloudy",
        _                     => "unknown",
    };

    format!("icons/{}/{}.png", size, file)
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;
    use super::*;
    use crate::derived::evaluate;
    use crate::models::forecast::fixtures::{at, snapshot};

    fn forecast(now: DateTime<Local>) -> Forecast {
        let snapshot = snapshot();
        let derived = evaluate(&snapshot, now).unwrap();
        Forecast { snapshot, derived }
    }

    #[test]
    fn current_page_conditions() {
        let now = at(12, 0);
        let screen = PageBuilder::new(UnitSystem::Us, "64").build(Page::Current, &forecast(now), None, now);

        assert_eq!(screen.temperature.as_deref(), Some("18°F"));
        assert_eq!(screen.conditions[0], ("Feels Like:".to_string(), "16°F".to_string()));
        assert_eq!(screen.conditions[1].1, "NNE @ 4 mph");
        assert_eq!(screen.conditions[2].1, "63%");
        assert_eq!(screen.umbrella.as_deref(), Some("No umbrella needed today."));
        assert!(screen.subwindows.is_empty());
    }

    #[test]
    fn missing_bearing_drops_direction_only() {
        let now = at(12, 0);
        let mut forecast = forecast(now);
        forecast.snapshot.currently.wind_bearing = None;
        let screen = PageBuilder::new(UnitSystem::Si, "64").build(Page::Current, &forecast, None, now);

        assert_eq!(screen.conditions[1].1, "4 mps");
    }

    #[test]
    fn daily_page_starts_with_today() {
        let now = at(12, 0);
        let screen = PageBuilder::new(UnitSystem::Si, "128").build(Page::Daily, &forecast(now), None, now);

        let captions: Vec<&str> = screen.subwindows.iter().map(|s| s.caption.as_str()).collect();
        assert_eq!(captions, vec!["Today", "Thursday", "Friday", "Saturday"]);
        assert_eq!(screen.subwindows[0].temperature, "12° / 21°C");
        assert_eq!(screen.subwindows[0].precip, "10%");
        assert_eq!(screen.subwindows[0].icon_path, "icons/128/partlycloudy.png");
    }

    #[test]
    fn hourly_page_captions() {
        let now = at(12, 0);
        let mut forecast = forecast(now);
        forecast.snapshot.hourly = forecast.snapshot.hourly.split_off(11);
        let screen = PageBuilder::new(UnitSystem::Si, "64").build(Page::Hourly, &forecast, None, now);

        let captions: Vec<&str> = screen.subwindows.iter().map(|s| s.caption.as_str()).collect();
        assert_eq!(captions, vec!["11 a.m.", "12 p.m.", "1 p.m.", "2 p.m."]);
        assert_eq!(screen.subwindows[0].temperature, "15°C");
    }

    #[test]
    fn info_page_lines() {
        let now = at(19, 30);
        let last_fetch = now - TimeDelta::minutes(3);
        let screen = PageBuilder::new(UnitSystem::Si, "64").build(Page::Info, &forecast(now), Some(last_fetch), now);

        assert_eq!(screen.lines[1], "Sunrise: 05:00 AM today");
        assert_eq!(screen.lines[2], "Sunset:  09:00 PM tonight");
        assert_eq!(screen.lines[3], "Daylight: 16 hrs 00 min");
        assert_eq!(screen.lines[4], "Sunset in 1 hrs 30 min");
        assert_eq!(screen.lines[5], "Weather checked at");
        assert_eq!(screen.clock, "07:30 PM");
    }

    #[test]
    fn halves_round_to_even() {
        let now = at(12, 0);
        let mut forecast = forecast(now);
        forecast.snapshot.currently.temperature = 2.5;
        forecast.snapshot.currently.apparent_temperature = 3.5;
        forecast.snapshot.currently.humidity = 0.125;
        let screen = PageBuilder::new(UnitSystem::Si, "64").build(Page::Current, &forecast, None, now);

        assert_eq!(screen.temperature.as_deref(), Some("2°C"));
        assert_eq!(screen.conditions[0].1, "4°C");
        assert_eq!(screen.conditions[2].1, "12%");
    }

    #[test]
    fn icons() {
        assert_eq!(icon_mapping("wind", "64"), "icons/alt_icons/64/wind.png");
        assert_eq!(icon_mapping("clear-night", "64"), "icons/64/nt_clear.png");
        assert_eq!(icon_mapping("hail", "256"), "icons/256/unknown.png");
    }
}
