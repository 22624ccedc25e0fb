use std::env;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use anyhow::{Context, Result};
use log::info;
use crate::cache::ForecastCache;
use crate::config::load_config;
use crate::display::ConsoleRenderer;
use crate::logging::setup_logger;
use crate::manager_darksky::DarkSky;
use crate::pages::PageBuilder;
use crate::worker::Worker;

mod cache;
mod config;
mod derived;
mod display;
mod errors;
mod logging;
mod manager_darksky;
mod models;
mod pages;
mod units;
mod worker;

/// Width of the caption line written by the console renderer
const CONSOLE_WIDTH: usize = 80;

fn main() -> Result<()> {
    let config_path = env::args()
        .nth(1)
        .or_else(|| env::var("CONFIG_FILE").ok())
        .context("usage: weatherrock <config file>, or set CONFIG_FILE")?;

    let config = load_config(&config_path)
        .with_context(|| format!("error loading config {}", config_path))?;
    let _handle = setup_logger(&config.general)?;

    info!("weatherrock version: {}", env!("CARGO_PKG_VERSION"));
    info!("display {}x{}, pages {:?}", config.display.width, config.display.height, config.display.pages);

    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop = stop.clone();
        ctrlc::set_handler(move || stop.store(true, Ordering::SeqCst))?;
    }

    let cache = ForecastCache::new(DarkSky::new(&config.weather), config.weather.update_freq);
    info!("forecast refreshed at most every {} s", cache.refresh_interval().num_seconds());
    let renderer = ConsoleRenderer::new(io::stdout(), CONSOLE_WIDTH);
    let builder = PageBuilder::new(config.weather.units, &config.display.icon_size);

    let mut worker = Worker::new(cache, renderer, builder, &config.display);
    worker.run(&stop)?;

    Ok(())
}
