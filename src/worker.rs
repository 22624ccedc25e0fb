use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;
use chrono::{DateTime, Local, TimeDelta};
use log::{debug, info, warn};
use crate::cache::{ForecastCache, ForecastSource};
use crate::config::DisplayParameters;
use crate::display::Renderer;
use crate::errors::DisplayError;
use crate::pages::{Page, PageBuilder};

/// How often the stop flag and the page timer are checked
const TICK: Duration = Duration::from_millis(250);

/// Cycles through the configured pages, making sure the forecast is fresh before each one
pub struct Worker<S: ForecastSource, R: Renderer> {
    cache: ForecastCache<S>,
    renderer: R,
    builder: PageBuilder,
    pages: Vec<Page>,
    page_time: TimeDelta,
    next_page: usize,
}

impl<S: ForecastSource, R: Renderer> Worker<S, R> {
    /// Returns a new Worker
    ///
    /// # Arguments
    ///
    /// * 'cache' - the forecast cache
    /// * 'renderer' - where pages are drawn
    /// * 'builder' - page view model builder
    /// * 'display' - display section of the configuration
    pub fn new(cache: ForecastCache<S>, renderer: R, builder: PageBuilder, display: &DisplayParameters) -> Self {
        Self {
            cache,
            renderer,
            builder,
            pages: display.pages.clone(),
            page_time: TimeDelta::seconds(display.page_secs.min(86_400) as i64),
            next_page: 0,
        }
    }

    /// Runs until the stop flag is raised
    ///
    /// # Arguments
    ///
    /// * 'stop' - set by the signal handler
    pub fn run(&mut self, stop: &AtomicBool) -> Result<(), DisplayError> {
        let mut last_render: Option<DateTime<Local>> = None;

        while !stop.load(Ordering::SeqCst) {
            let local_now = Local::now();

            if last_render.is_none_or(|t| local_now - t >= self.page_time) {
                if let Err(e) = self.cache.ensure_fresh() {
                    debug!("drawing from held forecast, if any, after: {}", e);
                }
                self.draw(local_now)?;
                last_render = Some(local_now);
            }

            thread::sleep(TICK);
        }

        info!("stop signal received, exiting");
        Ok(())
    }

    /// Draws the next page from whatever forecast the cache holds
    ///
    /// Fetch errors are already logged by the cache, here they only mean that an
    /// older forecast, or none, is shown.
    ///
    /// # Arguments
    ///
    /// * 'now' - the current instant
    fn draw(&mut self, now: DateTime<Local>) -> Result<(), DisplayError> {
        match self.cache.current() {
            Some(forecast) => {
                let page = self.pages[self.next_page % self.pages.len()];
                let screen = self.builder.build(page, forecast, self.cache.last_fetch(), now);
                self.renderer.render(&screen)?;
                self.next_page = (self.next_page + 1) % self.pages.len();
            }
            None => {
                warn!("no forecast available yet, skipping page");
                self.renderer.render_unavailable(now)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FetchError;
    use crate::models::forecast::fixtures::{at, snapshot};
    use crate::models::forecast::ForecastSnapshot;
    use crate::pages::Screen;
    use crate::units::UnitSystem;

    struct Flaky {
        ok: bool,
    }

    impl ForecastSource for Flaky {
        fn fetch(&mut self) -> Result<ForecastSnapshot, FetchError> {
            if self.ok { Ok(snapshot()) } else { Err(FetchError::Unreachable("timeout".to_string())) }
        }
    }

    #[derive(Default)]
    struct Recorder {
        pages: Vec<Page>,
        unavailable: usize,
    }

    impl Renderer for Recorder {
        fn render(&mut self, screen: &Screen) -> Result<(), DisplayError> {
            self.pages.push(screen.page);
            Ok(())
        }

        fn render_unavailable(&mut self, _now: DateTime<Local>) -> Result<(), DisplayError> {
            self.unavailable += 1;
            Ok(())
        }
    }

    fn display() -> DisplayParameters {
        DisplayParameters {
            width: 480,
            height: 320,
            icon_size: "64".to_string(),
            page_secs: 10,
            pages: vec![Page::Daily, Page::Hourly, Page::Info],
        }
    }

    fn frame(worker: &mut Worker<Flaky, Recorder>, now: DateTime<Local>) {
        let _ = worker.cache.ensure_fresh_at(now);
        worker.draw(now).unwrap();
    }

    fn worker(ok: bool) -> Worker<Flaky, Recorder> {
        Worker::new(
            ForecastCache::new(Flaky { ok }, 300),
            Recorder::default(),
            PageBuilder::new(UnitSystem::Si, "64"),
            &display(),
        )
    }

    #[test]
    fn cycles_pages_in_order() {
        let mut worker = worker(true);

        for m in 0..4 {
            frame(&mut worker, at(12, m));
        }

        assert_eq!(worker.renderer.pages, vec![Page::Daily, Page::Hourly, Page::Info, Page::Daily]);
    }

    #[test]
    fn skips_pages_until_forecast_available() {
        let mut worker = worker(false);

        frame(&mut worker, at(12, 0));
        frame(&mut worker, at(12, 1));

        assert_eq!(worker.renderer.unavailable, 2);
        assert!(worker.renderer.pages.is_empty());
    }

    #[test]
    fn stops_when_flag_is_raised() {
        let mut worker = worker(true);
        let stop = AtomicBool::new(true);

        worker.run(&stop).unwrap();

        assert!(worker.renderer.pages.is_empty());
    }
}
