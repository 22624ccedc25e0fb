use std::io::Write;
use chrono::{DateTime, Local};
use crate::errors::DisplayError;
use crate::pages::Screen;

/// The rendering collaborator, draws prepared screens on whatever surface it owns
pub trait Renderer {
    /// Draws one page
    fn render(&mut self, screen: &Screen) -> Result<(), DisplayError>;

    /// Draws the placeholder shown until a first forecast has been fetched
    fn render_unavailable(&mut self, now: DateTime<Local>) -> Result<(), DisplayError>;
}

/// Renders screens as text blocks, one block per page switch
pub struct ConsoleRenderer<W: Write> {
    out: W,
    width: usize,
}

impl<W: Write> ConsoleRenderer<W> {
    /// Returns a new ConsoleRenderer
    ///
    /// # Arguments
    ///
    /// * 'out' - where to write
    /// * 'width' - width of the caption line in characters
    pub fn new(out: W, width: usize) -> Self {
        Self { out, width }
    }

    fn caption(&mut self, caption: &str) -> Result<(), DisplayError> {
        writeln!(self.out, "{:=<width$}", format!("{} ", caption), width = self.width)?;
        Ok(())
    }
}

impl<W: Write> Renderer for ConsoleRenderer<W> {
    fn render(&mut self, screen: &Screen) -> Result<(), DisplayError> {
        self.caption(&format!("{} {}", screen.clock, screen.page))?;

        if let Some(temperature) = &screen.temperature {
            writeln!(self.out, "{}", temperature)?;
        }
        if let Some(summary) = &screen.summary {
            writeln!(self.out, "{}", summary)?;
        }
        for (label, value) in &screen.conditions {
            writeln!(self.out, "{:<12}{}", label, value)?;
        }
        if let Some(umbrella) = &screen.umbrella {
            writeln!(self.out, "{}", umbrella)?;
        }
        for s in &screen.subwindows {
            writeln!(self.out, "{:<10} {:>12} {:>5}  {}", s.caption, s.temperature, s.precip, s.icon_path)?;
        }
        for line in &screen.lines {
            writeln!(self.out, "{}", line)?;
        }

        self.out.flush()?;
        Ok(())
    }

    fn render_unavailable(&mut self, now: DateTime<Local>) -> Result<(), DisplayError> {
        self.caption(&now.format("%a, %b %d   %I:%M %p").to_string())?;
        writeln!(self.out, "Waiting for forecast...")?;

        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::{Page, SubWindow};

    #[test]
    fn renders_blocks() {
        let screen = Screen {
            page: Page::Hourly,
            clock: "Wed, Jun 12   12:00 PM".to_string(),
            temperature: Some("18°C".to_string()),
            summary: None,
            conditions: vec![("Humidity:".to_string(), "63%".to_string())],
            umbrella: Some("Grab your umbrella!".to_string()),
            subwindows: vec![SubWindow {
                caption: "1 p.m.".to_string(),
                temperature: "15°C".to_string(),
                precip: "40%".to_string(),
                icon_path: "icons/64/rain.png".to_string(),
            }],
            lines: Vec::new(),
        };

        let mut out: Vec<u8> = Vec::new();
        ConsoleRenderer::new(&mut out, 40).render(&screen).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0].chars().count(), 40);
        assert!(lines[0].starts_with("Wed, Jun 12   12:00 PM Hourly ="));
        assert_eq!(lines[1], "18°C");
        assert_eq!(lines[2], "Humidity:   63%");
        assert_eq!(lines[3], "Grab your umbrella!");
        assert!(lines[4].starts_with("1 p.m."));
        assert!(lines[4].ends_with("icons/64/rain.png"));
    }
}
