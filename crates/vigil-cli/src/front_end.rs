//! Console front end that prints watcher alerts.

use colored::*;
use parking_lot::Mutex;
use std::io::{self, Write};
use vigil_domain::{Color, ColorRef, FrontEnd, FrontEndError};

/// Build the line printed for an alert.
pub fn alert_message(value: &str, kind: &str) -> String {
    format!("{} is not an allowed {}", value, kind)
}

/// Front end writing one line per alert to a shared sink.
///
/// Alerts arrive on the watcher thread, so the sink sits behind a lock.
pub struct ConsoleFrontEnd<W: Write + Send = io::Stdout> {
    reference: Color,
    color_enabled: bool,
    sink: Mutex<W>,
}

impl ConsoleFrontEnd<io::Stdout> {
    /// Print alerts to standard output.
    pub fn stdout(reference: Color, color_enabled: bool) -> Self {
        Self::new(reference, color_enabled, io::stdout())
    }
}

impl<W: Write + Send> ConsoleFrontEnd<W> {
    /// Print alerts to `sink`.
    pub fn new(reference: Color, color_enabled: bool, sink: W) -> Self {
        Self {
            reference,
            color_enabled,
            sink: Mutex::new(sink),
        }
    }

    /// Consume the front end and return its sink.
    pub fn into_sink(self) -> W {
        self.sink.into_inner()
    }

    fn emit(&self, value: &str, kind: &str) {
        let line = alert_message(value, kind);
        let line = if self.color_enabled {
            line.yellow().to_string()
        } else {
            line
        };

        let mut sink = self.sink.lock();
        if let Err(e) = writeln!(sink, "{}", line).and_then(|_| sink.flush()) {
            tracing::warn!("Failed to print alert: {}", e);
        }
    }
}

impl<W: Write + Send> FrontEnd for ConsoleFrontEnd<W> {
    fn reference_color(&self) -> Result<ColorRef, FrontEndError> {
        Ok(self.reference.into_ref())
    }

    fn on_alert_integer(&self, value: i32) {
        self.emit(&value.to_string(), "integer");
    }

    fn on_alert_string(&self, value: &str) {
        self.emit(value, "string");
    }

    fn on_alert_color(&self, value: &ColorRef) {
        self.emit(&value.to_string(), "color");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn printed(front_end: ConsoleFrontEnd<Vec<u8>>) -> String {
        String::from_utf8(front_end.into_sink()).unwrap()
    }

    #[test]
    fn test_alert_lines() {
        let front_end = ConsoleFrontEnd::new(Color::rgb(255, 255, 255), false, Vec::new());
        front_end.on_alert_integer(1500);
        front_end.on_alert_string("pear");
        front_end.on_alert_color(&Color::rgb(255, 255, 255).into_ref());

        assert_eq!(
            printed(front_end),
            "1500 is not an allowed integer\n\
             pear is not an allowed string\n\
             #FFFFFF is not an allowed color\n"
        );
    }

    #[test]
    fn test_reference_color_is_configured_color() {
        let red = Color::rgb(255, 0, 0);
        let front_end = ConsoleFrontEnd::new(red, false, Vec::new());
        assert_eq!(*front_end.reference_color().unwrap(), red);
    }
}
