//! CSV flight recorder.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Duration;

use crate::{SessionResult, TickReport, TickSink};

/// Header row of the telemetry CSV.
pub const CSV_HEADER: &str = "Time(s),N1(RPM),N2(RPM),EGT1(C),EGT2(C),Fuel_Flow,Fuel_Quantity";

/// Message logged when auto-protection stops the engines.
pub const AUTO_SHUTDOWN_MESSAGE: &str = "SYSTEM: AUTO SHUTDOWN TRIGGERED";

/// Minimum gap between two log lines carrying the same alert message.
pub const ALERT_REPEAT_INTERVAL: Duration = Duration::from_secs(5);

/// Writes one telemetry row per tick plus interleaved alert lines.
///
/// Telemetry rows carry the observed readings with three decimals. Alert
/// lines look like `ALERT,12.3,MESSAGE:,CAUTION: LOW FUEL QTY`; the same
/// message is not repeated within [`ALERT_REPEAT_INTERVAL`].
#[derive(Debug)]
pub struct CsvRecorder<W: Write> {
    out: W,
    last_alert: HashMap<&'static str, Duration>,
    rows: u64,
    alerts: u64,
}

impl CsvRecorder<BufWriter<File>> {
    /// Create (or truncate) `path` and write the header.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written.
    pub fn create(path: &Path) -> SessionResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        tracing::info!(path = %path.display(), "Recording flight log");
        Self::new(BufWriter::new(file))
    }
}

impl<W: Write> CsvRecorder<W> {
    /// Wrap `out` and write the header.
    ///
    /// # Errors
    ///
    /// Returns an error if the header cannot be written.
    pub fn new(mut out: W) -> SessionResult<Self> {
        writeln!(out, "{CSV_HEADER}")?;
        Ok(Self {
            out,
            last_alert: HashMap::new(),
            rows: 0,
            alerts: 0,
        })
    }

    /// Append one alert line unless the same message was logged recently.
    ///
    /// Returns whether the line was written.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn log_alert(&mut self, time: Duration, message: &'static str) -> SessionResult<bool> {
        if message.is_empty() {
            return Ok(false);
        }
        if let Some(&last) = self.last_alert.get(message)
            && time.saturating_sub(last) < ALERT_REPEAT_INTERVAL
        {
            return Ok(false);
        }
        self.last_alert.insert(message, time);
        writeln!(self.out, "ALERT,{:.1},MESSAGE:,{message}", time.as_secs_f64())?;
        self.alerts = self.alerts.saturating_add(1);
        Ok(true)
    }

    /// Telemetry rows written.
    pub fn rows(&self) -> u64 {
        self.rows
    }

    /// Alert lines written.
    pub fn alerts(&self) -> u64 {
        self.alerts
    }

    /// Flush and return the underlying writer.
    ///
    /// # Errors
    ///
    /// Returns an error if the flush fails.
    pub fn finish(mut self) -> SessionResult<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

impl<W: Write> TickSink for CsvRecorder<W> {
    fn record(&mut self, report: &TickReport) -> SessionResult<()> {
        let o = &report.observed;
        writeln!(
            self.out,
            "{:.3},{:.3},{:.3},{:.3},{:.3},{:.3},{:.3}",
            report.time.as_secs_f64(),
            o.rpm_left,
            o.rpm_right,
            o.egt_left,
            o.egt_right,
            o.fuel_flow,
            o.fuel_quantity
        )?;
        self.rows = self.rows.saturating_add(1);

        if report.auto_shutdown {
            self.log_alert(report.time, AUTO_SHUTDOWN_MESSAGE)?;
        }
        for condition in &report.visible {
            self.log_alert(report.time, condition.message())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn test_header_written_on_creation() -> TestResult {
        let recorder = CsvRecorder::new(Vec::new())?;
        let text = String::from_utf8(recorder.finish()?)?;
        assert_eq!(text, format!("{CSV_HEADER}\n"));
        Ok(())
    }

    #[test]
    fn test_alert_repeats_are_suppressed_for_five_seconds() -> TestResult {
        let mut recorder = CsvRecorder::new(Vec::new())?;
        let msg = "CAUTION: LOW FUEL QTY";
        assert!(recorder.log_alert(Duration::from_millis(1_000), msg)?);
        assert!(!recorder.log_alert(Duration::from_millis(5_995), msg)?);
        assert!(recorder.log_alert(Duration::from_millis(6_000), msg)?);
        assert!(recorder.log_alert(Duration::from_millis(6_000), "WARNING: ENG OVERSPEED")?);
        assert!(!recorder.log_alert(Duration::from_millis(7_000), "")?);

        let text = String::from_utf8(recorder.finish()?)?;
        insta::assert_snapshot!(text.trim_end(), @r"
        Time(s),N1(RPM),N2(RPM),EGT1(C),EGT2(C),Fuel_Flow,Fuel_Quantity
        ALERT,1.0,MESSAGE:,CAUTION: LOW FUEL QTY
        ALERT,6.0,MESSAGE:,CAUTION: LOW FUEL QTY
        ALERT,6.0,MESSAGE:,WARNING: ENG OVERSPEED
        ");
        Ok(())
    }
}
