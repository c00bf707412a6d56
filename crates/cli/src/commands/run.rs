//! Headless scenario runs

use anyhow::Result;
use serde::Serialize;
use twinjet_faults::SeverityBand;
use twinjet_session::{
    CsvRecorder, Scenario, ScenarioSummary, Session, SessionConfig, SessionResult, TickReport,
    TickSink,
};
use twinjet_sim::LifecycleState;

use crate::commands::RunArgs;
use crate::error::CliError;
use crate::output;

/// One line of the printed alert timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TimelineEvent {
    State {
        time_secs: f64,
        from: LifecycleState,
        to: LifecycleState,
    },
    Raised {
        time_secs: f64,
        code: &'static str,
        band: SeverityBand,
        message: &'static str,
    },
    Expired {
        time_secs: f64,
        code: &'static str,
    },
    AutoShutdown {
        time_secs: f64,
    },
}

/// Collects state changes and alert edges from a run.
#[derive(Debug, Default)]
pub struct Timeline {
    last_state: LifecycleState,
    events: Vec<TimelineEvent>,
}

impl Timeline {
    pub fn events(&self) -> &[TimelineEvent] {
        &self.events
    }
}

impl TickSink for Timeline {
    fn record(&mut self, report: &TickReport) -> SessionResult<()> {
        let time_secs = report.time.as_secs_f64();
        if report.auto_shutdown {
            self.events.push(TimelineEvent::AutoShutdown { time_secs });
        }
        if report.state != self.last_state {
            self.events.push(TimelineEvent::State {
                time_secs,
                from: self.last_state,
                to: report.state,
            });
            self.last_state = report.state;
        }
        for condition in &report.expired {
            self.events.push(TimelineEvent::Expired {
                time_secs,
                code: condition.code(),
            });
        }
        for condition in &report.raised {
            self.events.push(TimelineEvent::Raised {
                time_secs,
                code: condition.code(),
                band: condition.band(),
                message: condition.message(),
            });
        }
        Ok(())
    }
}

/// Execute the run command
pub fn execute(args: &RunArgs, json: bool) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => SessionConfig::load(path)
            .map_err(|e| CliError::InvalidConfiguration(format!("{}: {e}", path.display())))?,
        None => SessionConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if args.no_protection {
        config.auto_protection = false;
    }

    let scenario = Scenario::load(&args.scenario).map_err(|e| {
        CliError::InvalidScenario(format!("{}: {e}", args.scenario.display()))
    })?;
    let mut session =
        Session::new(&config).map_err(|e| CliError::InvalidConfiguration(e.to_string()))?;

    let mut timeline = Timeline::default();
    let mut recorder = match &args.csv {
        Some(path) => Some(CsvRecorder::create(path).map_err(CliError::Run)?),
        None => None,
    };

    let sink = (&mut timeline, &mut recorder);
    let summary = if args.realtime {
        session.run_scenario_paced(&scenario, sink, config.step())
    } else {
        session.run_scenario(&scenario, sink)
    }
    .map_err(CliError::Run)?;

    if let (Some(recorder), Some(path)) = (recorder, &args.csv) {
        let rows = recorder.rows();
        recorder.finish().map_err(CliError::Run)?;
        tracing::info!(path = %path.display(), rows, "Flight log written");
    }

    output::print_run_summary(&summary, timeline.events(), json)?;

    if args.strict && !summary.auto_shutdowns.is_empty() {
        return Err(CliError::AutoShutdown(summary.auto_shutdowns.len()).into());
    }
    Ok(())
}

/// Seconds with millisecond resolution, for display.
pub fn format_time(time_secs: f64) -> String {
    format!("{time_secs:>8.3}s")
}

/// Whether the run ended with the engines at rest.
pub fn ended_at_rest(summary: &ScenarioSummary) -> bool {
    summary.final_state == LifecycleState::Off
}

#[cfg(test)]
mod tests {
    use super::*;
    use twinjet_faults::FaultCondition;
    use twinjet_session::NullSink;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn timeline_records_edges_and_shutdown() -> TestResult {
        let scenario = Scenario::from_yaml_str(
            "name: t\nduration_secs: 9.0\nevents:\n  - { at_secs: 0.0, command: start }\n  - { at_secs: 8.0, command: { inject: SENSOR_ALL } }\n",
        )?;
        let config = SessionConfig {
            seed: Some(1),
            ..SessionConfig::default()
        };
        let mut timeline = Timeline::default();
        Session::new(&config)?.run_scenario(&scenario, (&mut timeline, NullSink))?;

        let events = timeline.events();
        assert!(matches!(
            events.first(),
            Some(TimelineEvent::State {
                to: LifecycleState::Starting,
                ..
            })
        ));
        assert!(events.iter().any(|e| matches!(
            e,
            TimelineEvent::Raised { code, .. } if *code == FaultCondition::SensorAll.code()
        )));
        assert!(
            events
                .iter()
                .any(|e| matches!(e, TimelineEvent::AutoShutdown { .. }))
        );
        assert!(events.iter().any(|e| matches!(
            e,
            TimelineEvent::State {
                to: LifecycleState::Stopping,
                ..
            }
        )));
        Ok(())
    }

    #[test]
    fn timeline_serializes_with_event_tag() -> TestResult {
        let event = TimelineEvent::AutoShutdown { time_secs: 8.005 };
        let value = serde_json::to_value(&event)?;
        assert_eq!(
            value.get("event").and_then(serde_json::Value::as_str),
            Some("auto_shutdown")
        );
        Ok(())
    }

    #[test]
    fn format_time_pads() {
        assert_eq!(format_time(8.005), "   8.005s");
    }
}
