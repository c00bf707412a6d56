//! The per-tick pipeline: physics, alerting, auto-protection.

use std::time::Duration;

use twinjet_eicas::{ConditionSet, Eicas, first_critical};
use twinjet_faults::FaultCondition;
use twinjet_sim::{LifecycleState, PhysicsSimulator};
use twinjet_timing::{FixedStepAccumulator, WallClock};

use crate::{Command, Scenario, SessionConfig, SessionResult, TickReport, TickSink};

/// An alert rising edge seen during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RaisedAlert {
    /// Simulation time of the edge.
    pub time: Duration,
    /// Condition raised.
    pub condition: FaultCondition,
}

/// Outcome of [`Session::run_scenario`].
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioSummary {
    /// Scenario name.
    pub name: String,
    /// Ticks executed.
    pub ticks: u64,
    /// Lifecycle state when the run ended.
    pub final_state: LifecycleState,
    /// Simulation time when the run ended.
    pub final_time: Duration,
    /// Every rising edge, in order.
    pub raised: Vec<RaisedAlert>,
    /// Times at which auto-protection stopped the engines.
    pub auto_shutdowns: Vec<Duration>,
}

/// Bookkeeping shared by the scenario runners.
#[derive(Debug)]
struct ScenarioRun {
    name: String,
    origin: Duration,
    end: Duration,
    timeline: Vec<(Duration, Command)>,
    next_event: usize,
    ticks: u64,
    raised: Vec<RaisedAlert>,
    auto_shutdowns: Vec<Duration>,
}

impl ScenarioRun {
    fn new(scenario: &Scenario, origin: Duration) -> SessionResult<Self> {
        scenario.validate()?;
        let end = origin.saturating_add(scenario.duration()?);
        tracing::info!(name = %scenario.name, ?end, "Running scenario");
        Ok(Self {
            name: scenario.name.clone(),
            origin,
            end,
            timeline: scenario.timeline()?,
            next_event: 0,
            ticks: 0,
            raised: Vec::new(),
            auto_shutdowns: Vec::new(),
        })
    }

    fn apply_due(&mut self, session: &mut Session) {
        while let Some(&(at, command)) = self.timeline.get(self.next_event) {
            if self.origin.saturating_add(at) > session.now() {
                break;
            }
            session.apply(command);
            self.next_event = self.next_event.saturating_add(1);
        }
    }

    fn note(&mut self, report: &TickReport) {
        self.ticks = self.ticks.saturating_add(1);
        self.raised
            .extend(report.raised.iter().map(|&condition| RaisedAlert {
                time: report.time,
                condition,
            }));
        if report.auto_shutdown {
            self.auto_shutdowns.push(report.time);
        }
    }

    fn finish(self, session: &Session) -> ScenarioSummary {
        tracing::info!(
            name = %self.name,
            ticks = self.ticks,
            state = %session.sim.state(),
            alerts = self.raised.len(),
            "Scenario complete"
        );
        ScenarioSummary {
            name: self.name,
            ticks: self.ticks,
            final_state: session.sim.state(),
            final_time: session.now(),
            raised: self.raised,
            auto_shutdowns: self.auto_shutdowns,
        }
    }
}

/// Simulator, alerting and fixed-step clock wired together.
///
/// Commands take effect on the next tick. Each tick advances the simulator
/// by one fixed step, evaluates the observed data, updates the display
/// queue and, if enabled, stops the engines when a critical alert is
/// displayed while they are still under power.
#[derive(Debug)]
pub struct Session {
    sim: PhysicsSimulator,
    eicas: Eicas,
    timer: FixedStepAccumulator,
    auto_protection: bool,
    last_visible: ConditionSet,
}

impl Session {
    /// Build a session from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any layer of `config` is invalid.
    pub fn new(config: &SessionConfig) -> SessionResult<Self> {
        config.validate()?;
        let sim = match config.seed {
            Some(seed) => PhysicsSimulator::with_seed(config.sim.clone(), seed)?,
            None => PhysicsSimulator::new(config.sim.clone())?,
        };
        let eicas = Eicas::new(config.thresholds.clone(), config.display_window()?)?;
        tracing::debug!(
            step_ms = config.step_ms,
            seed = ?config.seed,
            auto_protection = config.auto_protection,
            "Session created"
        );
        Ok(Self {
            sim,
            eicas,
            timer: config.accumulator()?,
            auto_protection: config.auto_protection,
            last_visible: ConditionSet::new(),
        })
    }

    /// Deliver a command; it takes effect on the next tick.
    pub fn apply(&mut self, command: Command) {
        tracing::debug!(%command, now = ?self.now(), "Command");
        command.apply_to(&mut self.sim);
    }

    /// Run exactly one fixed tick, advancing the clock by one step.
    pub fn step(&mut self) -> TickReport {
        self.timer.advance_step();
        self.tick()
    }

    /// Run the pipeline for a step the clock has already advanced over.
    fn tick(&mut self) -> TickReport {
        let now = self.timer.sim_time();
        self.sim.tick(self.timer.step());

        let observed = *self.sim.observed();
        let output = self.eicas.process(&observed, self.sim.state(), now);

        let raised: ConditionSet = self
            .eicas
            .queue()
            .active()
            .iter()
            .filter(|alert| alert.raised_at == now)
            .map(|alert| alert.condition)
            .collect();
        let expired: ConditionSet = self
            .last_visible
            .iter()
            .copied()
            .filter(|c| !output.visible.contains(c))
            .collect();

        let auto_shutdown = self.auto_protection && output.requires_shutdown(self.sim.state());
        if auto_shutdown {
            tracing::warn!(
                fault = first_critical(&output.visible).as_ref().map(FaultCondition::code),
                ?now,
                "Critical alert, automatic shutdown"
            );
            self.sim.stop();
        }

        self.last_visible = output.visible.clone();
        TickReport {
            time: now,
            state: self.sim.state(),
            observed,
            raw: output.raw,
            visible: output.visible,
            raised,
            expired,
            stabilized: self.sim.is_stabilized(),
            auto_shutdown,
        }
    }

    /// Account for `elapsed` wall time and run every whole step it covers.
    ///
    /// Returns the number of ticks run.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by `sink`; later steps stay pending.
    pub fn advance_frame<S: TickSink>(
        &mut self,
        elapsed: Duration,
        mut sink: S,
    ) -> SessionResult<usize> {
        self.timer.push_frame(elapsed);
        let mut ticks = 0usize;
        while self.timer.consume_step() {
            let report = self.tick();
            sink.record(&report)?;
            ticks = ticks.saturating_add(1);
        }
        Ok(ticks)
    }

    /// Run `scenario` headlessly from the current time.
    ///
    /// Events fire at the first tick whose start time is at or after their
    /// offset, so a command at 0 s is seen by the very first tick.
    ///
    /// # Errors
    ///
    /// Returns an error if the scenario is invalid or `sink` fails.
    pub fn run_scenario<S: TickSink>(
        &mut self,
        scenario: &Scenario,
        mut sink: S,
    ) -> SessionResult<ScenarioSummary> {
        let mut run = ScenarioRun::new(scenario, self.now())?;
        while self.now() < run.end {
            run.apply_due(self);
            let report = self.step();
            run.note(&report);
            sink.record(&report)?;
        }
        Ok(run.finish(self))
    }

    /// Run `scenario` against the wall clock, sleeping `frame` between
    /// frames.
    ///
    /// Simulated time follows real time through the frame accumulator, so a
    /// stalled frame is clamped rather than replayed. Events are applied at
    /// frame boundaries.
    ///
    /// # Errors
    ///
    /// Returns an error if the scenario is invalid or `sink` fails.
    pub fn run_scenario_paced<S: TickSink>(
        &mut self,
        scenario: &Scenario,
        mut sink: S,
        frame: Duration,
    ) -> SessionResult<ScenarioSummary> {
        let mut run = ScenarioRun::new(scenario, self.now())?;
        let mut clock = WallClock::new();
        while self.now() < run.end {
            std::thread::sleep(frame);
            run.apply_due(self);
            let remaining = run.end.saturating_sub(self.now());
            self.timer.push_frame(clock.lap().min(remaining));
            while self.timer.consume_step() {
                let report = self.tick();
                run.note(&report);
                sink.record(&report)?;
            }
        }
        Ok(run.finish(self))
    }

    /// Simulation time of the last tick, as kept by the fixed-step clock.
    pub fn now(&self) -> Duration {
        self.timer.sim_time()
    }

    /// Simulator.
    pub fn sim(&self) -> &PhysicsSimulator {
        &self.sim
    }

    /// Alerting system.
    pub fn eicas(&self) -> &Eicas {
        &self.eicas
    }

    /// Fixed-step clock.
    pub fn timer(&self) -> &FixedStepAccumulator {
        &self.timer
    }

    /// Whether critical alerts stop the engines automatically.
    pub fn auto_protection(&self) -> bool {
        self.auto_protection
    }

    /// Enable or disable automatic shutdown.
    pub fn set_auto_protection(&mut self, enabled: bool) {
        self.auto_protection = enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NullSink;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    fn seeded(seed: u64) -> SessionResult<Session> {
        Session::new(&SessionConfig {
            seed: Some(seed),
            ..SessionConfig::default()
        })
    }

    #[test]
    fn test_step_advances_time_by_one_step() -> TestResult {
        let mut session = seeded(1)?;
        let report = session.step();
        assert_eq!(report.time, Duration::from_millis(5));
        assert_eq!(report.state, LifecycleState::Off);
        assert!(report.raw.is_empty());
        Ok(())
    }

    #[test]
    fn test_advance_frame_runs_whole_steps() -> TestResult {
        let mut session = seeded(2)?;
        let mut reports: Vec<TickReport> = Vec::new();
        assert_eq!(session.advance_frame(Duration::from_millis(12), &mut reports)?, 2);
        assert_eq!(session.advance_frame(Duration::from_millis(3), &mut reports)?, 1);
        assert_eq!(reports.len(), 3);
        assert_eq!(session.now(), Duration::from_millis(15));
        assert_eq!(session.timer().sim_time(), session.now());
        assert_eq!(session.timer().steps_consumed(), 3);
        Ok(())
    }

    #[test]
    fn test_headless_and_framed_ticks_share_one_clock() -> TestResult {
        let scenario = Scenario::from_yaml_str(
            "name: clock\nduration_secs: 0.5\nevents:\n  - { at_secs: 0.0, command: start }\n",
        )?;
        let mut session = seeded(7)?;
        let summary = session.run_scenario(&scenario, NullSink)?;
        assert_eq!(summary.final_time, Duration::from_millis(500));
        assert_eq!(session.now(), session.timer().sim_time());
        assert_eq!(session.timer().steps_consumed(), summary.ticks);

        session.advance_frame(Duration::from_millis(20), NullSink)?;
        assert_eq!(session.now(), Duration::from_millis(520));
        assert_eq!(session.now(), session.timer().sim_time());

        let report = session.step();
        assert_eq!(report.time, Duration::from_millis(525));
        assert_eq!(session.now(), session.timer().sim_time());
        Ok(())
    }

    #[test]
    fn test_oversized_frame_is_clamped() -> TestResult {
        let mut session = seeded(3)?;
        let ticks = session.advance_frame(Duration::from_secs(2), NullSink)?;
        assert_eq!(ticks, 50);
        assert_eq!(session.timer().clamped_frames(), 1);
        Ok(())
    }

    #[test]
    fn test_raised_and_expired_edges() -> TestResult {
        let mut session = seeded(4)?;
        session.apply(Command::Inject(Some(FaultCondition::SensorFuel)));

        let first = session.step();
        assert_eq!(first.raised.as_slice(), &[FaultCondition::SensorFuel]);
        assert!(first.expired.is_empty());

        let mut expired_at = None;
        for _ in 0..1_100 {
            let report = session.step();
            assert!(report.raised.is_empty());
            if report.expired.contains(&FaultCondition::SensorFuel) {
                expired_at = Some(report.time);
                break;
            }
        }
        assert_eq!(expired_at, Some(first.time + Duration::from_millis(5_005)));
        Ok(())
    }

    #[test]
    fn test_paced_run_covers_exact_duration() -> TestResult {
        let scenario = Scenario::from_yaml_str(
            "name: paced\nduration_secs: 0.1\nevents:\n  - { at_secs: 0.0, command: start }\n",
        )?;
        let mut session = seeded(6)?;
        let summary =
            session.run_scenario_paced(&scenario, NullSink, Duration::from_millis(5))?;
        assert_eq!(summary.ticks, 20);
        assert_eq!(summary.final_time, Duration::from_millis(100));
        assert_eq!(summary.final_state, LifecycleState::Starting);
        Ok(())
    }

    #[test]
    fn test_auto_protection_can_be_disabled() -> TestResult {
        let mut session = seeded(5)?;
        session.set_auto_protection(false);
        session.apply(Command::Start);
        session.apply(Command::Inject(Some(FaultCondition::OverheatSevere(
            twinjet_faults::ThermalPhase::Start,
        ))));
        let report = session.step();
        assert!(report.visible.iter().any(FaultCondition::is_critical));
        assert!(!report.auto_shutdown);
        assert_eq!(report.state, LifecycleState::Starting);
        Ok(())
    }
}
