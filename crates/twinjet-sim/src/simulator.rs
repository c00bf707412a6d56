//! Fixed-tick lifecycle state machine over the engine ground truth.

use core::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use twinjet_faults::FaultCondition;

use crate::overlay::apply_overlay;
use crate::{EngineTruth, LifecycleState, ObservedData, SimConfig, SimResult, ThrustDirection};

/// Steady-state reference captured on entering RUNNING.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct RunningBaseline {
    rpm_left: f64,
    rpm_right: f64,
    egt_left: f64,
    egt_right: f64,
    fuel_flow: f64,
}

/// Decay reference captured on `stop()`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct DecayBaseline {
    rpm_left: f64,
    rpm_right: f64,
    egt_left: f64,
    egt_right: f64,
}

/// Twin-engine physics simulator.
///
/// Owns the [`EngineTruth`] and the [`LifecycleState`], and produces one
/// [`ObservedData`] snapshot per [`tick`](Self::tick). Commands never fail:
/// a command that makes no sense in the current state is ignored.
#[derive(Debug)]
pub struct PhysicsSimulator {
    config: SimConfig,
    truth: EngineTruth,
    observed: ObservedData,
    state: LifecycleState,
    phase_elapsed: Duration,
    running: RunningBaseline,
    decay: DecayBaseline,
    injected: Option<FaultCondition>,
    rng: StdRng,
}

impl Default for PhysicsSimulator {
    fn default() -> Self {
        Self::build(SimConfig::default(), StdRng::from_os_rng())
    }
}

impl PhysicsSimulator {
    /// Create a simulator seeded from the operating system.
    ///
    /// # Errors
    ///
    /// Returns [`SimError`](crate::SimError) if `config` fails validation.
    pub fn new(config: SimConfig) -> SimResult<Self> {
        config.validate()?;
        Ok(Self::build(config, StdRng::from_os_rng()))
    }

    /// Create a simulator with a fixed seed, for reproducible runs.
    ///
    /// # Errors
    ///
    /// Returns [`SimError`](crate::SimError) if `config` fails validation.
    pub fn with_seed(config: SimConfig, seed: u64) -> SimResult<Self> {
        config.validate()?;
        Ok(Self::build(config, StdRng::seed_from_u64(seed)))
    }

    fn build(config: SimConfig, rng: StdRng) -> Self {
        let truth = EngineTruth::at_rest(&config);
        let observed = ObservedData::from_truth(&truth, config.rated_speed_rpm);
        Self {
            config,
            truth,
            observed,
            state: LifecycleState::Off,
            phase_elapsed: Duration::ZERO,
            running: RunningBaseline::default(),
            decay: DecayBaseline::default(),
            injected: None,
            rng,
        }
    }

    /// Begin spool-up from OFF or STOPPING.
    pub fn start(&mut self) {
        match self.state {
            LifecycleState::Off | LifecycleState::Stopping => {
                tracing::info!(from = %self.state, "Engine start commanded");
                self.enter(LifecycleState::Starting);
            }
            state => tracing::debug!(state = %state, "Start ignored"),
        }
    }

    /// Begin spool-down from any state except OFF.
    ///
    /// The current speeds and temperatures become the decay reference.
    pub fn stop(&mut self) {
        if self.state == LifecycleState::Off {
            tracing::debug!("Stop ignored, engines already off");
            return;
        }
        self.decay = DecayBaseline {
            rpm_left: self.truth.rpm_left,
            rpm_right: self.truth.rpm_right,
            egt_left: self.truth.egt_left,
            egt_right: self.truth.egt_right,
        };
        tracing::info!(from = %self.state, "Engine shutdown commanded");
        self.enter(LifecycleState::Stopping);
    }

    /// Nudge the steady-state operating point. Only effective while RUNNING.
    pub fn adjust_thrust(&mut self, direction: ThrustDirection) {
        if self.state != LifecycleState::Running {
            tracing::debug!(state = %self.state, ?direction, "Thrust change ignored");
            return;
        }
        let step = self
            .rng
            .random_range(self.config.thrust_step_min..=self.config.thrust_step_max);
        let factor = 1.0 + direction.sign() * step;
        let max_rpm = self.config.max_speed_rpm();

        let base = &mut self.running;
        base.rpm_left = (base.rpm_left * factor).min(max_rpm);
        base.rpm_right = (base.rpm_right * factor).min(max_rpm);
        base.egt_left *= factor;
        base.egt_right *= factor;
        base.fuel_flow =
            (base.fuel_flow + direction.sign() * self.config.thrust_fuel_step).max(0.0);

        tracing::debug!(
            ?direction,
            step,
            rpm = base.rpm_left,
            fuel_flow = base.fuel_flow,
            "Thrust baseline adjusted"
        );
    }

    /// Set or clear the injected sensor fault. Takes effect on the next tick.
    pub fn inject_fault(&mut self, condition: Option<FaultCondition>) {
        if self.injected != condition {
            match condition {
                Some(condition) => {
                    tracing::info!(fault = condition.code(), "Sensor fault injected");
                }
                None => tracing::info!("Sensor fault cleared"),
            }
        }
        self.injected = condition;
    }

    /// Remove any injected fault.
    pub fn clear_fault(&mut self) {
        self.inject_fault(None);
    }

    /// Advance the simulation by one fixed step.
    pub fn tick(&mut self, dt: Duration) {
        if self.state.is_transient() {
            self.phase_elapsed = self.phase_elapsed.saturating_add(dt);
        }

        let dt_secs = dt.as_secs_f64();
        self.truth.burn_fuel(dt_secs);
        if self.truth.is_fuel_exhausted() && !self.state.is_shutting_down() {
            tracing::warn!(state = %self.state, "Fuel exhausted, forcing shutdown");
            self.stop();
        }

        match self.state {
            LifecycleState::Starting => self.spool_up(dt_secs),
            LifecycleState::Running => self.hold_steady(),
            LifecycleState::Stopping => self.spool_down(),
            LifecycleState::Off => self.truth.settle(self.config.ambient_celsius),
        }

        let rated = self.config.rated_speed_rpm;
        self.observed = ObservedData::from_truth(&self.truth, rated);
        apply_overlay(self.injected, &mut self.observed, rated);
    }

    fn spool_up(&mut self, dt_secs: f64) {
        let cfg = &self.config;
        let t = self.phase_elapsed.as_secs_f64();

        if t <= cfg.linear_phase_secs {
            let rpm_step = cfg.spool_rate_rpm_per_sec * dt_secs;
            self.truth.rpm_left += rpm_step;
            self.truth.rpm_right += rpm_step;
            self.truth.fuel_flow += cfg.spool_fuel_rate * dt_secs;
        } else if t > cfg.log_phase_offset_secs {
            let lg = (t - cfg.log_phase_offset_secs).log10();
            let rpm = cfg.log_speed_gain * lg + cfg.log_speed_base;
            let egt = cfg.log_temp_gain * lg + cfg.ambient_celsius;
            self.truth.rpm_left = rpm;
            self.truth.rpm_right = rpm;
            self.truth.egt_left = egt;
            self.truth.egt_right = egt;
            self.truth.fuel_flow = (cfg.log_flow_gain * lg + cfg.log_flow_base).max(0.0);
            self.hand_over_if_spooled();
        }
    }

    /// RUNNING is only entered from the growth curve, never from the linear ramp.
    fn hand_over_if_spooled(&mut self) {
        let threshold = self.config.running_threshold_rpm();
        if self.truth.rpm_left >= threshold && self.truth.rpm_right >= threshold {
            self.running = RunningBaseline {
                rpm_left: self.truth.rpm_left,
                rpm_right: self.truth.rpm_right,
                egt_left: self.truth.egt_left,
                egt_right: self.truth.egt_right,
                fuel_flow: self.truth.fuel_flow,
            };
            tracing::info!(
                rpm = self.truth.rpm_left,
                egt = self.truth.egt_left,
                elapsed_ms = self.phase_elapsed.as_millis(),
                "Engines stabilized"
            );
            self.enter(LifecycleState::Running);
        }
    }

    fn hold_steady(&mut self) {
        let spread = self.config.running_noise;
        let noise = 1.0 + self.rng.random_range(-spread..=spread);
        let base = self.running;
        self.truth.rpm_left = base.rpm_left * noise;
        self.truth.rpm_right = base.rpm_right * noise;
        self.truth.egt_left = base.egt_left * noise;
        self.truth.egt_right = base.egt_right * noise;
        self.truth.fuel_flow = base.fuel_flow * noise;
    }

    fn spool_down(&mut self) {
        let ambient = self.config.ambient_celsius;
        let t = self.phase_elapsed.as_secs_f64();
        self.truth.fuel_flow = 0.0;

        if t >= self.config.stop_timeout_secs {
            self.truth.settle(ambient);
            tracing::info!(elapsed_ms = self.phase_elapsed.as_millis(), "Engines off");
            self.enter(LifecycleState::Off);
            return;
        }

        let decay = self.config.decay_base.powf(t);
        let base = self.decay;
        self.truth.rpm_left = base.rpm_left * decay;
        self.truth.rpm_right = base.rpm_right * decay;
        self.truth.egt_left = (base.egt_left - ambient) * decay + ambient;
        self.truth.egt_right = (base.egt_right - ambient) * decay + ambient;
    }

    fn enter(&mut self, next: LifecycleState) {
        tracing::info!(from = %self.state, to = %next, "Lifecycle transition");
        self.state = next;
        self.phase_elapsed = Duration::ZERO;
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Sensor snapshot produced by the last tick.
    pub fn observed(&self) -> &ObservedData {
        &self.observed
    }

    /// Physical ground truth.
    pub fn truth(&self) -> &EngineTruth {
        &self.truth
    }

    /// Currently injected fault, if any.
    pub fn injected_fault(&self) -> Option<FaultCondition> {
        self.injected
    }

    /// Time spent in the current STARTING or STOPPING phase.
    pub fn phase_elapsed(&self) -> Duration {
        self.phase_elapsed
    }

    /// Physics constants in use.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// True while RUNNING with both observed speeds at or above the
    /// stabilization threshold.
    pub fn is_stabilized(&self) -> bool {
        let threshold = self.config.running_fraction * 100.0;
        self.state == LifecycleState::Running
            && self.observed.speed_percent_left >= threshold
            && self.observed.speed_percent_right >= threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const STEP: Duration = Duration::from_millis(5);

    fn sim() -> PhysicsSimulator {
        PhysicsSimulator::build(SimConfig::default(), StdRng::seed_from_u64(42))
    }

    fn run_until(sim: &mut PhysicsSimulator, state: LifecycleState, max_ticks: u32) -> u32 {
        let mut ticks = 0;
        while sim.state() != state && ticks < max_ticks {
            sim.tick(STEP);
            ticks += 1;
        }
        ticks
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = SimConfig {
            rated_speed_rpm: -1.0,
            ..SimConfig::default()
        };
        assert!(PhysicsSimulator::new(config).is_err());
    }

    #[test]
    fn test_start_from_off_only() {
        let mut sim = sim();
        sim.start();
        assert_eq!(sim.state(), LifecycleState::Starting);
        sim.tick(STEP);
        let elapsed = sim.phase_elapsed();
        sim.start();
        assert_eq!(sim.phase_elapsed(), elapsed, "second start must not reset the timer");
    }

    #[test]
    fn test_stop_when_off_is_ignored() {
        let mut sim = sim();
        sim.stop();
        assert_eq!(sim.state(), LifecycleState::Off);
    }

    #[test]
    fn test_linear_ramp_first_tick() {
        let mut sim = sim();
        sim.start();
        sim.tick(STEP);
        assert_relative_eq!(sim.truth().rpm_left, 50.0);
        assert_relative_eq!(sim.truth().fuel_flow, 0.025);
        assert_relative_eq!(sim.truth().egt_left, 20.0);
    }

    #[test]
    fn test_linear_and_log_phases_meet() {
        let mut sim = sim();
        sim.start();
        for _ in 0..400 {
            sim.tick(STEP);
        }
        assert_eq!(sim.phase_elapsed(), Duration::from_secs(2));
        let at_boundary = sim.truth().rpm_left;
        assert_relative_eq!(at_boundary, 20_000.0);

        sim.tick(STEP);
        let after = sim.truth().rpm_left;
        assert!(after >= at_boundary);
        assert!(after - at_boundary < 100.0);
    }

    #[test]
    fn test_reaches_running_with_baseline() {
        let mut sim = sim();
        sim.start();
        let ticks = run_until(&mut sim, LifecycleState::Running, 4_000);
        assert_eq!(sim.state(), LifecycleState::Running);
        assert!(ticks < 4_000);
        assert!(sim.truth().rpm_left >= 38_000.0);
        assert!(sim.is_stabilized());
    }

    #[test]
    fn test_running_noise_is_shared() {
        let mut sim = sim();
        sim.start();
        run_until(&mut sim, LifecycleState::Running, 4_000);
        let base_rpm = sim.running.rpm_left;
        let base_egt = sim.running.egt_left;
        for _ in 0..100 {
            sim.tick(STEP);
            let truth = sim.truth();
            assert_relative_eq!(truth.rpm_left, truth.rpm_right);
            assert_relative_eq!(
                truth.rpm_left / base_rpm,
                truth.egt_left / base_egt,
                max_relative = 1e-9
            );
            assert!((truth.rpm_left / base_rpm - 1.0).abs() <= 0.03 + 1e-12);
        }
    }

    #[test]
    fn test_thrust_only_in_running() {
        let mut sim = sim();
        sim.adjust_thrust(ThrustDirection::Increase);
        assert_eq!(sim.running, RunningBaseline::default());
    }

    #[test]
    fn test_thrust_step_bounds_and_cap() {
        let mut sim = sim();
        sim.start();
        run_until(&mut sim, LifecycleState::Running, 4_000);

        let before = sim.running;
        sim.adjust_thrust(ThrustDirection::Increase);
        let ratio = sim.running.rpm_left / before.rpm_left;
        assert!((1.03..=1.05).contains(&ratio), "ratio {ratio}");
        assert_relative_eq!(sim.running.fuel_flow, before.fuel_flow + 1.0);

        for _ in 0..50 {
            sim.adjust_thrust(ThrustDirection::Increase);
        }
        assert!(sim.running.rpm_left <= sim.config().max_speed_rpm());
    }

    #[test]
    fn test_thrust_decrease_floors_flow() {
        let mut sim = sim();
        sim.start();
        run_until(&mut sim, LifecycleState::Running, 4_000);
        for _ in 0..100 {
            sim.adjust_thrust(ThrustDirection::Decrease);
        }
        assert_relative_eq!(sim.running.fuel_flow, 0.0);
    }

    #[test]
    fn test_stop_decays_then_forces_off() {
        let mut sim = sim();
        sim.start();
        run_until(&mut sim, LifecycleState::Running, 4_000);
        sim.stop();
        assert_eq!(sim.state(), LifecycleState::Stopping);

        for _ in 0..200 {
            sim.tick(STEP);
        }
        assert_relative_eq!(sim.truth().fuel_flow, 0.0);
        let expected = sim.decay.rpm_left * 0.6;
        assert_relative_eq!(sim.truth().rpm_left, expected, max_relative = 1e-9);

        let ticks = run_until(&mut sim, LifecycleState::Off, 2_000);
        assert_eq!(ticks, 1_800);
        assert_relative_eq!(sim.truth().rpm_left, 0.0);
        assert_relative_eq!(sim.truth().egt_right, 20.0);
    }

    #[test]
    fn test_linear_ramp_never_hands_over_to_running() {
        let config = SimConfig {
            spool_rate_rpm_per_sec: 40_000.0,
            ..SimConfig::default()
        };
        let mut sim = PhysicsSimulator::build(config, StdRng::seed_from_u64(7));
        sim.start();

        // 1.5 s of ramping is already past 38000 rpm.
        for _ in 0..300 {
            sim.tick(STEP);
        }
        assert!(sim.truth().rpm_left >= sim.config().running_threshold_rpm());
        assert_eq!(sim.state(), LifecycleState::Starting);

        // The growth curve restarts from 20000 rpm and crosses at about 7.06 s.
        let ticks = 300 + run_until(&mut sim, LifecycleState::Running, 4_000);
        assert_eq!(sim.state(), LifecycleState::Running);
        assert!((1_400..1_420).contains(&ticks), "handover after {ticks} ticks");
    }

    #[test]
    fn test_restart_while_stopping() {
        let mut sim = sim();
        sim.start();
        run_until(&mut sim, LifecycleState::Running, 4_000);
        sim.stop();
        sim.tick(STEP);
        sim.start();
        assert_eq!(sim.state(), LifecycleState::Starting);
        assert_eq!(sim.phase_elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_fault_never_touches_truth() {
        let mut clean = sim();
        let mut faulted = sim();
        clean.start();
        faulted.start();
        faulted.inject_fault(Some(FaultCondition::OverspeedSevere));
        for _ in 0..3_000 {
            clean.tick(STEP);
            faulted.tick(STEP);
        }
        assert_eq!(clean.truth(), faulted.truth());
        assert_relative_eq!(faulted.observed().speed_percent_left, 125.0);

        faulted.clear_fault();
        faulted.tick(STEP);
        clean.tick(STEP);
        assert_eq!(clean.observed(), faulted.observed());
    }

    #[test]
    fn test_fuel_exhaustion_forces_stop() {
        let config = SimConfig {
            initial_fuel: 0.01,
            ..SimConfig::default()
        };
        let mut sim = PhysicsSimulator::build(config, StdRng::seed_from_u64(1));
        sim.start();
        run_until(&mut sim, LifecycleState::Stopping, 100);
        assert_eq!(sim.state(), LifecycleState::Stopping);
        assert_relative_eq!(sim.truth().fuel_quantity, 0.0);
    }
}
