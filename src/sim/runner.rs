use serde::Serialize;
use tracing::{debug, info, trace, warn};

use crate::config::SimulationConfig;
use crate::dynamics::state::{
    ControlCommand, DeviationRecord, SimulationState, KTS_TO_MPS, MPS_TO_FPS,
};
use crate::error::{Error, Result};
use crate::fdm::{props, FlightDynamics, InitialConditions, KinematicFdm};
use crate::gnc::{Controller, DeviationTracker, PilotController};
use crate::physics::wind::{RelativeWind, WindModel};
use super::event::{EventDetector, SimEvent, ToleranceDetector, TrackCrossingDetector};

// ---------------------------------------------------------------------------
// Run output
// ---------------------------------------------------------------------------

/// One recorded tick: the state read at the start of the tick, its deviation,
/// the wind seen by the pilot and the command pushed for the next step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistoryRow {
    pub time_s: f64,
    pub lateral_deviation_m: f64,
    pub along_track_m: f64,
    pub drift_angle_deg: f64,
    pub airspeed_kts: f64,
    pub groundspeed_kts: f64,
    pub roll_deg: f64,
    pub pitch_deg: f64,
    pub yaw_deg: f64,
    pub aileron_norm: f64,
    pub elevator_norm: f64,
    pub rudder_norm: f64,
    pub crosswind_mps: f64,
    pub headwind_mps: f64,
}

impl HistoryRow {
    fn new(
        state: &SimulationState,
        deviation: &DeviationRecord,
        wind: &RelativeWind,
        cmd: &ControlCommand,
    ) -> Self {
        Self {
            time_s: state.time,
            lateral_deviation_m: deviation.lateral_deviation_m,
            along_track_m: deviation.along_track_m,
            drift_angle_deg: deviation.drift_angle_deg,
            airspeed_kts: state.airspeed_mps / KTS_TO_MPS,
            groundspeed_kts: state.groundspeed_mps() / KTS_TO_MPS,
            roll_deg: state.roll_deg,
            pitch_deg: state.pitch_deg,
            yaw_deg: state.yaw_deg,
            aileron_norm: cmd.aileron_norm,
            elevator_norm: cmd.elevator_norm,
            rudder_norm: cmd.rudder_norm,
            crosswind_mps: wind.crosswind_mps,
            headwind_mps: wind.headwind_mps,
        }
    }

    /// The command recorded on this tick.
    pub fn command(&self) -> ControlCommand {
        ControlCommand {
            aileron_norm: self.aileron_norm,
            elevator_norm: self.elevator_norm,
            rudder_norm: self.rudder_norm,
        }
    }
}

/// Why a run stopped.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum TerminationReason {
    /// Requested duration reached.
    Completed,
    /// The flight model reported an integration failure.
    StepFailed { time_s: f64 },
    /// The flight model returned NaN/Inf state.
    NonFiniteState { time_s: f64 },
    /// Altitude reached zero or below.
    GroundContact { time_s: f64, altitude_m: f64 },
    /// The flight model refused a property write.
    PropertyRejected { time_s: f64, path: String },
}

impl TerminationReason {
    pub fn is_truncated(&self) -> bool {
        !matches!(self, TerminationReason::Completed)
    }
}

/// Full result of one run. Rows are in tick order.
#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    pub controller: String,
    pub rows: Vec<HistoryRow>,
    pub events: Vec<SimEvent>,
    pub truncated: bool,
    pub termination_reason: TerminationReason,
}

impl RunResult {
    pub fn final_row(&self) -> Option<&HistoryRow> {
        self.rows.last()
    }

    pub fn final_lateral_m(&self) -> Option<f64> {
        self.final_row().map(|r| r.lateral_deviation_m)
    }

    pub fn max_abs_lateral_m(&self) -> f64 {
        self.rows
            .iter()
            .map(|r| r.lateral_deviation_m.abs())
            .fold(0.0_f64, f64::max)
    }
}

// ---------------------------------------------------------------------------
// Simulation loop
// ---------------------------------------------------------------------------

/// Fixed-step driver: INIT happens in the constructor, `run` executes
/// RUNNING until the run is COMPLETED or TRUNCATED.
///
/// Each instance owns its flight model, tracker, wind model and history, so
/// independent runs can execute on separate threads.
pub struct SimulationLoop<F: FlightDynamics = KinematicFdm> {
    config: SimulationConfig,
    fdm: F,
    tracker: DeviationTracker,
    wind: WindModel,
    intended_heading_deg: f64,
}

impl<F: FlightDynamics> SimulationLoop<F> {
    /// Validate the configuration and initialize a flight model of type `F`.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let ic = InitialConditions {
            altitude_ft: config.init_altitude,
            airspeed_kts: config.init_airspeed,
            east_m: 0.0,
            north_m: 0.0,
            heading_deg: config.controller.target_heading_deg,
        };
        let fdm = F::init(&config.aircraft_model, &ic)?;
        Self::with_fdm(config, fdm)
    }

    /// Use an already-initialized flight model.
    pub fn with_fdm(config: SimulationConfig, mut fdm: F) -> Result<Self> {
        config.validate()?;

        let mut wind = match config.seed {
            Some(seed) => WindModel::seeded(
                config.crosswind_speed,
                config.crosswind_direction,
                config.turbulence,
                seed,
            ),
            None => WindModel::new(config.crosswind_speed, config.crosswind_direction, config.turbulence),
        };

        // Initial wind goes in before the origin is read
        push_wind(&mut fdm, &mut wind).map_err(|e| Error::CollaboratorInit {
            aircraft: config.aircraft_model.clone(),
            reason: e.to_string(),
        })?;

        let start = fdm.get_state();
        let tracker = DeviationTracker::from_state(&start);
        let intended_heading_deg = config.controller.target_heading_deg;

        info!(
            aircraft = %config.aircraft_model,
            mode = %config.controller.mode,
            wind_mps = config.crosswind_speed,
            wind_from_deg = config.crosswind_direction,
            turbulence = config.turbulence,
            dt = config.dt,
            duration = config.duration,
            "simulation initialized"
        );

        Ok(Self {
            config,
            fdm,
            tracker,
            wind,
            intended_heading_deg,
        })
    }

    /// Execute every tick and hand the history to the caller.
    pub fn run(mut self, controller: &mut dyn Controller) -> RunResult {
        controller.reset();

        let dt = self.config.dt;
        let steps = self.config.step_count();
        let mut rows = Vec::with_capacity(steps.min(200_000));
        let mut events = Vec::new();
        let mut detectors: Vec<Box<dyn EventDetector>> = vec![
            Box::new(ToleranceDetector::new(self.config.controller.lateral_tolerance_m)),
            Box::new(TrackCrossingDetector),
        ];
        let mut prev_deviation: Option<DeviationRecord> = None;
        let mut reason = TerminationReason::Completed;

        for _ in 0..steps {
            // 1-3. Sense
            let state = self.fdm.get_state();
            let deviation = self.tracker.update(&state, self.intended_heading_deg);
            let rel_wind = self.wind.relative_to(state.yaw_deg);

            if let Some(prev) = prev_deviation {
                for det in detectors.iter_mut() {
                    if let Some(kind) = det.check(&prev, &deviation) {
                        debug!(time = state.time, event = ?kind, "event");
                        events.push(SimEvent {
                            time_s: state.time,
                            lateral_deviation_m: deviation.lateral_deviation_m,
                            kind,
                        });
                    }
                }
            }
            prev_deviation = Some(deviation);

            // 4. Decide
            let cmd = controller.compute(&state, &deviation, &rel_wind);

            // 5. Actuate
            if let Err(path) = self.push_command(&cmd) {
                reason = TerminationReason::PropertyRejected { time_s: state.time, path };
                break;
            }

            // 6. Advance
            if !self.fdm.run_step(dt) {
                reason = TerminationReason::StepFailed { time_s: state.time };
                break;
            }
            let next = self.fdm.get_state();
            if !next.is_finite() {
                reason = TerminationReason::NonFiniteState { time_s: state.time };
                break;
            }
            if next.altitude_m() <= 0.0 {
                reason = TerminationReason::GroundContact {
                    time_s: next.time,
                    altitude_m: next.altitude_m(),
                };
                break;
            }

            // 7. Record
            trace!(
                time = state.time,
                lateral = deviation.lateral_deviation_m,
                aileron = cmd.aileron_norm,
                "tick"
            );
            rows.push(HistoryRow::new(&state, &deviation, &rel_wind, &cmd));
        }

        let truncated = reason.is_truncated();
        let result = RunResult {
            controller: controller.name().to_string(),
            rows,
            events,
            truncated,
            termination_reason: reason,
        };

        if truncated {
            warn!(
                controller = %result.controller,
                rows = result.rows.len(),
                reason = ?result.termination_reason,
                "simulation truncated"
            );
        } else {
            info!(
                controller = %result.controller,
                rows = result.rows.len(),
                final_lateral_m = result.final_lateral_m().unwrap_or(0.0),
                max_lateral_m = result.max_abs_lateral_m(),
                "simulation completed"
            );
        }
        result
    }

    /// Write surfaces and this tick's wind. Returns the rejected path on failure.
    fn push_command(&mut self, cmd: &ControlCommand) -> std::result::Result<(), String> {
        let writes = [
            (props::AILERON_CMD, cmd.aileron_norm),
            (props::ELEVATOR_CMD, cmd.elevator_norm),
            (props::RUDDER_CMD, cmd.rudder_norm),
        ];
        for (path, value) in writes {
            self.fdm.set_property(path, value).map_err(|_| path.to_string())?;
        }
        push_wind(&mut self.fdm, &mut self.wind).map_err(|e| e.to_string())
    }
}

/// Sample the wind and write it as air-mass velocity in fps.
///
/// `WindModel` components point at the "from" direction, so the air moves
/// the opposite way.
fn push_wind<F: FlightDynamics>(
    fdm: &mut F,
    wind: &mut WindModel,
) -> std::result::Result<(), crate::error::FdmError> {
    let (north, east) = wind.sample_components();
    fdm.set_property(props::WIND_NORTH_FPS, -north * MPS_TO_FPS)?;
    fdm.set_property(props::WIND_EAST_FPS, -east * MPS_TO_FPS)?;
    fdm.set_property(props::WIND_DOWN_FPS, 0.0)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Convenience entry points
// ---------------------------------------------------------------------------

/// Run with a custom controller on the built-in kinematic flight model.
pub fn simulate_with(config: &SimulationConfig, controller: &mut dyn Controller) -> Result<RunResult> {
    let sim: SimulationLoop<KinematicFdm> = SimulationLoop::new(config.clone())?;
    Ok(sim.run(controller))
}

/// Run the configured pilot strategy on the built-in kinematic flight model.
pub fn simulate(config: &SimulationConfig) -> Result<RunResult> {
    let mut pilot = PilotController::new(config.controller.clone())?;
    simulate_with(config, &mut pilot)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
