use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::PilotControllerConfig;
use crate::dynamics::state::{ControlCommand, DeviationRecord, SimulationState};
use crate::error::ConfigError;
use crate::physics::wind::RelativeWind;
use super::angle::heading_error;

/// Airspeed floor for the crab law, m/s.
const MIN_AIRSPEED: f64 = 1e-3;

// ---------------------------------------------------------------------------
// Correction strategies
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ControlMode {
    /// Hands off: the uncontrolled baseline.
    #[default]
    NoCorrection,
    /// Proportional heading hold; ignores lateral deviation.
    HeadingHold,
    /// Heading hold plus position and wind terms outside a deadband.
    TrackFollowing,
    /// Heading hold on target + crab angle computed from the crosswind.
    CrabCorrection,
}

impl ControlMode {
    pub const ALL: [ControlMode; 4] = [
        ControlMode::NoCorrection,
        ControlMode::HeadingHold,
        ControlMode::TrackFollowing,
        ControlMode::CrabCorrection,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ControlMode::NoCorrection => "NO_CORRECTION",
            ControlMode::HeadingHold => "HEADING_HOLD",
            ControlMode::TrackFollowing => "TRACK_FOLLOWING",
            ControlMode::CrabCorrection => "CRAB_CORRECTION",
        }
    }
}

impl fmt::Display for ControlMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ControlMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        ControlMode::ALL
            .into_iter()
            .find(|m| m.as_str() == normalized)
            .ok_or_else(|| ConfigError::UnknownMode(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Control laws
// ---------------------------------------------------------------------------

/// Heading offset (deg) that cancels lateral drift: asin(crosswind / airspeed).
///
/// The ratio is clamped to [-1, 1] so a crosswind at or above airspeed
/// saturates at +/-90 deg instead of producing NaN. Airspeed is floored at a
/// small positive value, so zero airspeed with any crosswind also saturates.
pub fn crab_angle_deg(crosswind_mps: f64, airspeed_mps: f64) -> f64 {
    let ratio = crosswind_mps / airspeed_mps.max(MIN_AIRSPEED);
    ratio.clamp(-1.0, 1.0).asin().to_degrees()
}

// ---------------------------------------------------------------------------
// Pilot controller
// ---------------------------------------------------------------------------

/// Closed set of correction strategies sharing one immutable configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct PilotController {
    config: PilotControllerConfig,
}

impl PilotController {
    pub fn new(config: PilotControllerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PilotControllerConfig {
        &self.config
    }

    pub fn mode(&self) -> ControlMode {
        self.config.mode
    }

    /// True once |lateral deviation| leaves the tolerance band.
    pub fn should_intervene(&self, lateral_deviation_m: f64) -> bool {
        lateral_deviation_m.abs() > self.config.lateral_tolerance_m
    }

    /// Compute the command for this tick. Every axis is clamped to [-1, 1].
    pub fn command(
        &self,
        state: &SimulationState,
        deviation: &DeviationRecord,
        wind: &RelativeWind,
    ) -> ControlCommand {
        let raw_aileron = match self.config.mode {
            ControlMode::NoCorrection => return ControlCommand::ZERO,
            ControlMode::HeadingHold => self.heading_term(self.config.target_heading_deg, state),
            ControlMode::TrackFollowing => self.track_aileron(state, deviation, wind),
            ControlMode::CrabCorrection => {
                let crab = crab_angle_deg(wind.crosswind_mps, state.airspeed_mps);
                self.heading_term(self.config.target_heading_deg + crab, state)
            }
        };

        let cmd = ControlCommand::clamped(raw_aileron, 0.0, 0.0);
        if cmd.aileron_norm != raw_aileron {
            debug!(
                mode = %self.config.mode,
                raw = raw_aileron,
                clamped = cmd.aileron_norm,
                "aileron saturated"
            );
        }
        cmd
    }

    fn heading_term(&self, target_deg: f64, state: &SimulationState) -> f64 {
        self.config.heading_gain * heading_error(target_deg, state.yaw_deg)
    }

    fn track_aileron(
        &self,
        state: &SimulationState,
        deviation: &DeviationRecord,
        wind: &RelativeWind,
    ) -> f64 {
        let heading = self.heading_term(self.config.target_heading_deg, state);
        if !self.should_intervene(deviation.lateral_deviation_m) {
            // Inside the deadband: heading hold only
            return heading;
        }
        let position = self.config.position_gain * -deviation.lateral_deviation_m;
        let feedforward = self.config.wind_feedforward_gain * -wind.crosswind_mps;
        heading + position + feedforward
    }
}

impl super::Controller for PilotController {
    fn compute(
        &mut self,
        state: &SimulationState,
        deviation: &DeviationRecord,
        wind: &RelativeWind,
    ) -> ControlCommand {
        self.command(state, deviation, wind)
    }

    fn name(&self) -> &str {
        self.config.mode.as_str()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
