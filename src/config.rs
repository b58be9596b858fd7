use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::gnc::ControlMode;

// ---------------------------------------------------------------------------
// Pilot controller configuration
// ---------------------------------------------------------------------------

/// Immutable parameters of one pilot controller instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PilotControllerConfig {
    pub mode: ControlMode,
    pub target_heading_deg: f64,     // intended track, clockwise from north
    pub lateral_tolerance_m: f64,    // deadband half-width for track following
    pub heading_gain: f64,           // aileron per degree of heading error
    pub position_gain: f64,          // aileron per meter of lateral deviation
    /// Aileron per m/s of crosswind, applied as `gain * -crosswind`.
    /// Crosswind is positive from the right, so a negative gain banks into
    /// the wind and corrects; a positive gain steers downwind.
    pub wind_feedforward_gain: f64,
}

impl Default for PilotControllerConfig {
    fn default() -> Self {
        Self {
            mode: ControlMode::NoCorrection,
            target_heading_deg: 0.0,
            lateral_tolerance_m: 50.0,
            heading_gain: 0.02,
            position_gain: 0.001,
            wind_feedforward_gain: 0.0,
        }
    }
}

impl PilotControllerConfig {
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if !self.target_heading_deg.is_finite() {
            return Err(ConfigError::TargetHeading(self.target_heading_deg));
        }
        if !(self.lateral_tolerance_m >= 0.0 && self.lateral_tolerance_m.is_finite()) {
            return Err(ConfigError::LateralTolerance(self.lateral_tolerance_m));
        }
        non_negative_gain("heading", self.heading_gain)?;
        non_negative_gain("position", self.position_gain)?;
        // Negative feed-forward is the corrective sign
        if !self.wind_feedforward_gain.is_finite() {
            return Err(ConfigError::Gain {
                name: "wind feed-forward",
                value: self.wind_feedforward_gain,
            });
        }
        Ok(())
    }
}

fn non_negative_gain(name: &'static str, value: f64) -> std::result::Result<(), ConfigError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Gain { name, value })
    }
}

// ---------------------------------------------------------------------------
// Simulation configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub aircraft_model: String,
    pub crosswind_speed: f64,      // m/s
    pub crosswind_direction: f64,  // deg, "from" direction, clockwise from north
    pub dt: f64,                   // s, fixed control step
    pub duration: f64,             // s, simulated time to run
    pub turbulence: f64,           // intensity in [0, 1]
    pub init_altitude: f64,        // ft
    pub init_airspeed: f64,        // kts
    pub seed: Option<u64>,         // turbulence RNG seed; None = entropy
    #[serde(flatten)]
    pub controller: PilotControllerConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            aircraft_model: "c172p".into(),
            crosswind_speed: 10.0,
            crosswind_direction: 90.0,
            dt: 0.1,          // 10 Hz pilot update
            duration: 60.0,
            turbulence: 0.0,
            init_altitude: 1000.0,
            init_airspeed: 60.0,
            seed: None,
            controller: PilotControllerConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Check every parameter against its admissible range.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if !(self.dt > 0.0 && self.dt.is_finite()) {
            return Err(ConfigError::TimeStep(self.dt));
        }
        if !(self.duration > 0.0 && self.duration.is_finite()) {
            return Err(ConfigError::Duration(self.duration));
        }
        if self.aircraft_model.trim().is_empty() {
            return Err(ConfigError::EmptyAircraft);
        }
        if !(self.crosswind_speed >= 0.0 && self.crosswind_speed.is_finite()) {
            return Err(ConfigError::WindSpeed(self.crosswind_speed));
        }
        if !(0.0..360.0).contains(&self.crosswind_direction) {
            return Err(ConfigError::WindDirection(self.crosswind_direction));
        }
        if !(0.0..=1.0).contains(&self.turbulence) {
            return Err(ConfigError::Turbulence(self.turbulence));
        }
        if !(self.init_altitude > 0.0 && self.init_altitude.is_finite()) {
            return Err(ConfigError::Altitude(self.init_altitude));
        }
        if !(self.init_airspeed > 0.0 && self.init_airspeed.is_finite()) {
            return Err(ConfigError::Airspeed(self.init_airspeed));
        }
        self.controller.validate()
    }

    /// Number of fixed steps needed to cover `duration`.
    pub fn step_count(&self) -> usize {
        // Tolerate float noise so 60.0 / 0.1 yields 600, not 601.
        let steps = self.duration / self.dt;
        let rounded = steps.round();
        if (steps - rounded).abs() < 1e-9 * steps.max(1.0) {
            rounded as usize
        } else {
            steps.ceil() as usize
        }
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: SimulationConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn defaults_are_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_dt() {
        let c = SimulationConfig { dt: 0.0, ..Default::default() };
        assert_eq!(c.validate(), Err(ConfigError::TimeStep(0.0)));
        let c = SimulationConfig { dt: -0.1, ..Default::default() };
        assert!(c.validate().is_err());
    }

    #[test]
    fn rejects_out_of_range_wind() {
        let c = SimulationConfig { crosswind_direction: 360.0, ..Default::default() };
        assert_eq!(c.validate(), Err(ConfigError::WindDirection(360.0)));
        let c = SimulationConfig { crosswind_speed: -1.0, ..Default::default() };
        assert_eq!(c.validate(), Err(ConfigError::WindSpeed(-1.0)));
        let c = SimulationConfig { turbulence: 1.5, ..Default::default() };
        assert_eq!(c.validate(), Err(ConfigError::Turbulence(1.5)));
    }

    #[test]
    fn rejects_negative_tolerance_and_gains() {
        let mut c = SimulationConfig::default();
        c.controller.lateral_tolerance_m = -5.0;
        assert_eq!(c.validate(), Err(ConfigError::LateralTolerance(-5.0)));

        let mut c = SimulationConfig::default();
        c.controller.heading_gain = -0.1;
        assert!(matches!(c.validate(), Err(ConfigError::Gain { name: "heading", .. })));

        let mut c = SimulationConfig::default();
        c.controller.wind_feedforward_gain = -0.05;
        assert!(c.validate().is_ok());
    }

    #[test]
    fn step_count_tolerates_float_noise() {
        let c = SimulationConfig { dt: 0.1, duration: 60.0, ..Default::default() };
        assert_eq!(c.step_count(), 600);
        let c = SimulationConfig { dt: 1.0, duration: 60.0, ..Default::default() };
        assert_eq!(c.step_count(), 60);
        let c = SimulationConfig { dt: 0.7, duration: 2.0, ..Default::default() };
        assert_eq!(c.step_count(), 3);
    }

    #[test]
    fn json_uses_flat_keys_and_defaults() {
        let json = r#"{
            "crosswind_speed": 15.0,
            "dt": 0.5,
            "mode": "CRAB_CORRECTION",
            "heading_gain": 0.05
        }"#;
        let c = SimulationConfig::from_json_str(json).unwrap();
        assert_eq!(c.crosswind_speed, 15.0);
        assert_eq!(c.dt, 0.5);
        assert_eq!(c.controller.mode, ControlMode::CrabCorrection);
        assert_eq!(c.controller.heading_gain, 0.05);
        assert_eq!(c.aircraft_model, "c172p");
        assert_eq!(c.controller.lateral_tolerance_m, 50.0);
    }

    #[test]
    fn json_validation_errors_surface() {
        let err = SimulationConfig::from_json_str(r#"{ "dt": 0.0 }"#).unwrap_err();
        assert!(matches!(err, Error::Configuration(ConfigError::TimeStep(_))));
    }
}
