use nalgebra::Vector3;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Physical constants & unit conversions
// ---------------------------------------------------------------------------

pub const G0: f64 = 9.80665; // standard gravity, m/s^2
pub const KTS_TO_MPS: f64 = 0.514_444;
pub const FT_TO_M: f64 = 0.3048;
pub const MPS_TO_FPS: f64 = 3.280_84;

// ---------------------------------------------------------------------------
// Kinematic state reported by the flight model each tick
// ---------------------------------------------------------------------------

/// Snapshot of the aircraft as reported by the flight-dynamics collaborator.
/// Frame: East-North-Up (ENU), origin at the collaborator's start location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationState {
    pub time: f64,               // s
    pub pos: Vector3<f64>,       // m   [East, North, Up]
    pub vel: Vector3<f64>,       // m/s ground velocity [East, North, Up]
    pub airspeed_mps: f64,       // true airspeed
    pub roll_deg: f64,
    pub pitch_deg: f64,
    pub yaw_deg: f64,            // heading, clockwise from north
}

impl SimulationState {
    pub fn east_m(&self) -> f64 {
        self.pos.x
    }

    pub fn north_m(&self) -> f64 {
        self.pos.y
    }

    pub fn altitude_m(&self) -> f64 {
        self.pos.z
    }

    /// Horizontal speed over the ground.
    pub fn groundspeed_mps(&self) -> f64 {
        self.vel.x.hypot(self.vel.y)
    }

    /// Direction of travel over the ground (deg, clockwise from north).
    pub fn ground_track_deg(&self) -> f64 {
        self.vel.x.atan2(self.vel.y).to_degrees()
    }

    /// True when every reported quantity is finite.
    pub fn is_finite(&self) -> bool {
        self.time.is_finite()
            && self.pos.iter().all(|v| v.is_finite())
            && self.vel.iter().all(|v| v.is_finite())
            && self.airspeed_mps.is_finite()
            && self.roll_deg.is_finite()
            && self.pitch_deg.is_finite()
            && self.yaw_deg.is_finite()
    }
}

// ---------------------------------------------------------------------------
// Track-relative deviation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DeviationRecord {
    pub lateral_deviation_m: f64, // positive = right of intended track
    pub along_track_m: f64,
    pub drift_angle_deg: f64,     // heading minus ground track, (-180, 180]
}

// ---------------------------------------------------------------------------
// Control-surface command
// ---------------------------------------------------------------------------

/// Normalized control-surface deflections, each in [-1, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ControlCommand {
    pub aileron_norm: f64,   // positive = roll right
    pub elevator_norm: f64,  // positive = nose up
    pub rudder_norm: f64,    // positive = yaw right
}

impl ControlCommand {
    pub const ZERO: ControlCommand = ControlCommand {
        aileron_norm: 0.0,
        elevator_norm: 0.0,
        rudder_norm: 0.0,
    };

    /// Saturate every axis into [-1, 1]. Non-finite inputs collapse to 0.
    pub fn clamped(aileron: f64, elevator: f64, rudder: f64) -> Self {
        Self {
            aileron_norm: saturate(aileron),
            elevator_norm: saturate(elevator),
            rudder_norm: saturate(rudder),
        }
    }

    pub fn is_saturated(&self) -> bool {
        [self.aileron_norm, self.elevator_norm, self.rudder_norm]
            .iter()
            .any(|v| v.abs() >= 1.0)
    }
}

fn saturate(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(-1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_saturates_each_axis() {
        let c = ControlCommand::clamped(3.0, -7.5, 0.25);
        assert_eq!(c.aileron_norm, 1.0);
        assert_eq!(c.elevator_norm, -1.0);
        assert_eq!(c.rudder_norm, 0.25);
        assert!(c.is_saturated());
    }

    #[test]
    fn clamp_handles_non_finite() {
        let c = ControlCommand::clamped(f64::NAN, f64::INFINITY, f64::NEG_INFINITY);
        assert_eq!(c.aileron_norm, 0.0);
        assert_eq!(c.elevator_norm, 1.0);
        assert_eq!(c.rudder_norm, -1.0);
    }

    #[test]
    fn ground_track_east_is_90() {
        let s = SimulationState {
            time: 0.0,
            pos: Vector3::new(0.0, 0.0, 300.0),
            vel: Vector3::new(25.0, 0.0, 0.0),
            airspeed_mps: 30.0,
            roll_deg: 0.0,
            pitch_deg: 0.0,
            yaw_deg: 90.0,
        };
        assert!((s.ground_track_deg() - 90.0).abs() < 1e-9);
        assert!((s.groundspeed_mps() - 25.0).abs() < 1e-9);
        assert!(s.is_finite());
    }
}
