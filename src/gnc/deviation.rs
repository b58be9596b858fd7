use nalgebra::{Rotation2, Vector2};

use crate::dynamics::state::{DeviationRecord, SimulationState};
use super::angle::wrap_180;

// ---------------------------------------------------------------------------
// Deviation tracking: absolute position -> track-relative frame
// ---------------------------------------------------------------------------

/// Measures how far the aircraft has strayed from a straight intended track
/// that starts at a fixed origin.
///
/// The origin is fixed exactly once per run; `update` is then a pure function
/// of the state and the intended heading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviationTracker {
    origin: Vector2<f64>, // m [East, North]
}

impl DeviationTracker {
    /// Fix the reference point of the intended track.
    pub fn initialize(origin_east_m: f64, origin_north_m: f64) -> Self {
        Self { origin: Vector2::new(origin_east_m, origin_north_m) }
    }

    /// Fix the origin at the position reported in `state`.
    pub fn from_state(state: &SimulationState) -> Self {
        Self::initialize(state.east_m(), state.north_m())
    }

    /// Rotate the displacement from the origin into the track frame.
    ///
    /// With psi the intended heading (clockwise from north):
    ///   lateral = dx cos(psi) - dy sin(psi)
    ///   along   = dx sin(psi) + dy cos(psi)
    pub fn update(&self, state: &SimulationState, intended_heading_deg: f64) -> DeviationRecord {
        let (lateral, along) = self.track_frame(
            state.east_m() - self.origin.x,
            state.north_m() - self.origin.y,
            intended_heading_deg,
        );

        DeviationRecord {
            lateral_deviation_m: lateral,
            along_track_m: along,
            drift_angle_deg: wrap_180(state.yaw_deg - state.ground_track_deg()),
        }
    }

    /// Displacement (dx east, dy north) expressed as (lateral, along-track).
    pub fn track_frame(&self, dx: f64, dy: f64, intended_heading_deg: f64) -> (f64, f64) {
        let rot = Rotation2::new(intended_heading_deg.to_radians());
        let v = rot * Vector2::new(dx, dy);
        (v.x, v.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    fn state_at(east: f64, north: f64, yaw: f64, vel: Vector3<f64>) -> SimulationState {
        SimulationState {
            time: 0.0,
            pos: Vector3::new(east, north, 300.0),
            vel,
            airspeed_mps: 30.0,
            roll_deg: 0.0,
            pitch_deg: 0.0,
            yaw_deg: yaw,
        }
    }

    #[test]
    fn zero_heading_reduces_to_displacement() {
        let t = DeviationTracker::initialize(100.0, -50.0);
        let s = state_at(137.5, 212.25, 0.0, Vector3::new(0.0, 30.0, 0.0));
        let d = t.update(&s, 0.0);
        assert_eq!(d.lateral_deviation_m, 37.5);
        assert_eq!(d.along_track_m, 262.25);
    }

    #[test]
    fn rotation_preserves_norm() {
        let t = DeviationTracker::initialize(0.0, 0.0);
        let cases = [
            (120.0, -45.0, 0.0),
            (-3.5, 800.0, 37.0),
            (1500.0, 1500.0, 225.0),
            (-0.001, 0.002, 359.9),
            (42.0, -17.0, -130.0),
        ];
        for &(dx, dy, psi) in &cases {
            let (lat, along) = t.track_frame(dx, dy, psi);
            let lhs = lat * lat + along * along;
            let rhs = dx * dx + dy * dy;
            assert!((lhs - rhs).abs() <= 1e-9 * rhs.max(1.0), "psi={psi}: {lhs} vs {rhs}");
        }
    }

    #[test]
    fn east_track_puts_south_on_the_right() {
        let t = DeviationTracker::initialize(0.0, 0.0);
        // Flying east, a point 100 m south is right of track
        let (lat, along) = t.track_frame(500.0, -100.0, 90.0);
        assert!((lat - 100.0).abs() < 1e-9);
        assert!((along - 500.0).abs() < 1e-9);
    }

    #[test]
    fn drift_angle_under_crosswind() {
        let t = DeviationTracker::initialize(0.0, 0.0);
        // Heading north, drifting east at 45 deg
        let s = state_at(0.0, 0.0, 0.0, Vector3::new(20.0, 20.0, 0.0));
        let d = t.update(&s, 0.0);
        assert!((d.drift_angle_deg + 45.0).abs() < 1e-9);
    }

    #[test]
    fn drift_angle_wraps() {
        let t = DeviationTracker::initialize(0.0, 0.0);
        // Heading 350, tracking 10 -> drift -20, not 340
        let track = 10.0_f64.to_radians();
        let s = state_at(0.0, 0.0, 350.0, Vector3::new(track.sin(), track.cos(), 0.0) * 30.0);
        let d = t.update(&s, 0.0);
        assert!((d.drift_angle_deg + 20.0).abs() < 1e-9);
    }
}
