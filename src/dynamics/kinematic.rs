use nalgebra::Vector3;

use crate::dynamics::state::{ControlCommand, G0};
use crate::vehicle::AircraftProfile;

// ---------------------------------------------------------------------------
// Point-mass coordinated-turn state
// ---------------------------------------------------------------------------

/// Internal integration state of the kinematic flight model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KinematicState {
    pub time: f64,
    pub pos: Vector3<f64>,  // m, ENU
    pub heading: f64,       // rad, clockwise from north
    pub bank: f64,          // rad, positive = right wing down
    pub pitch: f64,         // rad, positive = nose up
}

impl KinematicState {
    pub fn apply(&self, d: &Deriv, dt: f64) -> KinematicState {
        KinematicState {
            time: self.time + dt,
            pos: self.pos + d.dpos * dt,
            heading: self.heading + d.dheading * dt,
            bank: self.bank + d.dbank * dt,
            pitch: self.pitch + d.dpitch * dt,
        }
    }

    /// Velocity of the airframe relative to the air mass (ENU).
    pub fn air_velocity(&self, airspeed: f64) -> Vector3<f64> {
        let horizontal = airspeed * self.pitch.cos();
        Vector3::new(
            horizontal * self.heading.sin(),
            horizontal * self.heading.cos(),
            airspeed * self.pitch.sin(),
        )
    }
}

#[derive(Debug, Clone)]
pub struct Deriv {
    pub dpos: Vector3<f64>,  // ground velocity
    pub dheading: f64,       // turn rate
    pub dbank: f64,          // roll rate
    pub dpitch: f64,         // pitch rate
}

// ---------------------------------------------------------------------------
// Equations of motion
// ---------------------------------------------------------------------------

/// Compute state derivatives for a constant-airspeed aircraft.
///
/// Motion modeled:
///   1. Aileron commands roll rate; lateral stability returns the wings to
///      level with time constant `roll_stability_tau`. Bank stops at the limit.
///   2. Pitch chases its commanded angle with first-order lag
///   3. Coordinated turn: heading rate = g * tan(bank) / V, plus rudder yaw
///   4. Ground velocity = air-relative velocity + air-mass velocity (wind)
pub fn derivatives(
    state: &KinematicState,
    aircraft: &AircraftProfile,
    airspeed: f64,
    cmd: &ControlCommand,
    wind: &Vector3<f64>,
) -> Deriv {
    let max_bank = aircraft.max_bank_deg.to_radians();
    let mut roll_rate = cmd.aileron_norm * aircraft.max_roll_rate_dps.to_radians()
        - state.bank / aircraft.roll_stability_tau;
    if (state.bank >= max_bank && roll_rate > 0.0) || (state.bank <= -max_bank && roll_rate < 0.0) {
        roll_rate = 0.0;
    }
    let pitch_cmd = cmd.elevator_norm * aircraft.max_pitch_deg.to_radians();

    let turn_rate = if airspeed > 1e-3 {
        G0 * state.bank.tan() / airspeed
    } else {
        0.0
    };
    let yaw_rate = cmd.rudder_norm * aircraft.max_yaw_rate_dps.to_radians();

    Deriv {
        dpos: state.air_velocity(airspeed) + wind,
        dheading: turn_rate + yaw_rate,
        dbank: roll_rate,
        dpitch: (pitch_cmd - state.pitch) / aircraft.pitch_tau,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
