use nalgebra::Vector3;

use crate::dynamics;
use crate::dynamics::kinematic::KinematicState;
use crate::dynamics::state::ControlCommand;
use crate::vehicle::AircraftProfile;

// ---------------------------------------------------------------------------
// RK4 integrator with constant command and wind over the step
// ---------------------------------------------------------------------------

/// Single RK4 step with constant control command and air-mass velocity.
/// Bank is held inside the aircraft's bank limit.
pub fn rk4_step(
    state: &KinematicState,
    aircraft: &AircraftProfile,
    airspeed: f64,
    cmd: &ControlCommand,
    wind: &Vector3<f64>,
    dt: f64,
) -> KinematicState {
    let max_bank = aircraft.max_bank_deg.to_radians();
    let f = |s: &KinematicState| dynamics::derivatives(s, aircraft, airspeed, cmd, wind);
    let k1 = f(state);
    let k2 = f(&state.apply(&k1, dt * 0.5));
    let k3 = f(&state.apply(&k2, dt * 0.5));
    let k4 = f(&state.apply(&k3, dt));

    KinematicState {
        time: state.time + dt,
        pos: state.pos + (k1.dpos + 2.0 * k2.dpos + 2.0 * k3.dpos + k4.dpos) * (dt / 6.0),
        heading: state.heading
            + (k1.dheading + 2.0 * k2.dheading + 2.0 * k3.dheading + k4.dheading) * (dt / 6.0),
        bank: (state.bank + (k1.dbank + 2.0 * k2.dbank + 2.0 * k3.dbank + k4.dbank) * (dt / 6.0))
            .clamp(-max_bank, max_bank),
        pitch: state.pitch
            + (k1.dpitch + 2.0 * k2.dpitch + 2.0 * k3.dpitch + k4.dpitch) * (dt / 6.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vehicle::presets;

    #[test]
    fn straight_flight_is_exact() {
        let s = KinematicState {
            time: 0.0,
            pos: Vector3::new(0.0, 0.0, 300.0),
            heading: 0.0,
            bank: 0.0,
            pitch: 0.0,
        };
        let wind = Vector3::new(-10.0, 0.0, 0.0);
        let next = rk4_step(&s, &presets::c172p(), 30.0, &ControlCommand::ZERO, &wind, 0.5);
        assert!((next.pos.x + 5.0).abs() < 1e-12);
        assert!((next.pos.y - 15.0).abs() < 1e-12);
        assert!((next.time - 0.5).abs() < 1e-12);
    }

    fn wings_level() -> KinematicState {
        KinematicState {
            time: 0.0,
            pos: Vector3::new(0.0, 0.0, 300.0),
            heading: 0.0,
            bank: 0.0,
            pitch: 0.0,
        }
    }

    #[test]
    fn full_aileron_stops_at_bank_limit() {
        let ac = presets::c172p();
        let cmd = ControlCommand::clamped(1.0, 0.0, 0.0);
        let mut s = wings_level();
        for _ in 0..500 {
            s = rk4_step(&s, &ac, 30.0, &cmd, &Vector3::zeros(), 0.01);
            assert!(s.bank <= ac.max_bank_deg.to_radians());
        }
        assert!((s.bank - ac.max_bank_deg.to_radians()).abs() < 1e-6);
        assert!(s.heading > 0.0);
    }

    #[test]
    fn partial_aileron_settles_where_stability_balances_roll() {
        let ac = presets::c172p();
        let cmd = ControlCommand::clamped(0.25, 0.0, 0.0);
        let mut s = wings_level();
        for _ in 0..4000 {
            s = rk4_step(&s, &ac, 30.0, &cmd, &Vector3::zeros(), 0.01);
        }
        // 0.25 * 30 deg/s * 4 s
        assert!((s.bank.to_degrees() - 30.0).abs() < 0.01);
    }
}
