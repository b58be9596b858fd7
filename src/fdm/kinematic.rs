use nalgebra::Vector3;
use tracing::{debug, info};

use crate::dynamics::kinematic::KinematicState;
use crate::dynamics::state::{
    ControlCommand, SimulationState, FT_TO_M, KTS_TO_MPS, MPS_TO_FPS,
};
use crate::error::{Error, FdmError, Result};
use crate::gnc::angle::wrap_360;
use crate::sim::integrator::rk4_step;
use crate::vehicle::{presets, AircraftProfile};
use super::{props, FlightDynamics, InitialConditions};

/// Internal integration step, s.
const SUBSTEP: f64 = 0.01;

// ---------------------------------------------------------------------------
// Kinematic flight model
// ---------------------------------------------------------------------------

/// Constant-airspeed, coordinated-turn point mass.
///
/// Stands in for a full 6DOF engine: control surfaces set bank, pitch and
/// yaw rate; the ground track follows from airspeed plus wind. Wind
/// properties are the air-mass velocity (where the air moves TO), in fps.
#[derive(Debug, Clone)]
pub struct KinematicFdm {
    aircraft: AircraftProfile,
    airspeed: f64,           // m/s, true airspeed
    state: KinematicState,
    cmd: ControlCommand,
    wind: Vector3<f64>,      // m/s, air-mass velocity ENU
}

impl KinematicFdm {
    /// Build from an explicit profile (bypasses the preset registry).
    pub fn with_aircraft(aircraft: AircraftProfile, ic: &InitialConditions) -> Result<Self> {
        let airspeed = ic.airspeed_kts * KTS_TO_MPS;
        if !(airspeed > aircraft.stall_speed_mps()) {
            return Err(Error::CollaboratorInit {
                aircraft: aircraft.id.clone(),
                reason: format!(
                    "airspeed {:.1} kts is below stall speed {:.1} kts",
                    ic.airspeed_kts, aircraft.stall_speed_kts
                ),
            });
        }
        if !(ic.altitude_ft > 0.0) {
            return Err(Error::CollaboratorInit {
                aircraft: aircraft.id.clone(),
                reason: format!("altitude {} ft is not above ground", ic.altitude_ft),
            });
        }

        info!(
            aircraft = %aircraft.name,
            altitude_ft = ic.altitude_ft,
            airspeed_kts = ic.airspeed_kts,
            heading_deg = ic.heading_deg,
            "kinematic flight model initialized"
        );

        Ok(Self {
            airspeed,
            state: KinematicState {
                time: 0.0,
                pos: Vector3::new(ic.east_m, ic.north_m, ic.altitude_ft * FT_TO_M),
                heading: ic.heading_deg.to_radians(),
                bank: 0.0,
                pitch: 0.0,
            },
            cmd: ControlCommand::ZERO,
            wind: Vector3::zeros(),
            aircraft,
        })
    }

}

impl FlightDynamics for KinematicFdm {
    fn init(aircraft_id: &str, ic: &InitialConditions) -> Result<Self> {
        let aircraft = presets::by_id(aircraft_id).ok_or_else(|| Error::CollaboratorInit {
            aircraft: aircraft_id.to_string(),
            reason: format!("unknown model (known: {})", presets::KNOWN_IDS.join(", ")),
        })?;
        Self::with_aircraft(aircraft, ic)
    }

    fn set_property(&mut self, path: &str, value: f64) -> std::result::Result<(), FdmError> {
        if !value.is_finite() {
            return Err(FdmError::NonFinite(path.to_string()));
        }
        match path {
            props::AILERON_CMD => self.cmd.aileron_norm = value.clamp(-1.0, 1.0),
            props::ELEVATOR_CMD => self.cmd.elevator_norm = value.clamp(-1.0, 1.0),
            props::RUDDER_CMD => self.cmd.rudder_norm = value.clamp(-1.0, 1.0),
            props::WIND_NORTH_FPS => self.wind.y = value / MPS_TO_FPS,
            props::WIND_EAST_FPS => self.wind.x = value / MPS_TO_FPS,
            props::WIND_DOWN_FPS => self.wind.z = -value / MPS_TO_FPS,
            _ => return Err(FdmError::UnknownProperty(path.to_string())),
        }
        Ok(())
    }

    fn run_step(&mut self, dt: f64) -> bool {
        if !(dt > 0.0 && dt.is_finite()) {
            return false;
        }
        let n = (dt / SUBSTEP).ceil().max(1.0) as usize;
        let h = dt / n as f64;
        let mut next = self.state;
        for _ in 0..n {
            next = rk4_step(&next, &self.aircraft, self.airspeed, &self.cmd, &self.wind, h);
        }

        let finite = next.pos.iter().all(|v| v.is_finite())
            && next.heading.is_finite()
            && next.bank.is_finite()
            && next.pitch.is_finite();
        if !finite {
            debug!(time = self.state.time, "kinematic integration produced non-finite state");
            return false;
        }
        self.state = next;
        true
    }

    fn get_state(&self) -> SimulationState {
        let s = &self.state;
        SimulationState {
            time: s.time,
            pos: s.pos,
            vel: s.air_velocity(self.airspeed) + self.wind,
            airspeed_mps: self.airspeed,
            roll_deg: s.bank.to_degrees(),
            pitch_deg: s.pitch.to_degrees(),
            yaw_deg: wrap_360(s.heading.to_degrees()),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn c172() -> KinematicFdm {
        KinematicFdm::init("c172p", &InitialConditions::default()).unwrap()
    }

    #[test]
    fn unknown_aircraft_fails_init() {
        let err = KinematicFdm::init("b747-9000", &InitialConditions::default()).unwrap_err();
        assert!(matches!(err, Error::CollaboratorInit { .. }));
    }

    #[test]
    fn below_stall_fails_init() {
        let ic = InitialConditions { airspeed_kts: 20.0, ..Default::default() };
        assert!(KinematicFdm::init("c172p", &ic).is_err());
    }

    #[test]
    fn reports_initial_conditions() {
        let fdm = c172();
        let s = fdm.get_state();
        assert_eq!(s.time, 0.0);
        assert!((s.altitude_m() - 304.8).abs() < 1e-9);
        assert!((s.airspeed_mps - 60.0 * KTS_TO_MPS).abs() < 1e-12);
        assert_eq!(s.yaw_deg, 0.0);
    }

    #[test]
    fn unknown_property_is_rejected() {
        let mut fdm = c172();
        assert_eq!(
            fdm.set_property("fcs/flap-cmd-norm", 0.5),
            Err(FdmError::UnknownProperty("fcs/flap-cmd-norm".into()))
        );
        assert!(fdm.set_property(props::AILERON_CMD, f64::NAN).is_err());
    }

    #[test]
    fn east_wind_property_drifts_east() {
        let mut fdm = c172();
        fdm.set_property(props::WIND_EAST_FPS, 10.0 * MPS_TO_FPS).unwrap();
        for _ in 0..10 {
            assert!(fdm.run_step(1.0));
        }
        let s = fdm.get_state();
        assert!((s.east_m() - 100.0).abs() < 1e-6);
        assert!((s.time - 10.0).abs() < 1e-9);
    }

    #[test]
    fn aileron_turns_the_aircraft() {
        let mut fdm = c172();
        fdm.set_property(props::AILERON_CMD, 0.5).unwrap();
        assert!(fdm.run_step(2.0));
        let s = fdm.get_state();
        assert!(s.roll_deg > 10.0);
        assert!(s.yaw_deg > 0.0 && s.yaw_deg < 90.0);
    }

    #[test]
    fn rejects_bad_time_step() {
        let mut fdm = c172();
        assert!(!fdm.run_step(0.0));
        assert!(!fdm.run_step(f64::NAN));
    }
}
