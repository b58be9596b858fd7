//! Boundary to the flight-dynamics engine.
//!
//! The simulation loop only talks to a [`FlightDynamics`] implementation
//! through four capabilities: construct, set a named property, advance by a
//! time step, and report state. Engine-specific adapters live behind this
//! trait and are chosen when the loop is constructed.

pub mod kinematic;

use crate::dynamics::state::SimulationState;
use crate::error::{FdmError, Result};

pub use kinematic::KinematicFdm;

// ---------------------------------------------------------------------------
// Property paths
// ---------------------------------------------------------------------------

pub mod props {
    pub const AILERON_CMD: &str = "fcs/aileron-cmd-norm";
    pub const ELEVATOR_CMD: &str = "fcs/elevator-cmd-norm";
    pub const RUDDER_CMD: &str = "fcs/rudder-cmd-norm";
    pub const WIND_NORTH_FPS: &str = "atmosphere/wind-north-fps";
    pub const WIND_EAST_FPS: &str = "atmosphere/wind-east-fps";
    pub const WIND_DOWN_FPS: &str = "atmosphere/wind-down-fps";
}

// ---------------------------------------------------------------------------
// Initial conditions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InitialConditions {
    pub altitude_ft: f64,
    pub airspeed_kts: f64,
    pub east_m: f64,
    pub north_m: f64,
    pub heading_deg: f64,
}

impl Default for InitialConditions {
    fn default() -> Self {
        Self {
            altitude_ft: 1000.0,
            airspeed_kts: 60.0,
            east_m: 0.0,
            north_m: 0.0,
            heading_deg: 0.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Capability surface
// ---------------------------------------------------------------------------

/// Minimal interface the simulation loop needs from a physics engine.
pub trait FlightDynamics {
    /// Load `aircraft_id` and apply the initial conditions.
    /// Fails with [`crate::Error::CollaboratorInit`] if the model cannot be located.
    fn init(aircraft_id: &str, ic: &InitialConditions) -> Result<Self>
    where
        Self: Sized;

    /// Write a named property (control surfaces, wind components in fps).
    fn set_property(&mut self, path: &str, value: f64) -> std::result::Result<(), FdmError>;

    /// Advance the physics by `dt` seconds. Returns false on integrator failure.
    fn run_step(&mut self, dt: f64) -> bool;

    /// Current kinematic state.
    fn get_state(&self) -> SimulationState;
}
