pub mod config;
pub mod dynamics;
pub mod error;
pub mod fdm;
pub mod gnc;
pub mod io;
pub mod physics;
pub mod sim;
pub mod vehicle;

pub use config::{PilotControllerConfig, SimulationConfig};
pub use error::{ConfigError, Error, FdmError, Result};

// Flat re-exports for drivers
pub mod prelude {
    pub use crate::config::{PilotControllerConfig, SimulationConfig};
    pub use crate::dynamics::{ControlCommand, DeviationRecord, SimulationState};
    pub use crate::fdm::{FlightDynamics, InitialConditions, KinematicFdm};
    pub use crate::gnc::{Controller, ControlMode, DeviationTracker, PilotController};
    pub use crate::physics::{RelativeWind, WindModel};
    pub use crate::sim::{
        compare_strategies, simulate, simulate_with, sweep_wind_speeds, HistoryRow, RunResult,
        SimulationLoop, TerminationReason,
    };
}
