pub mod state;
pub mod kinematic;

pub use state::{ControlCommand, DeviationRecord, SimulationState};
pub use kinematic::{derivatives, KinematicState};
