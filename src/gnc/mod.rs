pub mod angle;
pub mod controller;
pub mod deviation;
pub mod pilot;

pub use controller::Controller;
pub use deviation::DeviationTracker;
pub use pilot::{crab_angle_deg, ControlMode, PilotController};
