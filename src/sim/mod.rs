pub mod event;
pub mod integrator;
pub mod runner;
pub mod sweep;

pub use integrator::rk4_step;
pub use runner::{simulate, simulate_with, HistoryRow, RunResult, SimulationLoop, TerminationReason};
pub use sweep::{compare_strategies, sweep_wind_speeds};
