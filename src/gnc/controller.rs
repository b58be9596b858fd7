use crate::dynamics::state::{ControlCommand, DeviationRecord, SimulationState};
use crate::physics::wind::RelativeWind;

/// Trait for pilot models.
///
/// Implement this to plug a custom correction strategy into the
/// simulation loop.
pub trait Controller {
    /// Compute control-surface commands for the current tick.
    fn compute(
        &mut self,
        state: &SimulationState,
        deviation: &DeviationRecord,
        wind: &RelativeWind,
    ) -> ControlCommand;

    /// Reset controller internal state between runs.
    fn reset(&mut self) {}

    /// Human-readable name for logging/display.
    fn name(&self) -> &str {
        "unnamed"
    }
}
