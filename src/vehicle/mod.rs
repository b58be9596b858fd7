pub mod aircraft;

pub use aircraft::{presets, AircraftBuilder, AircraftProfile};
