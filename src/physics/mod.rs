pub mod wind;

pub use wind::{RelativeWind, WindModel, WindVector};
