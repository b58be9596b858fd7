use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use serde::Serialize;

use crate::gnc::angle::wrap_360;

// ---------------------------------------------------------------------------
// Wind vector
// ---------------------------------------------------------------------------

/// Steady wind: speed and the direction it blows FROM (clockwise from north).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WindVector {
    pub speed_mps: f64,
    pub direction_deg: f64,
    pub turbulence_intensity: f64,
}

/// Wind resolved against the aircraft heading for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RelativeWind {
    pub crosswind_mps: f64, // positive = from the right of the nose
    pub headwind_mps: f64,  // positive = opposing travel
}

/// North/east decomposition of a wind vector pointing at its "from" direction.
pub fn components(speed_mps: f64, direction_deg: f64) -> (f64, f64) {
    let theta = direction_deg.to_radians();
    (speed_mps * theta.cos(), speed_mps * theta.sin())
}

/// Crosswind and headwind relative to `heading_deg`.
pub fn relative(speed_mps: f64, direction_deg: f64, heading_deg: f64) -> RelativeWind {
    let rel = (direction_deg - heading_deg).to_radians();
    RelativeWind {
        crosswind_mps: speed_mps * rel.sin(),
        headwind_mps: speed_mps * rel.cos(),
    }
}

// ---------------------------------------------------------------------------
// Wind model with optional per-tick turbulence
// ---------------------------------------------------------------------------

/// Configured wind plus an owned RNG for turbulence.
///
/// Turbulence perturbs the instantaneous speed with independent zero-mean
/// Gaussian noise (std = speed * intensity) on every sample; successive
/// samples are uncorrelated.
#[derive(Debug, Clone)]
pub struct WindModel {
    base: WindVector,
    rng: StdRng,
}

impl WindModel {
    pub fn new(speed_mps: f64, direction_deg: f64, turbulence_intensity: f64) -> Self {
        Self::with_rng(speed_mps, direction_deg, turbulence_intensity, StdRng::from_os_rng())
    }

    /// Deterministic turbulence stream for reproducible runs.
    pub fn seeded(speed_mps: f64, direction_deg: f64, turbulence_intensity: f64, seed: u64) -> Self {
        Self::with_rng(speed_mps, direction_deg, turbulence_intensity, StdRng::seed_from_u64(seed))
    }

    fn with_rng(speed_mps: f64, direction_deg: f64, turbulence_intensity: f64, rng: StdRng) -> Self {
        Self {
            base: WindVector {
                speed_mps,
                direction_deg,
                turbulence_intensity,
            },
            rng,
        }
    }

    /// Wind from 90 deg (right) or 270 deg (left) for a northbound track.
    pub fn pure_crosswind(speed_mps: f64, from_right: bool) -> Self {
        let direction = if from_right { 90.0 } else { 270.0 };
        Self::new(speed_mps, direction, 0.0)
    }

    /// Combine crosswind and headwind magnitudes for a northbound track.
    /// Negative `headwind_mps` means a tailwind.
    pub fn crosswind_with_headwind(crosswind_mps: f64, headwind_mps: f64, from_right: bool) -> Self {
        let speed = crosswind_mps.hypot(headwind_mps);
        let mut direction = crosswind_mps.atan2(headwind_mps).to_degrees();
        if !from_right {
            direction = -direction;
        }
        Self::new(speed, wrap_360(direction), 0.0)
    }

    pub fn base(&self) -> &WindVector {
        &self.base
    }

    /// Crosswind/headwind of the configured (steady) wind.
    pub fn relative_to(&self, heading_deg: f64) -> RelativeWind {
        relative(self.base.speed_mps, self.base.direction_deg, heading_deg)
    }

    /// Draw this tick's wind speed, turbulence included. Never negative.
    pub fn sample_speed(&mut self) -> f64 {
        let WindVector { speed_mps, turbulence_intensity, .. } = self.base;
        if turbulence_intensity <= 0.0 || speed_mps <= 0.0 {
            return speed_mps;
        }
        match Normal::new(0.0, speed_mps * turbulence_intensity) {
            Ok(dist) => (speed_mps + dist.sample(&mut self.rng)).max(0.0),
            Err(_) => speed_mps,
        }
    }

    /// This tick's (north, east) components, pointing at the "from" direction.
    pub fn sample_components(&mut self) -> (f64, f64) {
        let speed = self.sample_speed();
        components(speed, self.base.direction_deg)
    }
}
