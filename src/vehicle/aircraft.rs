// ---------------------------------------------------------------------------
// Aircraft profile (handling limits for the kinematic flight model)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct AircraftProfile {
    pub id: String,
    pub name: String,
    pub max_bank_deg: f64,         // bank limit
    pub max_roll_rate_dps: f64,    // roll rate at full aileron
    pub max_pitch_deg: f64,        // pitch reached at full elevator
    pub max_yaw_rate_dps: f64,     // flat yaw rate at full rudder
    pub roll_stability_tau: f64,   // s, wings-level return time constant
    pub pitch_tau: f64,          // s, pitch response time constant
    pub stall_speed_kts: f64,
}

impl AircraftProfile {
    pub fn stall_speed_mps(&self) -> f64 {
        self.stall_speed_kts * crate::dynamics::state::KTS_TO_MPS
    }
}

// ---------------------------------------------------------------------------
// Aircraft builder
// ---------------------------------------------------------------------------

pub struct AircraftBuilder {
    id: String,
    name: String,
    max_bank_deg: f64,
    max_roll_rate_dps: f64,
    max_pitch_deg: f64,
    max_yaw_rate_dps: f64,
    roll_stability_tau: f64,
    pitch_tau: f64,
    stall_speed_kts: f64,
}

impl AircraftBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            max_bank_deg: 60.0,
            max_roll_rate_dps: 30.0,
            max_pitch_deg: 15.0,
            max_yaw_rate_dps: 3.0,
            roll_stability_tau: 4.0,
            pitch_tau: 0.8,
            stall_speed_kts: 45.0,
        }
    }

    pub fn name(mut self, v: impl Into<String>) -> Self { self.name = v.into(); self }
    pub fn max_bank_deg(mut self, v: f64) -> Self { self.max_bank_deg = v; self }
    pub fn max_roll_rate_dps(mut self, v: f64) -> Self { self.max_roll_rate_dps = v; self }
    pub fn max_pitch_deg(mut self, v: f64) -> Self { self.max_pitch_deg = v; self }
    pub fn max_yaw_rate_dps(mut self, v: f64) -> Self { self.max_yaw_rate_dps = v; self }
    pub fn roll_stability_tau(mut self, v: f64) -> Self { self.roll_stability_tau = v; self }
    pub fn pitch_tau(mut self, v: f64) -> Self { self.pitch_tau = v; self }
    pub fn stall_speed_kts(mut self, v: f64) -> Self { self.stall_speed_kts = v; self }

    pub fn build(self) -> AircraftProfile {
        AircraftProfile {
            id: self.id,
            name: self.name,
            max_bank_deg: self.max_bank_deg,
            max_roll_rate_dps: self.max_roll_rate_dps,
            max_pitch_deg: self.max_pitch_deg,
            max_yaw_rate_dps: self.max_yaw_rate_dps,
            roll_stability_tau: self.roll_stability_tau,
            pitch_tau: self.pitch_tau,
            stall_speed_kts: self.stall_speed_kts,
        }
    }
}

// ---------------------------------------------------------------------------
// Preset aircraft
// ---------------------------------------------------------------------------

pub mod presets {
    use super::*;

    /// Cessna 172P.
    pub fn c172p() -> AircraftProfile {
        AircraftBuilder::new("c172p")
            .name("Cessna 172P Skyhawk")
            .max_bank_deg(60.0)
            .max_roll_rate_dps(30.0)
            .roll_stability_tau(4.0)
            .pitch_tau(0.8)
            .stall_speed_kts(48.0)
            .build()
    }

    /// Piper PA-28 Cherokee.
    pub fn pa28() -> AircraftProfile {
        AircraftBuilder::new("pa28")
            .name("Piper PA-28 Cherokee")
            .max_bank_deg(60.0)
            .max_roll_rate_dps(28.0)
            .roll_stability_tau(4.0)
            .pitch_tau(0.9)
            .stall_speed_kts(50.0)
            .build()
    }

    /// Piper J-3 Cub. Light and slow to roll.
    pub fn j3cub() -> AircraftProfile {
        AircraftBuilder::new("j3cub")
            .name("Piper J-3 Cub")
            .max_bank_deg(45.0)
            .max_roll_rate_dps(20.0)
            .max_yaw_rate_dps(5.0)
            .roll_stability_tau(5.0)
            .pitch_tau(1.0)
            .stall_speed_kts(33.0)
            .build()
    }

    /// Look up a preset by its identifier (case-insensitive).
    pub fn by_id(id: &str) -> Option<AircraftProfile> {
        match id.to_ascii_lowercase().as_str() {
            "c172p" | "c172" => Some(c172p()),
            "pa28" => Some(pa28()),
            "j3cub" => Some(j3cub()),
            _ => None,
        }
    }

    pub const KNOWN_IDS: &[&str] = &["c172p", "pa28", "j3cub"];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(presets::by_id("C172P").map(|a| a.id), Some("c172p".to_string()));
        assert!(presets::by_id("concorde").is_none());
    }

    #[test]
    fn every_known_id_resolves() {
        for id in presets::KNOWN_IDS {
            let a = presets::by_id(id).expect("known preset");
            assert!(a.roll_stability_tau > 0.0 && a.pitch_tau > 0.0);
            assert!(a.max_roll_rate_dps > 0.0 && a.max_bank_deg > 0.0);
        }
    }
}
