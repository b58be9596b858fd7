/// Wrap an angle in degrees into (-180, 180].
pub fn wrap_180(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    if r > 180.0 {
        r - 360.0
    } else {
        r
    }
}

/// Wrap an angle in degrees into [0, 360).
pub fn wrap_360(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if r >= 360.0 {
        0.0
    } else {
        r
    }
}

/// Shortest signed rotation from `current` to `target`, in (-180, 180].
pub fn heading_error(target_deg: f64, current_deg: f64) -> f64 {
    wrap_180(target_deg - current_deg)
}
