/// Replaces a non-finite value with `floor` and clamps everything below it.
pub fn sanitize(value: f64, floor: f64) -> f64 {
    if !value.is_finite() {
        return floor;
    }
    value.max(floor)
}

/// Sanitizes with a floor of zero, the default for spend/installs/LTV fields.
pub fn sanitize_non_negative(value: f64) -> f64 {
    sanitize(value, 0.0)
}

/// Rounds to a fixed number of decimal digits.
pub fn round_to(value: f64, digits: u32) -> f64 {
    let base = 10f64.powi(digits as i32);
    (value * base).round() / base
}
