//! Numeric helpers shared across the engine

/// Basis points per whole unit.
pub const BPS_SCALE: f64 = 10_000.0;

/// Convert a basis-point figure into a plain ratio.
pub fn bps_to_ratio(bps: f64) -> f64 {
    bps / BPS_SCALE
}

/// Clamp a probability into [0, 1]. NaN collapses to 0.
pub fn clamp_probability(p: f64) -> f64 {
    p.max(0.0).min(1.0)
}

/// Mean of a sample; 0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n-1 denominator); 0 below two samples.
pub fn sample_std(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let m = mean(values);
    let var = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / (n - 1) as f64;
    var.sqrt()
}
