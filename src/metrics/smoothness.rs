//! Smoothness metric: inverted coefficient of variation of valid depths.
//!
//! A spatially coherent surface has low relative dispersion in its raw depth
//! values. The coefficient of variation (stddev / mean) is scale-invariant
//! across depth ranges and sensor units, and `1 / (1 + cv)` maps zero
//! dispersion to a perfect 1.0 with smooth asymptotic decay instead of a
//! hard cutoff.

use crate::types::DepthFrame;

/// Smoothness score over valid pixels only.
///
/// Returns 0.0 when fewer than 2 valid pixels exist (variance undefined) or
/// when the valid mean is exactly zero.
pub fn smoothness(frame: &DepthFrame) -> f32 {
    if frame.is_empty() || !frame.has_valid_buffer() {
        return 0.0;
    }

    let valid: Vec<f32> = frame.valid_values().collect();
    if valid.len() < 2 {
        return 0.0;
    }

    let n = valid.len() as f64;
    let mean = valid.iter().map(|&d| f64::from(d)).sum::<f64>() / n;
    if mean == 0.0 {
        return 0.0;
    }

    let variance = valid
        .iter()
        .map(|&d| {
            let diff = f64::from(d) - mean;
            diff * diff
        })
        .sum::<f64>()
        / n;
    let cv = variance.sqrt() / mean;

    (1.0 / (1.0 + cv)).clamp(0.0, 1.0) as f32
}
