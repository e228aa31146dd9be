//! Edge quality metric: normalized mean Sobel gradient magnitude.
//!
//! A frame with well-defined object-boundary discontinuities produces a
//! higher mean gradient than a flat or sensor-smeared one. This is a heuristic
//! proxy for boundary sharpness, not a measure of segmentation accuracy.

use crate::config::MetricTuning;
use crate::metrics::kernels::sobel_gradients;
use crate::types::DepthFrame;

/// Edge quality score with explicit tuning.
///
/// Requires `tuning.min_valid_pixels` valid pixels, otherwise 0.0: gradient
/// statistics on near-empty frames are unreliable. The gradient magnitude is
/// normalized by its `tuning.gradient_percentile` value among valid pixels so
/// a few outlier spikes cannot dominate the scale; when that percentile is 0
/// the magnitudes are left unnormalized.
pub fn edge_quality_with_tuning(frame: &DepthFrame, tuning: &MetricTuning) -> f32 {
    if frame.is_empty() || !frame.has_valid_buffer() {
        return 0.0;
    }
    if frame.valid_pixel_count() < tuning.min_valid_pixels {
        return 0.0;
    }

    let width = frame.width as usize;
    let height = frame.height as usize;
    let (gx, gy) = sobel_gradients(&frame.data, width, height);

    // Magnitudes at valid pixels; invalid pixels contribute nothing to the
    // normalization percentile or the mean
    let mut valid_magnitudes: Vec<f32> = frame
        .data
        .iter()
        .enumerate()
        .filter(|(_, &d)| DepthFrame::is_valid_depth(d))
        .map(|(i, _)| (gx[i] * gx[i] + gy[i] * gy[i]).sqrt())
        .collect();

    if valid_magnitudes.is_empty() {
        return 0.0;
    }

    valid_magnitudes.sort_by(|a, b| a.total_cmp(b));
    let scale = percentile_linear(&valid_magnitudes, tuning.gradient_percentile);

    let n = valid_magnitudes.len() as f64;
    let sum: f64 = valid_magnitudes.iter().map(|&m| f64::from(m)).sum();
    let mean = if scale > 0.0 {
        sum / f64::from(scale) / n
    } else {
        sum / n
    };

    mean.clamp(0.0, 1.0) as f32
}

/// Edge quality score with default tuning
pub fn edge_quality(frame: &DepthFrame) -> f32 {
    edge_quality_with_tuning(frame, &MetricTuning::default())
}

/// Percentile of a sorted slice by linear interpolation between order
/// statistics (rank `p / 100 * (n - 1)`).
fn percentile_linear(sorted: &[f32], p: f32) -> f32 {
    if sorted.is_empty() {
        return 0.0;
    }
    let rank = (f64::from(p) / 100.0 * (sorted.len() - 1) as f64).clamp(0.0, (sorted.len() - 1) as f64);
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        return sorted[lower];
    }
    let frac = (rank - lower as f64) as f32;
    sorted[lower] + (sorted[upper] - sorted[lower]) * frac
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentile_interpolation() {
        let values: Vec<f32> = (0..=10).map(|v| v as f32).collect();
        assert!((percentile_linear(&values, 95.0) - 9.5).abs() < 1e-6);
        assert!((percentile_linear(&values, 50.0) - 5.0).abs() < 1e-6);
        assert!((percentile_linear(&values, 100.0) - 10.0).abs() < 1e-6);
        assert!((percentile_linear(&values, 0.0)).abs() < 1e-6);
    }

    #[test]
    fn test_percentile_single_value() {
        assert_eq!(percentile_linear(&[3.0], 95.0), 3.0);
        assert_eq!(percentile_linear(&[], 95.0), 0.0);
    }

    #[test]
    fn test_flat_frame_has_no_edges() {
        let frame = DepthFrame::new(vec![2.0; 1024], 32, 32, "test".to_string());
        assert_eq!(edge_quality(&frame), 0.0);
    }

    #[test]
    fn test_step_edge_scores_positive() {
        // Two-plane scene: left half near, right half far
        let width = 32;
        let height = 32;
        let data: Vec<f32> = (0..width * height)
            .map(|i| if i % width < width / 2 { 1.0 } else { 4.0 })
            .collect();
        let frame = DepthFrame::new(data, width as u32, height as u32, "test".to_string());

        let score = edge_quality(&frame);
        assert!(score > 0.0);
        assert!(score <= 1.0);
    }

    #[test]
    fn test_minimum_sample_guard() {
        let mut data = vec![0.0f32; 400];
        for v in data.iter_mut().take(99) {
            *v = 2.0;
        }
        let frame = DepthFrame::new(data, 20, 20, "test".to_string());
        assert_eq!(edge_quality(&frame), 0.0);
    }

    #[test]
    fn test_guard_is_configurable() {
        let mut data = vec![0.0f32; 400];
        for v in data.iter_mut().take(99) {
            *v = 2.0;
        }
        let frame = DepthFrame::new(data, 20, 20, "test".to_string());

        let tuning = MetricTuning {
            min_valid_pixels: 10,
            ..Default::default()
        };
        // Uniform valid region: gradients only at the validity boundary
        let score = edge_quality_with_tuning(&frame, &tuning);
        assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn test_empty_frame() {
        let frame = DepthFrame::new(Vec::new(), 0, 0, "test".to_string());
        assert_eq!(edge_quality(&frame), 0.0);
    }
}
