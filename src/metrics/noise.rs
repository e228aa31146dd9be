//! Noise level metric: variance of a second-derivative response.
//!
//! Speckle and jitter show up as high-frequency curvature in the depth field.
//! The variance of a Laplacian-style response over valid pixels measures that
//! curvature energy; `1 / (1 + variance / noise_threshold)` maps zero noise to
//! a perfect 1.0 with smooth decay. The reference scale defaults to 1000.0,
//! tuned for millimeter depth units.

use crate::config::MetricTuning;
use crate::metrics::kernels::laplacian_response;
use crate::types::DepthFrame;

/// Noise level score with explicit tuning.
///
/// Same minimum-valid-pixel guard as the edge metric: fewer than
/// `tuning.min_valid_pixels` valid pixels scores 0.0.
pub fn noise_level_with_tuning(frame: &DepthFrame, tuning: &MetricTuning) -> f32 {
    if frame.is_empty() || !frame.has_valid_buffer() {
        return 0.0;
    }
    if frame.valid_pixel_count() < tuning.min_valid_pixels {
        return 0.0;
    }

    let width = frame.width as usize;
    let height = frame.height as usize;
    let response = laplacian_response(&frame.data, width, height, tuning.noise_window_size);

    // Response at valid pixels only; invalid pixels are excluded from the
    // variance estimate
    let valid_response: Vec<f64> = frame
        .data
        .iter()
        .enumerate()
        .filter(|(_, &d)| DepthFrame::is_valid_depth(d))
        .map(|(i, _)| f64::from(response[i]))
        .collect();

    if valid_response.is_empty() {
        return 0.0;
    }

    let n = valid_response.len() as f64;
    let mean = valid_response.iter().sum::<f64>() / n;
    let variance = valid_response
        .iter()
        .map(|&r| {
            let diff = r - mean;
            diff * diff
        })
        .sum::<f64>()
        / n;

    let score = 1.0 / (1.0 + variance / f64::from(tuning.noise_threshold));
    score.clamp(0.0, 1.0) as f32
}

/// Noise level score with an explicit window size and otherwise default
/// tuning.
///
/// Even or undersized windows are rounded up to the next odd size >= 3.
pub fn noise_level_with_window(frame: &DepthFrame, window_size: usize) -> f32 {
    let tuning = MetricTuning {
        noise_window_size: window_size,
        ..Default::default()
    };
    noise_level_with_tuning(frame, &tuning)
}

/// Noise level score with default tuning (window size 5)
pub fn noise_level(frame: &DepthFrame) -> f32 {
    noise_level_with_tuning(frame, &MetricTuning::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn speckled_frame(width: u32, height: u32) -> DepthFrame {
        crate::testing::speckle_frame(width, height, 1000.0, 100.0, 21)
    }

    #[test]
    fn test_flat_frame_is_noise_free() {
        let frame = DepthFrame::new(vec![1500.0; 1024], 32, 32, "test".to_string());
        assert!((noise_level(&frame) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_speckle_lowers_score() {
        let frame = speckled_frame(32, 32);
        let score = noise_level(&frame);
        assert!(score < 1.0);
        assert!(score >= 0.0);
    }

    #[test]
    fn test_minimum_sample_guard() {
        let mut data = vec![0.0f32; 400];
        for v in data.iter_mut().take(99) {
            *v = 1000.0;
        }
        let frame = DepthFrame::new(data, 20, 20, "test".to_string());
        assert_eq!(noise_level(&frame), 0.0);
    }

    #[test]
    fn test_window_size_rounding() {
        let frame = speckled_frame(32, 32);
        // Even window rounds up to the next odd size
        let even = noise_level_with_window(&frame, 4);
        let odd = noise_level_with_window(&frame, 5);
        assert!((even - odd).abs() < 1e-6);
    }

    #[test]
    fn test_wider_window_stays_bounded() {
        let frame = speckled_frame(32, 32);
        let score = noise_level_with_window(&frame, 7);
        assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn test_empty_frame() {
        let frame = DepthFrame::new(Vec::new(), 0, 0, "test".to_string());
        assert_eq!(noise_level(&frame), 0.0);
    }

    #[test]
    fn test_threshold_retuning() {
        let frame = speckled_frame(32, 32);
        let strict = MetricTuning {
            noise_threshold: 1.0,
            ..Default::default()
        };
        let lenient = MetricTuning {
            noise_threshold: 1e9,
            ..Default::default()
        };
        assert!(noise_level_with_tuning(&frame, &strict) <= noise_level_with_tuning(&frame, &lenient));
    }
}
