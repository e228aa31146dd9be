//! Depth/color alignment sanity check.
//!
//! A coarse presence-and-shape check for RGB-D pairs headed into colored
//! reconstruction: both frames must share spatial dimensions and carry
//! nonzero content. This is explicitly NOT a pixelwise geometric alignment
//! verification; edges in the color image are never compared against depth
//! discontinuities, and no sub-pixel guarantee is implied.

use crate::types::{ColorFrame, DepthFrame};

/// Alignment sanity score for a depth/color pair: exactly 0.0 or 1.0.
///
/// Returns 0.0 when either frame is empty or corrupt, when the (height,
/// width) dimensions differ, or when either frame is entirely zero. Returns
/// 1.0 only when shapes match and both frames contain at least one nonzero
/// sample.
///
/// `depth_scale` is accepted for API stability but unused by the current
/// check; it is reserved for a future refinement that projects depth edges
/// into the color frame.
pub fn alignment_score(depth: &DepthFrame, color: &ColorFrame, _depth_scale: f32) -> f32 {
    if depth.is_empty() || color.is_empty() {
        return 0.0;
    }
    if !depth.has_valid_buffer() || !color.has_valid_buffer() {
        log::warn!(
            "Alignment check on corrupt buffers (depth {}, color {}), scoring zero",
            depth.sensor_id,
            color.sensor_id
        );
        return 0.0;
    }
    if depth.width != color.width || depth.height != color.height {
        log::debug!(
            "Depth/color shape mismatch: {}x{} vs {}x{}",
            depth.width,
            depth.height,
            color.width,
            color.height
        );
        return 0.0;
    }

    let depth_has_signal = depth.valid_pixel_count() > 0;
    if depth_has_signal && color.has_signal() {
        1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn depth(width: u32, height: u32, value: f32) -> DepthFrame {
        DepthFrame::new(
            vec![value; (width * height) as usize],
            width,
            height,
            "test".to_string(),
        )
    }

    fn color(width: u32, height: u32, value: u8) -> ColorFrame {
        ColorFrame::new(
            vec![value; (width * height * 3) as usize],
            width,
            height,
            "test".to_string(),
        )
    }

    #[test]
    fn test_matching_pair_aligns() {
        assert_eq!(alignment_score(&depth(100, 100, 1.5), &color(100, 100, 128), 1000.0), 1.0);
    }

    #[test]
    fn test_shape_mismatch() {
        assert_eq!(alignment_score(&depth(100, 100, 1.5), &color(50, 50, 128), 1000.0), 0.0);
    }

    #[test]
    fn test_both_zero() {
        assert_eq!(alignment_score(&depth(10, 10, 0.0), &color(10, 10, 0), 1000.0), 0.0);
    }

    #[test]
    fn test_zero_depth_nonzero_color() {
        assert_eq!(alignment_score(&depth(10, 10, 0.0), &color(10, 10, 200), 1000.0), 0.0);
    }

    #[test]
    fn test_nonzero_depth_zero_color() {
        assert_eq!(alignment_score(&depth(10, 10, 2.0), &color(10, 10, 0), 1000.0), 0.0);
    }

    #[test]
    fn test_empty_inputs() {
        let empty_depth = DepthFrame::new(Vec::new(), 0, 0, "test".to_string());
        let empty_color = ColorFrame::new(Vec::new(), 0, 0, "test".to_string());
        assert_eq!(alignment_score(&empty_depth, &color(10, 10, 128), 1000.0), 0.0);
        assert_eq!(alignment_score(&depth(10, 10, 1.0), &empty_color, 1000.0), 0.0);
    }

    #[test]
    fn test_depth_scale_is_inert() {
        let d = depth(10, 10, 1.5);
        let c = color(10, 10, 128);
        assert_eq!(alignment_score(&d, &c, 1000.0), alignment_score(&d, &c, 1.0));
    }
}
