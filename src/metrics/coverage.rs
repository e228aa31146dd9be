//! Coverage metric: fraction of pixels carrying a valid reading.
//!
//! Sparse frames (occlusions, absorbing surfaces, sensor dropouts) integrate
//! poorly into a volumetric grid; coverage is the cheapest early signal.

use crate::types::DepthFrame;

/// Fraction of pixels with a valid (nonzero) depth reading.
///
/// Returns 0.0 for an empty frame or one whose buffer does not match its
/// declared dimensions.
pub fn coverage(frame: &DepthFrame) -> f32 {
    if frame.is_empty() || !frame.has_valid_buffer() {
        return 0.0;
    }

    let valid = frame.valid_pixel_count() as f64;
    let total = frame.pixel_count() as f64;
    (valid / total) as f32
}
