//! Testing utilities - synthetic depth and color frames for offline testing
pub mod synthetic_data;

pub use synthetic_data::{
    empty_frame, gradient_frame, sparse_frame, speckle_frame, spike_column_frame,
    synthetic_color_frame, two_plane_frame, uniform_frame,
};
