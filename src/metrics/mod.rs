/// Per-frame depth quality metrics
///
/// Four independent metrics, each a pure function over one depth frame:
/// coverage, smoothness, edge quality, and noise level. All scores are
/// bounded to [0.0, 1.0] for every input, including degenerate ones.
pub mod coverage;
pub mod edge;
pub mod noise;
pub mod smoothness;

pub(crate) mod kernels;

pub use coverage::coverage;
pub use edge::{edge_quality, edge_quality_with_tuning};
pub use noise::{noise_level, noise_level_with_tuning, noise_level_with_window};
pub use smoothness::smoothness;
