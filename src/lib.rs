//! DepthGate: per-frame depth quality scoring and admission gating
//!
//! This crate assesses the quality of a depth sensor frame before it is
//! admitted into a volumetric reconstruction pipeline (e.g. a TSDF
//! integrator). Sparse, noisy, or blurred depth frames corrupt the
//! reconstructed surface; DepthGate computes a bounded quality score and a
//! binary admission decision so callers can discard or down-weight bad
//! frames prior to integration.
//!
//! # Features
//! - Four independent per-frame metrics: coverage, smoothness, edge quality,
//!   noise level
//! - Weighted aggregation into a single score plus per-metric breakdown
//! - Conjunctive acceptance gate with configurable thresholds
//! - Depth/color alignment sanity check for RGB-D pairs
//! - TOML configuration for retuning to different sensors and depth units
//!
//! # Usage
//! ```rust
//! use depthgate::{is_acceptable, testing::uniform_frame};
//!
//! let frame = uniform_frame(640, 480, 1500.0);
//! let report = is_acceptable(&frame);
//! if report.accepted {
//!     // hand the frame to the integrator
//! }
//! ```
//!
//! All scores are bounded to [0.0, 1.0] for every input, including degenerate
//! ones (empty frames, all-invalid frames, corrupt buffers); degenerate
//! inputs fall back to zero scores rather than raising errors.
pub mod alignment;
pub mod config;
pub mod errors;
pub mod metrics;
pub mod types;
pub mod validator;

// Testing utilities - synthetic data for offline testing
pub mod testing;

// Re-exports for convenience
pub use alignment::alignment_score;
pub use config::{AcceptanceThresholds, DepthGateConfig, MetricTuning, MetricWeights};
pub use errors::DepthGateError;
pub use metrics::{coverage, edge_quality, noise_level, noise_level_with_window, smoothness};
pub use types::{ColorFrame, DepthFrame, FrameMetadata};
pub use validator::{
    assess_batch, is_acceptable, quality, MetricBreakdown, QualityReport, QualityResult,
    QualityValidator,
};

/// Initialize logging for the assessment pipeline
pub fn init_logging() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "depthgate=info");
    }
    let _ = env_logger::try_init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
