//! Quality aggregation and the frame admission gate.
//!
//! Combines the four per-frame metrics into one weighted score and applies
//! the conjunctive acceptance policy that decides whether a frame may be
//! integrated into the reconstruction volume.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{AcceptanceThresholds, DepthGateConfig, MetricTuning, MetricWeights};
use crate::errors::DepthGateError;
use crate::metrics::{coverage, edge_quality_with_tuning, noise_level_with_tuning, smoothness};
use crate::types::DepthFrame;

/// Unweighted per-metric scores, each in [0.0, 1.0].
///
/// Always carries the raw metric values regardless of the weights used to
/// combine them, so callers can recover the weighting from score plus
/// breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MetricBreakdown {
    pub coverage: f32,
    pub smoothness: f32,
    pub edge_quality: f32,
    pub noise_level: f32,
}

impl MetricBreakdown {
    /// All-zero breakdown used for degenerate inputs
    pub fn zero() -> Self {
        Self::default()
    }
}

/// Weighted overall score paired with the unweighted metric breakdown
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityResult {
    /// Weighted aggregate in [0.0, 1.0]
    pub score: f32,
    pub breakdown: MetricBreakdown,
}

impl QualityResult {
    fn zero() -> Self {
        Self {
            score: 0.0,
            breakdown: MetricBreakdown::zero(),
        }
    }
}

/// Admission decision for one frame, with the evidence behind it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    /// True when the frame passed every acceptance criterion
    pub accepted: bool,
    pub score: f32,
    pub breakdown: MetricBreakdown,
    /// Sensor that produced the frame, echoed for pipeline logging
    pub sensor_id: String,
    /// Capture timestamp of the assessed frame
    pub timestamp: DateTime<Utc>,
}

/// Frame quality validator combining metric scoring and admission gating.
///
/// Holds a validated configuration; weights are normalized once at
/// construction. Assessment is stateless and side-effect free, so one
/// validator may be shared across threads assessing different frames.
#[derive(Debug, Clone)]
pub struct QualityValidator {
    tuning: MetricTuning,
    weights: MetricWeights,
    acceptance: AcceptanceThresholds,
}

impl Default for QualityValidator {
    fn default() -> Self {
        Self {
            tuning: MetricTuning::default(),
            weights: MetricWeights::default(),
            acceptance: AcceptanceThresholds::default(),
        }
    }
}

impl QualityValidator {
    /// Create a validator from a configuration.
    ///
    /// Fails fast on invalid configuration (nonpositive weight sum, even
    /// noise window, out-of-range thresholds) instead of degrading silently.
    pub fn new(config: DepthGateConfig) -> Result<Self, DepthGateError> {
        config.validate()?;
        Ok(Self {
            tuning: config.tuning,
            weights: config.weights.normalized()?,
            acceptance: config.acceptance,
        })
    }

    pub fn tuning(&self) -> &MetricTuning {
        &self.tuning
    }

    /// Normalized weights in effect
    pub fn weights(&self) -> &MetricWeights {
        &self.weights
    }

    pub fn acceptance(&self) -> &AcceptanceThresholds {
        &self.acceptance
    }

    /// Compute the weighted quality score and per-metric breakdown.
    ///
    /// Empty or corrupt frames yield the all-zero result.
    pub fn assess(&self, frame: &DepthFrame) -> QualityResult {
        if frame.is_empty() {
            log::debug!("Empty frame from {}, scoring zero", frame.sensor_id);
            return QualityResult::zero();
        }
        if !frame.has_valid_buffer() {
            log::warn!(
                "Frame from {} has {} samples for {}x{} dimensions, scoring zero",
                frame.sensor_id,
                frame.data.len(),
                frame.width,
                frame.height
            );
            return QualityResult::zero();
        }

        let breakdown = MetricBreakdown {
            coverage: coverage(frame),
            smoothness: smoothness(frame),
            edge_quality: edge_quality_with_tuning(frame, &self.tuning),
            noise_level: noise_level_with_tuning(frame, &self.tuning),
        };

        let score = self.weights.coverage * breakdown.coverage
            + self.weights.smoothness * breakdown.smoothness
            + self.weights.edge_quality * breakdown.edge_quality
            + self.weights.noise_level * breakdown.noise_level;

        QualityResult {
            score: score.clamp(0.0, 1.0),
            breakdown,
        }
    }

    /// Assess a frame and apply the acceptance thresholds.
    ///
    /// The gate is conjunctive: the overall score, coverage, and smoothness
    /// must each clear their minimum. Failing any one criterion rejects the
    /// frame even when the weighted aggregate looks acceptable, so a high
    /// edge or noise score cannot mask genuinely sparse or jittery depth.
    pub fn validate(&self, frame: &DepthFrame) -> QualityReport {
        let result = self.assess(frame);

        let meets_quality = result.score >= self.acceptance.min_quality;
        let meets_coverage = result.breakdown.coverage >= self.acceptance.min_coverage;
        let meets_smoothness = result.breakdown.smoothness >= self.acceptance.min_smoothness;
        let accepted = meets_quality && meets_coverage && meets_smoothness;

        if accepted {
            log::debug!(
                "Frame {} from {} accepted (score {:.3})",
                frame.metadata.frame_number,
                frame.sensor_id,
                result.score
            );
        } else {
            log::info!(
                "Frame {} from {} rejected: quality {} coverage {} smoothness {}",
                frame.metadata.frame_number,
                frame.sensor_id,
                meets_quality,
                meets_coverage,
                meets_smoothness
            );
        }

        QualityReport {
            accepted,
            score: result.score,
            breakdown: result.breakdown,
            sensor_id: frame.sensor_id.clone(),
            timestamp: frame.metadata.timestamp,
        }
    }

    /// Assess a batch of frames, preserving input order
    pub fn assess_batch(&self, frames: &[DepthFrame]) -> Vec<QualityResult> {
        frames.iter().map(|frame| self.assess(frame)).collect()
    }
}

/// Weighted quality score with the library's default configuration
pub fn quality(frame: &DepthFrame) -> QualityResult {
    QualityValidator::default().assess(frame)
}

/// Admission decision with the library's default weights and thresholds
pub fn is_acceptable(frame: &DepthFrame) -> QualityReport {
    QualityValidator::default().validate(frame)
}

/// Batch assessment with the library's default configuration, order-preserving
pub fn assess_batch(frames: &[DepthFrame]) -> Vec<QualityResult> {
    QualityValidator::default().assess_batch(frames)
}
