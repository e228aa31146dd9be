//! Configuration for depth quality assessment.
//!
//! Collects the numeric thresholds that were historically hard-coded inside
//! the metric routines into one named, documented structure with sensible
//! defaults, so callers with different depth units or sensor resolutions can
//! retune without touching metric code. Supports TOML load/save for
//! deployment alongside a reconstruction pipeline.

use crate::errors::DepthGateError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DepthGateConfig {
    pub tuning: MetricTuning,
    pub weights: MetricWeights,
    pub acceptance: AcceptanceThresholds,
}

/// Numeric tuning shared by the individual metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricTuning {
    /// Minimum valid pixels required for statistically meaningful gradient
    /// and curvature estimates; frames below this score 0.0 on the edge and
    /// noise metrics
    pub min_valid_pixels: usize,
    /// Reference scale for the noise metric's variance-to-score transform.
    /// Tuned for millimeter depth units; retune when the sensor reports in
    /// different units
    pub noise_threshold: f32,
    /// Window size of the second-derivative kernel used by the noise metric
    /// (odd, >= 3)
    pub noise_window_size: usize,
    /// Percentile of the gradient magnitude used to normalize the edge
    /// metric, in (0, 100]. Guards against outlier spikes dominating the
    /// scale
    pub gradient_percentile: f32,
}

/// Per-metric aggregation weights.
///
/// Weights are normalized to sum to 1 before use; only their ratios matter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricWeights {
    pub coverage: f32,
    pub smoothness: f32,
    pub edge_quality: f32,
    pub noise_level: f32,
}

/// Minimum scores a frame must meet to be admitted for integration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AcceptanceThresholds {
    /// Minimum weighted overall score (0.0-1.0)
    pub min_quality: f32,
    /// Minimum coverage score (0.0-1.0)
    pub min_coverage: f32,
    /// Minimum smoothness score (0.0-1.0)
    pub min_smoothness: f32,
}

impl Default for MetricTuning {
    fn default() -> Self {
        Self {
            min_valid_pixels: 100,
            noise_threshold: 1000.0,
            noise_window_size: 5,
            gradient_percentile: 95.0,
        }
    }
}

impl Default for MetricWeights {
    fn default() -> Self {
        Self {
            coverage: 0.4,
            smoothness: 0.3,
            edge_quality: 0.2,
            noise_level: 0.1,
        }
    }
}

impl Default for AcceptanceThresholds {
    fn default() -> Self {
        Self {
            min_quality: 0.5,
            min_coverage: 0.3,
            min_smoothness: 0.4,
        }
    }
}

impl MetricTuning {
    /// Validate tuning parameters
    pub fn validate(&self) -> Result<(), DepthGateError> {
        if self.noise_window_size < 3 || self.noise_window_size % 2 == 0 {
            return Err(DepthGateError::InvalidConfig(format!(
                "noise_window_size must be odd and >= 3, got {}",
                self.noise_window_size
            )));
        }
        if !(self.gradient_percentile > 0.0 && self.gradient_percentile <= 100.0) {
            return Err(DepthGateError::InvalidConfig(format!(
                "gradient_percentile must be in (0, 100], got {}",
                self.gradient_percentile
            )));
        }
        if !self.noise_threshold.is_finite() || self.noise_threshold <= 0.0 {
            return Err(DepthGateError::InvalidConfig(format!(
                "noise_threshold must be finite and positive, got {}",
                self.noise_threshold
            )));
        }
        Ok(())
    }
}

impl MetricWeights {
    pub fn new(coverage: f32, smoothness: f32, edge_quality: f32, noise_level: f32) -> Self {
        Self {
            coverage,
            smoothness,
            edge_quality,
            noise_level,
        }
    }

    pub fn sum(&self) -> f32 {
        self.coverage + self.smoothness + self.edge_quality + self.noise_level
    }

    /// Return the weights scaled to sum to 1.
    ///
    /// A nonpositive sum (all weights zero, or garbage from a config file) is
    /// an explicit configuration error rather than a silent fallback.
    pub fn normalized(&self) -> Result<MetricWeights, DepthGateError> {
        self.validate()?;
        let total = self.sum();
        Ok(Self {
            coverage: self.coverage / total,
            smoothness: self.smoothness / total,
            edge_quality: self.edge_quality / total,
            noise_level: self.noise_level / total,
        })
    }

    /// Validate that all weights are nonnegative and sum to a positive total
    pub fn validate(&self) -> Result<(), DepthGateError> {
        let all = [
            ("coverage", self.coverage),
            ("smoothness", self.smoothness),
            ("edge_quality", self.edge_quality),
            ("noise_level", self.noise_level),
        ];
        for (name, w) in all {
            if !w.is_finite() || w < 0.0 {
                return Err(DepthGateError::InvalidConfig(format!(
                    "{} weight must be finite and nonnegative, got {}",
                    name, w
                )));
            }
        }
        if self.sum() <= 0.0 {
            return Err(DepthGateError::InvalidConfig(
                "metric weights must sum to a positive value".to_string(),
            ));
        }
        Ok(())
    }
}

impl AcceptanceThresholds {
    /// Validate that all thresholds lie in [0, 1]
    pub fn validate(&self) -> Result<(), DepthGateError> {
        let all = [
            ("min_quality", self.min_quality),
            ("min_coverage", self.min_coverage),
            ("min_smoothness", self.min_smoothness),
        ];
        for (name, t) in all {
            if !(0.0..=1.0).contains(&t) {
                return Err(DepthGateError::InvalidConfig(format!(
                    "{} must be in [0, 1], got {}",
                    name, t
                )));
            }
        }
        Ok(())
    }
}

impl DepthGateConfig {
    /// Validate the whole configuration
    pub fn validate(&self) -> Result<(), DepthGateError> {
        self.tuning.validate()?;
        self.weights.validate()?;
        self.acceptance.validate()
    }

    /// Load configuration from TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, DepthGateError> {
        let path = path.as_ref();

        if !path.exists() {
            log::info!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|e| {
            DepthGateError::ConfigFile(format!("Failed to read config file: {}", e))
        })?;

        let config: DepthGateConfig = toml::from_str(&contents).map_err(|e| {
            DepthGateError::ConfigFile(format!("Failed to parse config file: {}", e))
        })?;

        config.validate()?;
        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), DepthGateError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                DepthGateError::ConfigFile(format!("Failed to create config directory: {}", e))
            })?;
        }

        let contents = toml::to_string_pretty(self).map_err(|e| {
            DepthGateError::ConfigFile(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(path, contents).map_err(|e| {
            DepthGateError::ConfigFile(format!("Failed to write config file: {}", e))
        })?;

        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }
}
