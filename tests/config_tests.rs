//! Configuration round-trip and validation tests

use depthgate::{DepthGateConfig, MetricTuning, MetricWeights, QualityValidator};
use tempfile::tempdir;

#[test]
fn test_config_toml_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("depthgate.toml");

    let mut config = DepthGateConfig::default();
    config.tuning.noise_threshold = 250.0;
    config.tuning.min_valid_pixels = 400;
    config.weights.coverage = 0.7;
    config.acceptance.min_quality = 0.65;

    config.save_to_file(&path).unwrap();
    let loaded = DepthGateConfig::load_from_file(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_missing_config_file_uses_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("does_not_exist.toml");

    let loaded = DepthGateConfig::load_from_file(&path).unwrap();
    assert_eq!(loaded, DepthGateConfig::default());
}

#[test]
fn test_malformed_config_file_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "this is not toml {{{").unwrap();

    assert!(DepthGateConfig::load_from_file(&path).is_err());
}

#[test]
fn test_invalid_values_rejected_on_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("zero_weights.toml");

    let mut config = DepthGateConfig::default();
    config.weights = MetricWeights::new(0.0, 0.0, 0.0, 0.0);
    // Serialization succeeds; validation happens on load
    let contents = toml_string(&config);
    std::fs::write(&path, contents).unwrap();

    assert!(DepthGateConfig::load_from_file(&path).is_err());
}

#[test]
fn test_validator_rejects_even_window() {
    let config = DepthGateConfig {
        tuning: MetricTuning {
            noise_window_size: 6,
            ..Default::default()
        },
        ..Default::default()
    };
    assert!(QualityValidator::new(config).is_err());
}

#[test]
fn test_validator_normalizes_weights_once() {
    let config = DepthGateConfig {
        weights: MetricWeights::new(2.0, 2.0, 2.0, 2.0),
        ..Default::default()
    };
    let validator = QualityValidator::new(config).unwrap();
    assert!((validator.weights().sum() - 1.0).abs() < 1e-6);
    assert!((validator.weights().coverage - 0.25).abs() < 1e-6);
}

fn toml_string(config: &DepthGateConfig) -> String {
    toml::to_string_pretty(config).unwrap()
}
