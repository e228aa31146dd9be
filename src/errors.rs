use thiserror::Error;

/// Errors surfaced by configuration handling.
///
/// Metric evaluation itself never fails: degenerate frames (empty buffers,
/// too few valid pixels) fall back to bounded zero scores instead of raising
/// errors. The only fallible paths are configuration validation and config
/// file I/O.
#[derive(Debug, Error)]
pub enum DepthGateError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Config file error: {0}")]
    ConfigFile(String),
}
