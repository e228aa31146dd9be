//! Core frame types shared by all metrics.
//!
//! A depth frame is a row-major grid of range readings from a single sensor
//! capture. A sample of exactly zero means "no reading"; this is the sole
//! validity convention. Color frames are interleaved RGB8 and are only used
//! by the alignment sanity check.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Capture metadata attached to a frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameMetadata {
    /// Capture timestamp (UTC)
    pub timestamp: DateTime<Utc>,
    /// Monotonic frame counter from the producing sensor stream
    pub frame_number: u64,
}

impl FrameMetadata {
    pub fn new(frame_number: u64) -> Self {
        Self {
            timestamp: Utc::now(),
            frame_number,
        }
    }
}

/// A single depth frame from a range sensor.
///
/// Samples are stored row-major: `data[y * width + x]`. Units are whatever
/// the sensor produces (millimeters for most RGB-D hardware); the metrics are
/// scale-invariant except for the noise reference scale, which is tunable via
/// [`crate::config::MetricTuning`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepthFrame {
    pub data: Vec<f32>,
    pub width: u32,
    pub height: u32,
    pub sensor_id: String,
    pub metadata: FrameMetadata,
}

impl DepthFrame {
    /// Create a new depth frame with current timestamp
    pub fn new(data: Vec<f32>, width: u32, height: u32, sensor_id: String) -> Self {
        Self {
            data,
            width,
            height,
            sensor_id,
            metadata: FrameMetadata::new(0),
        }
    }

    /// Build a frame from raw 16-bit sensor output (e.g. millimeter depth)
    pub fn from_u16(data: &[u16], width: u32, height: u32, sensor_id: String) -> Self {
        let data = data.iter().map(|&d| f32::from(d)).collect();
        Self::new(data, width, height, sensor_id)
    }

    /// Set the frame counter (builder style)
    pub fn with_frame_number(mut self, frame_number: u64) -> Self {
        self.metadata.frame_number = frame_number;
        self
    }

    /// Total number of pixels implied by the frame dimensions
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// True when the frame has zero pixels
    pub fn is_empty(&self) -> bool {
        self.pixel_count() == 0 || self.data.is_empty()
    }

    /// True when the sample buffer matches the declared dimensions
    pub fn has_valid_buffer(&self) -> bool {
        self.data.len() == self.pixel_count()
    }

    /// Sample at (x, y), or `None` when out of bounds
    pub fn get(&self, x: u32, y: u32) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get((y * self.width + x) as usize).copied()
    }

    /// Validity test for a single sample.
    ///
    /// Zero denotes "no reading". Non-finite samples are also treated as
    /// invalid so that score bounds hold for arbitrary input bit patterns.
    pub fn is_valid_depth(value: f32) -> bool {
        value.is_finite() && value > 0.0
    }

    /// Iterator over valid samples only
    pub fn valid_values(&self) -> impl Iterator<Item = f32> + '_ {
        self.data
            .iter()
            .copied()
            .filter(|&d| Self::is_valid_depth(d))
    }

    /// Number of pixels carrying a valid reading
    pub fn valid_pixel_count(&self) -> usize {
        self.valid_values().count()
    }
}

/// An RGB8 color frame co-registered with a depth frame.
///
/// Stored interleaved, row-major: `data[(y * width + x) * 3 + channel]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorFrame {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub sensor_id: String,
}

impl ColorFrame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, sensor_id: String) -> Self {
        Self {
            data,
            width,
            height,
            sensor_id,
        }
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn is_empty(&self) -> bool {
        self.pixel_count() == 0 || self.data.is_empty()
    }

    pub fn has_valid_buffer(&self) -> bool {
        self.data.len() == self.pixel_count() * 3
    }

    /// True when at least one channel of one pixel is nonzero
    pub fn has_signal(&self) -> bool {
        self.data.iter().any(|&b| b > 0)
    }
}
