//! Per-frame detection records.
//!
//! Detector output is stored as JSONL, one frame per line:
//!
//! ```text
//! {"frame":0,"boxes":[{"x_min":0.4,"y_min":0.3,"width":0.2,"height":0.3}]}
//! {"frame":1,"boxes":[]}
//! ```
//!
//! Blank lines and lines starting with `#` are ignored.

use serde::{Deserialize, Serialize};

use crate::geometry::BoundingBox;

/// Zero-based frame index within a feed.
pub type FrameIndex = u64;

/// Faces detected in one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameDetections {
    pub frame: FrameIndex,
    #[serde(default)]
    pub boxes: Vec<BoundingBox>,
}

impl FrameDetections {
    pub fn new(frame: FrameIndex, boxes: Vec<BoundingBox>) -> Self {
        Self { frame, boxes }
    }
}

/// Parse detections from JSONL content (one JSON object per line).
pub fn parse_detections(jsonl: &str) -> Result<Vec<FrameDetections>, serde_json::Error> {
    jsonl
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(serde_json::from_str)
        .collect()
}
