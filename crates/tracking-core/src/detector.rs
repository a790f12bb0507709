//! Face detection seam.
//!
//! The tracker never looks at pixels; it only needs boxes. Anything that
//! can turn a frame into normalized face boxes plugs in here.

use std::collections::BTreeMap;
use std::path::Path;

use image::RgbImage;

use facecam_common::{FacecamError, FacecamResult};
use facecam_frame_model::detections::{parse_detections, FrameDetections, FrameIndex};
use facecam_frame_model::geometry::BoundingBox;

/// Produces face bounding boxes for a frame.
///
/// Implementations may be stateful (e.g., replaying a recording or
/// tracking across frames), hence `&mut self`.
pub trait FaceDetector {
    fn detect(&mut self, frame: &RgbImage) -> FacecamResult<Vec<BoundingBox>>;
}

/// Replays recorded detections, one frame per call.
///
/// Frames missing from the recording yield no boxes.
#[derive(Debug, Clone, Default)]
pub struct ReplayDetector {
    frames: BTreeMap<FrameIndex, Vec<BoundingBox>>,
    cursor: FrameIndex,
}

impl ReplayDetector {
    /// Build from parsed records. Repeated frame indices are merged.
    pub fn from_records(records: Vec<FrameDetections>) -> Self {
        let mut frames: BTreeMap<FrameIndex, Vec<BoundingBox>> = BTreeMap::new();
        for record in records {
            frames.entry(record.frame).or_default().extend(record.boxes);
        }
        Self { frames, cursor: 0 }
    }

    /// Load a detections JSONL file.
    pub fn from_path(path: &Path) -> FacecamResult<Self> {
        if !path.exists() {
            return Err(FacecamError::file_not_found(path));
        }
        let content = std::fs::read_to_string(path)?;
        let records = parse_detections(&content).map_err(|e| {
            FacecamError::detection(format!("malformed detections in {}: {e}", path.display()))
        })?;
        tracing::debug!(path = %path.display(), records = records.len(), "loaded detections");
        Ok(Self::from_records(records))
    }

    /// Number of frames covered by the recording (last index + 1).
    pub fn frame_count(&self) -> u64 {
        self.frames
            .keys()
            .next_back()
            .map(|last| last + 1)
            .unwrap_or(0)
    }

    /// Index of the frame the next call will return.
    pub fn position(&self) -> FrameIndex {
        self.cursor
    }

    /// Boxes for the current frame; advances to the next frame.
    pub fn next_boxes(&mut self) -> Vec<BoundingBox> {
        let boxes = self.frames.get(&self.cursor).cloned().unwrap_or_default();
        self.cursor += 1;
        boxes
    }
}

impl FaceDetector for ReplayDetector {
    fn detect(&mut self, _frame: &RgbImage) -> FacecamResult<Vec<BoundingBox>> {
        Ok(self.next_boxes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn face(x: f64) -> BoundingBox {
        BoundingBox::new(x, 0.4, 0.1, 0.2)
    }

    #[test]
    fn test_replay_fills_gaps_with_empty_frames() {
        let mut replay = ReplayDetector::from_records(vec![
            FrameDetections::new(0, vec![face(0.1)]),
            FrameDetections::new(2, vec![face(0.5)]),
        ]);
        assert_eq!(replay.frame_count(), 3);
        assert_eq!(replay.next_boxes(), vec![face(0.1)]);
        assert!(replay.next_boxes().is_empty());
        assert_eq!(replay.next_boxes(), vec![face(0.5)]);
        assert!(replay.next_boxes().is_empty());
        assert_eq!(replay.position(), 4);
    }

    #[test]
    fn test_replay_merges_duplicate_frames() {
        let mut replay = ReplayDetector::from_records(vec![
            FrameDetections::new(0, vec![face(0.1)]),
            FrameDetections::new(0, vec![face(0.6)]),
        ]);
        assert_eq!(replay.next_boxes().len(), 2);
    }

    #[test]
    fn test_detect_ignores_pixels() {
        let mut replay = ReplayDetector::from_records(vec![FrameDetections::new(
            0,
            vec![face(0.3)],
        )]);
        let frame = RgbImage::new(4, 4);
        assert_eq!(replay.detect(&frame).unwrap(), vec![face(0.3)]);
    }

    #[test]
    fn test_missing_file_is_reported() {
        let err = ReplayDetector::from_path(Path::new("/nonexistent/detections.jsonl"))
            .unwrap_err();
        assert!(matches!(err, FacecamError::FileNotFound { .. }));
    }

    #[test]
    fn test_malformed_recording_is_a_detection_error() {
        let path = std::env::temp_dir().join("facecam_test_malformed_detections.jsonl");
        std::fs::write(&path, "{\"frame\":0,\"boxes\":[]}\n{\"frame\":\"one\"}\n").unwrap();

        let err = ReplayDetector::from_path(&path).unwrap_err();
        assert!(matches!(err, FacecamError::Detection { .. }));
        assert!(err.to_string().contains("malformed detections"));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_empty_recording() {
        let replay = ReplayDetector::default();
        assert_eq!(replay.frame_count(), 0);
    }
}
