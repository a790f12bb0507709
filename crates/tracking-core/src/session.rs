//! The per-frame framing loop.
//!
//! A session owns the camera state and the last known target. Frames
//! with detections retarget the camera; frames without any keep easing
//! toward the previous target so the shot holds instead of recentering.

use serde::Serialize;

use facecam_frame_model::camera::{CameraState, CropRectangle, Target};
use facecam_frame_model::detections::FrameIndex;
use facecam_frame_model::geometry::BoundingBox;

use crate::aggregate::aggregate;
use crate::tracker::CameraTracker;

/// Everything decided for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameDecision {
    pub frame: FrameIndex,
    /// Number of usable boxes seen this frame.
    pub detections: usize,
    /// Whether the previous target was held for lack of detections.
    pub held: bool,
    pub target: Target,
    pub camera: CameraState,
    pub crop: CropRectangle,
}

/// Stateful driver around a [`CameraTracker`].
#[derive(Debug, Clone)]
pub struct FramingSession {
    tracker: CameraTracker,
    target: Target,
    camera: CameraState,
    frame_index: FrameIndex,
}

impl FramingSession {
    /// Start with camera and target at the frame center.
    pub fn new(tracker: CameraTracker, initial_radius: f64) -> Self {
        let frame = tracker.frame();
        Self::with_state(
            tracker,
            Target::centered(frame, initial_radius),
            CameraState::centered(frame, initial_radius),
        )
    }

    /// Start from an explicit target and camera state.
    pub fn with_state(tracker: CameraTracker, target: Target, camera: CameraState) -> Self {
        Self {
            tracker,
            target,
            camera,
            frame_index: 0,
        }
    }

    pub fn tracker(&self) -> &CameraTracker {
        &self.tracker
    }

    pub fn camera(&self) -> CameraState {
        self.camera
    }

    pub fn target(&self) -> Target {
        self.target
    }

    pub fn frames_processed(&self) -> u64 {
        self.frame_index
    }

    /// Process one frame's detections.
    pub fn step(&mut self, boxes: &[BoundingBox]) -> FrameDecision {
        let usable: Vec<BoundingBox> = boxes
            .iter()
            .copied()
            .filter(BoundingBox::is_near_frame)
            .collect();
        if usable.len() < boxes.len() {
            tracing::warn!(
                frame = self.frame_index,
                dropped = boxes.len() - usable.len(),
                "ignoring bounding boxes that are non-finite or far outside the frame"
            );
        }

        let held = if usable.is_empty() {
            tracing::debug!(frame = self.frame_index, "no faces detected, holding target");
            true
        } else {
            match aggregate(&usable, self.tracker.frame()) {
                Ok(target) => {
                    self.target = target;
                    false
                }
                Err(e) => {
                    tracing::warn!(frame = self.frame_index, "holding target: {e}");
                    true
                }
            }
        };

        let (camera, crop) = self.tracker.advance(self.camera, &self.target);
        self.camera = camera;

        let decision = FrameDecision {
            frame: self.frame_index,
            detections: usable.len(),
            held,
            target: self.target,
            camera,
            crop,
        };
        self.frame_index += 1;
        decision
    }
}
