//! FaceCam Frame Model
//!
//! Defines the data contracts passed between the detector, the tracker,
//! and the renderer:
//! - **Geometry:** Frame dimensions and normalized face bounding boxes
//! - **Camera:** Tracking targets, virtual-camera state, and crop rectangles
//! - **Detections:** Per-frame detection records in JSONL form
//!
//! Bounding boxes are normalized to `[0.0, 1.0]` relative to the frame
//! they were detected in. Targets, camera state, and crops are in pixels.

pub mod camera;
pub mod detections;
pub mod geometry;

pub use camera::*;
pub use detections::*;
pub use geometry::*;
