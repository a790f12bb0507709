//! FaceCam Tracking Core: the virtual camera operator
//!
//! Turns per-frame face detections into a smoothly moving crop:
//! - **Aggregation:** Reduce detected faces to one target point and reach
//! - **Tracking:** Ease the camera toward the target and frame a crop
//! - **Session:** Drive the per-frame loop and hold the target when no
//!   faces are visible
//!
//! Aggregation and tracking are pure computation. Camera state is an
//! explicit value owned by the caller's frame loop.

pub mod aggregate;
pub mod detector;
pub mod session;
pub mod tracker;

pub use aggregate::aggregate;
pub use detector::{FaceDetector, ReplayDetector};
pub use session::{FrameDecision, FramingSession};
pub use tracker::{CameraTracker, TrackerConfig};
