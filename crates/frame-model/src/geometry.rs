//! Frame dimensions and face bounding boxes.
//!
//! Bounding boxes are normalized: `(0.0, 0.0)` is the top-left and
//! `(1.0, 1.0)` the bottom-right of the frame fed to the detector.

use serde::{Deserialize, Serialize};

/// Pixel dimensions of a video frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl FrameSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Both dimensions are non-zero.
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Center point in pixels.
    pub fn center(&self) -> (f64, f64) {
        (self.width as f64 / 2.0, self.height as f64 / 2.0)
    }

    /// Largest radius whose square still fits inside the frame.
    pub fn max_radius(&self) -> f64 {
        self.width.min(self.height) as f64 / 2.0
    }
}

/// A detected face, normalized to the frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge (normalized).
    #[serde(alias = "xmin")]
    pub x_min: f64,
    /// Top edge (normalized).
    #[serde(alias = "ymin")]
    pub y_min: f64,
    /// Width (normalized).
    pub width: f64,
    /// Height (normalized).
    pub height: f64,
}

/// How far past the frame edge (normalized) a box may reach and still
/// count as a detection. Detectors report faces cut off by the edge with
/// edges slightly outside `[0, 1]`.
pub const EDGE_SLACK: f64 = 1.0;

impl BoundingBox {
    pub fn new(x_min: f64, y_min: f64, width: f64, height: f64) -> Self {
        Self {
            x_min,
            y_min,
            width,
            height,
        }
    }

    /// Right edge (normalized).
    pub fn right(&self) -> f64 {
        self.x_min + self.width
    }

    /// Bottom edge (normalized).
    pub fn bottom(&self) -> f64 {
        self.y_min + self.height
    }

    /// The center point of this box (normalized).
    pub fn center(&self) -> (f64, f64) {
        (self.x_min + self.width / 2.0, self.y_min + self.height / 2.0)
    }

    /// Center point scaled to frame pixels.
    pub fn pixel_center(&self, frame: FrameSize) -> (f64, f64) {
        let (cx, cy) = self.center();
        (cx * frame.width as f64, cy * frame.height as f64)
    }

    /// Left, top, right and bottom edges scaled to frame pixels.
    pub fn pixel_edges(&self, frame: FrameSize) -> (f64, f64, f64, f64) {
        let w = frame.width as f64;
        let h = frame.height as f64;
        (
            self.x_min * w,
            self.y_min * h,
            self.right() * w,
            self.bottom() * h,
        )
    }

    /// All four components are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.x_min.is_finite()
            && self.y_min.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
    }

    /// Finite, non-negative in size, and no further than [`EDGE_SLACK`]
    /// outside the frame on any side.
    pub fn is_near_frame(&self) -> bool {
        let in_range = |v: f64| (-EDGE_SLACK..=1.0 + EDGE_SLACK).contains(&v);
        self.is_finite()
            && self.width >= 0.0
            && self.height >= 0.0
            && in_range(self.x_min)
            && in_range(self.y_min)
            && in_range(self.right())
            && in_range(self.bottom())
    }
}
