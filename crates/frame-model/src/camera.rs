//! Virtual-camera types: tracking targets, camera state, and crops.
//!
//! All values here are in frame pixels. `z` is a half-extent: the camera
//! frames the square `(x - z, y - z)..(x + z, y + z)`.

use serde::{Deserialize, Serialize};

use crate::geometry::FrameSize;

/// Where the camera wants to be this frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub x: f64,
    pub y: f64,
    /// Reach radius (pixels).
    pub z: f64,
}

impl Target {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Target at the frame center with the given reach.
    pub fn centered(frame: FrameSize, z: f64) -> Self {
        let (x, y) = frame.center();
        Self { x, y, z }
    }
}

/// Persistent virtual-camera position and zoom radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    pub x: f64,
    pub y: f64,
    /// Zoom radius (pixels). Always positive.
    pub z: f64,
}

impl CameraState {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Camera at the frame center with the given radius.
    pub fn centered(frame: FrameSize, z: f64) -> Self {
        let (x, y) = frame.center();
        Self { x, y, z }
    }

    /// Distance from this camera's center to the target's center.
    pub fn distance_to(&self, target: &Target) -> f64 {
        ((self.x - target.x).powi(2) + (self.y - target.y).powi(2)).sqrt()
    }
}

/// Pixel bounds of the region cut from the source frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropRectangle {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

/// Integer crop window, ready for slicing an image buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelBounds {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRectangle {
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Whether the rectangle lies inside `[0, width] x [0, height]`,
    /// allowing `tolerance` pixels of floating-point slack.
    pub fn is_within(&self, frame: FrameSize, tolerance: f64) -> bool {
        self.top >= -tolerance
            && self.left >= -tolerance
            && self.bottom <= frame.height as f64 + tolerance
            && self.right <= frame.width as f64 + tolerance
            && self.width() > 0.0
            && self.height() > 0.0
    }

    /// Truncate to whole pixels, clamped to the frame and at least 1x1.
    pub fn pixel_bounds(&self, frame: FrameSize) -> PixelBounds {
        let max_x = frame.width.saturating_sub(1);
        let max_y = frame.height.saturating_sub(1);

        let x = (self.left.trunc().max(0.0) as u32).min(max_x);
        let y = (self.top.trunc().max(0.0) as u32).min(max_y);
        let right = (self.right.trunc().max(0.0) as u32).clamp(x + 1, frame.width.max(x + 1));
        let bottom = (self.bottom.trunc().max(0.0) as u32).clamp(y + 1, frame.height.max(y + 1));

        PixelBounds {
            x,
            y,
            width: right - x,
            height: bottom - y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_state() {
        let state = CameraState::centered(FrameSize::new(960, 540), 100.0);
        assert_eq!(state, CameraState::new(480.0, 270.0, 100.0));

        let target = Target::centered(FrameSize::new(960, 540), 100.0);
        assert_eq!(state.distance_to(&target), 0.0);
    }

    #[test]
    fn test_crop_dimensions() {
        let crop = CropRectangle {
            top: 10.0,
            bottom: 110.0,
            left: 20.0,
            right: 220.0,
        };
        assert_eq!(crop.width(), 200.0);
        assert_eq!(crop.height(), 100.0);
        assert!(crop.is_within(FrameSize::new(500, 500), 0.0));
        assert!(!crop.is_within(FrameSize::new(200, 500), 0.0));
    }

    #[test]
    fn test_pixel_bounds_truncates_and_clamps() {
        let frame = FrameSize::new(100, 80);
        let crop = CropRectangle {
            top: 9.6,
            bottom: 70.4,
            left: -0.3,
            right: 100.2,
        };
        let bounds = crop.pixel_bounds(frame);
        assert_eq!(
            bounds,
            PixelBounds {
                x: 0,
                y: 9,
                width: 100,
                height: 61
            }
        );
    }

    #[test]
    fn test_pixel_bounds_never_empty() {
        let frame = FrameSize::new(50, 50);
        let crop = CropRectangle {
            top: 20.1,
            bottom: 20.2,
            left: 60.0,
            right: 61.0,
        };
        let bounds = crop.pixel_bounds(frame);
        assert!(bounds.width >= 1 && bounds.height >= 1);
        assert!(bounds.x + bounds.width <= frame.width);
        assert!(bounds.y + bounds.height <= frame.height);
    }
}
