//! Eased camera tracking and crop framing.
//!
//! Each frame the camera moves a fixed fraction of the way toward the
//! target (first-order exponential smoothing). Panning uses
//! `easing / pan_ratio`, zoom uses the full `easing`, so translation is
//! smoothed harder than scale.
//!
//! The crop is the square of half-extent `z` around the camera center.
//! When it spills past a frame edge it is shifted back inside, never
//! shrunk. The radius is bounded to `[MIN_RADIUS, min(w, h) / 2]` first,
//! which guarantees the shifted square fits.

use facecam_common::config::{PaddingMode, TrackingDefaults};
use facecam_common::{FacecamError, FacecamResult};
use facecam_frame_model::camera::{CameraState, CropRectangle, Target};
use facecam_frame_model::geometry::FrameSize;

/// Smallest radius the camera may take (pixels).
pub const MIN_RADIUS: f64 = 0.5;

/// Parameters of the tracking filter.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerConfig {
    /// Fraction of the remaining distance covered per frame, in (0, 1].
    pub easing: f64,

    /// Zoom padding in pixels.
    pub padding: f64,

    /// Panning runs this many times slower than zooming.
    pub pan_ratio: f64,

    /// How `padding` enters the zoom update.
    pub padding_mode: PaddingMode,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            easing: 0.05,
            padding: 25.0,
            pan_ratio: 3.0,
            padding_mode: PaddingMode::Accumulate,
        }
    }
}

impl From<&TrackingDefaults> for TrackerConfig {
    fn from(defaults: &TrackingDefaults) -> Self {
        Self {
            easing: defaults.easing,
            padding: defaults.padding,
            pan_ratio: defaults.pan_ratio,
            padding_mode: defaults.padding_mode,
        }
    }
}

impl TrackerConfig {
    /// Reject parameter combinations the filter cannot run with.
    pub fn validate(&self) -> FacecamResult<()> {
        if !(self.easing > 0.0 && self.easing <= 1.0) {
            return Err(FacecamError::config(format!(
                "easing must be in (0, 1], got {}",
                self.easing
            )));
        }
        if !(self.padding.is_finite() && self.padding >= 0.0) {
            return Err(FacecamError::config(format!(
                "padding must be a non-negative number of pixels, got {}",
                self.padding
            )));
        }
        if !(self.pan_ratio.is_finite() && self.pan_ratio > 0.0) {
            return Err(FacecamError::config(format!(
                "pan ratio must be positive, got {}",
                self.pan_ratio
            )));
        }
        Ok(())
    }
}

/// Advances camera state toward a target for a fixed frame size.
#[derive(Debug, Clone)]
pub struct CameraTracker {
    config: TrackerConfig,
    frame: FrameSize,
}

impl CameraTracker {
    /// Create a tracker, validating the configuration and frame size.
    pub fn new(config: TrackerConfig, frame: FrameSize) -> FacecamResult<Self> {
        config.validate()?;
        if !frame.is_valid() {
            return Err(FacecamError::config(format!(
                "frame dimensions must be positive, got {}x{}",
                frame.width, frame.height
            )));
        }
        Ok(Self { config, frame })
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn frame(&self) -> FrameSize {
        self.frame
    }

    /// Move the camera one frame toward `target` and frame the crop.
    pub fn advance(&self, state: CameraState, target: &Target) -> (CameraState, CropRectangle) {
        let easing = self.config.easing;
        let pan = easing / self.config.pan_ratio;

        let x = state.x + (target.x - state.x) * pan;
        let y = state.y + (target.y - state.y) * pan;

        let z = match self.config.padding_mode {
            PaddingMode::Accumulate => {
                state.z + (target.z - state.z) * easing + self.config.padding
            }
            PaddingMode::Margin => state.z + (target.z + self.config.padding - state.z) * easing,
        };

        let next = CameraState {
            x,
            y,
            z: self.bound_radius(z),
        };

        tracing::trace!(
            x = next.x,
            y = next.y,
            z = next.z,
            target_x = target.x,
            target_y = target.y,
            target_z = target.z,
            "camera advanced"
        );

        (next, crop_for(&next, self.frame))
    }

    /// Crop for an arbitrary camera state, bounding its radius first.
    pub fn crop(&self, state: &CameraState) -> CropRectangle {
        let bounded = CameraState {
            z: self.bound_radius(state.z),
            ..*state
        };
        crop_for(&bounded, self.frame)
    }

    /// Keep the radius positive and small enough for the crop to fit.
    fn bound_radius(&self, z: f64) -> f64 {
        let max = self.frame.max_radius();
        if !(z >= MIN_RADIUS) {
            tracing::debug!(z, floor = MIN_RADIUS, "zoom radius degenerate, flooring");
            MIN_RADIUS
        } else if z > max {
            tracing::debug!(z, max, "zoom radius exceeds frame, clamping");
            max
        } else {
            z
        }
    }
}

/// Square crop around the camera, shifted (not shrunk) back inside the
/// frame. Top is checked before bottom and left before right.
///
/// The result is only guaranteed to lie inside the frame when
/// `2 * state.z` fits in both dimensions; [`CameraTracker::crop`]
/// enforces that.
pub fn crop_for(state: &CameraState, frame: FrameSize) -> CropRectangle {
    let width = frame.width as f64;
    let height = frame.height as f64;
    let side = state.z * 2.0;

    let mut top = state.y - state.z;
    let mut bottom = state.y + state.z;
    let mut left = state.x - state.z;
    let mut right = state.x + state.z;

    if top < 0.0 {
        top = 0.0;
        bottom = side;
    }
    if bottom > height {
        bottom = height;
        top = height - side;
    }
    if left < 0.0 {
        left = 0.0;
        right = side;
    }
    if right > width {
        right = width;
        left = width - side;
    }

    CropRectangle {
        top,
        bottom,
        left,
        right,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tracker(easing: f64, padding: f64, frame: FrameSize) -> CameraTracker {
        CameraTracker::new(
            TrackerConfig {
                easing,
                padding,
                ..Default::default()
            },
            frame,
        )
        .unwrap()
    }

    #[test]
    fn test_component_defaults() {
        let config = TrackerConfig::default();
        assert_eq!(config.easing, 0.05);
        assert_eq!(config.padding, 25.0);
        assert_eq!(config.pan_ratio, 3.0);
        assert_eq!(config.padding_mode, PaddingMode::Accumulate);
    }

    #[test]
    fn test_single_step_formula() {
        let t = tracker(0.3, 25.0, FrameSize::new(1000, 1000));
        let (next, _) = t.advance(
            CameraState::new(100.0, 200.0, 100.0),
            &Target::new(400.0, 500.0, 200.0),
        );
        // Pan at easing / 3, zoom at full easing, then padding.
        assert!((next.x - 130.0).abs() < 1e-9);
        assert!((next.y - 230.0).abs() < 1e-9);
        assert!((next.z - 155.0).abs() < 1e-9);
    }

    #[test]
    fn test_position_converges_without_overshoot() {
        let t = tracker(0.3, 0.0, FrameSize::new(1000, 1000));
        let target = Target::new(300.0, 0.0, 100.0);
        let mut state = CameraState::new(0.0, 0.0, 100.0);

        let mut iterations = 0;
        while (target.x - state.x).abs() >= 1.0 {
            let (next, _) = t.advance(state, &target);
            assert!(next.x > state.x, "x must increase monotonically");
            assert!(next.x <= target.x, "x must not overshoot");
            state = next;
            iterations += 1;
            assert!(iterations < 200, "did not converge in 200 frames");
        }
        assert!((state.z - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_padding_accumulates_every_frame() {
        let t = tracker(0.25, 25.0, FrameSize::new(4000, 4000));
        let target = Target::new(2000.0, 2000.0, 100.0);
        let mut state = CameraState::new(2000.0, 2000.0, 100.0);

        for _ in 0..20 {
            let (next, _) = t.advance(state, &target);
            assert_eq!(next.x, state.x);
            assert_eq!(next.y, state.y);
            assert!(next.z > state.z, "z should keep climbing: {} -> {}", state.z, next.z);
            state = next;
        }
        // Equilibrium is target.z + padding / easing.
        assert!(state.z > 125.0);
        assert!(state.z < 200.0);
    }

    #[test]
    fn test_margin_padding_settles_at_target_plus_padding() {
        let t = CameraTracker::new(
            TrackerConfig {
                easing: 0.25,
                padding: 25.0,
                padding_mode: PaddingMode::Margin,
                ..Default::default()
            },
            FrameSize::new(4000, 4000),
        )
        .unwrap();
        let target = Target::new(2000.0, 2000.0, 100.0);
        let mut state = CameraState::new(2000.0, 2000.0, 100.0);

        for _ in 0..200 {
            let (next, _) = t.advance(state, &target);
            assert!(next.z <= 125.0 + 1e-9);
            state = next;
        }
        assert!((state.z - 125.0).abs() < 1e-6);
    }

    #[test]
    fn test_crop_shifts_instead_of_shrinking() {
        let crop = crop_for(&CameraState::new(10.0, 10.0, 50.0), FrameSize::new(500, 500));
        assert_eq!(crop.top, 0.0);
        assert_eq!(crop.bottom, 100.0);
        assert_eq!(crop.left, 0.0);
        assert_eq!(crop.right, 100.0);
    }

    #[test]
    fn test_crop_shifts_up_and_left_at_far_edges() {
        let crop = crop_for(&CameraState::new(480.0, 490.0, 50.0), FrameSize::new(500, 500));
        assert_eq!(crop.bottom, 500.0);
        assert_eq!(crop.top, 400.0);
        assert_eq!(crop.right, 500.0);
        assert_eq!(crop.left, 400.0);
    }

    #[test]
    fn test_unbounded_crop_can_overflow() {
        // Without radius bounding the shift cannot save an oversized square.
        let crop = crop_for(&CameraState::new(250.0, 100.0, 300.0), FrameSize::new(500, 200));
        assert!(crop.top < 0.0);
        assert!(!crop.is_within(FrameSize::new(500, 200), 0.0));
    }

    #[test]
    fn test_oversized_radius_is_clamped() {
        let frame = FrameSize::new(960, 540);
        let t = tracker(1.0, 0.0, frame);
        let (next, crop) = t.advance(
            CameraState::new(480.0, 270.0, 100.0),
            &Target::new(480.0, 270.0, 2000.0),
        );
        assert_eq!(next.z, 270.0);
        assert_eq!(crop.top, 0.0);
        assert_eq!(crop.bottom, 540.0);
        assert!(crop.is_within(frame, 0.0));
    }

    #[test]
    fn test_degenerate_radius_is_floored() {
        let frame = FrameSize::new(100, 100);
        let t = tracker(1.0, 0.0, frame);
        let (next, crop) = t.advance(
            CameraState::new(50.0, 50.0, 10.0),
            &Target::new(50.0, 50.0, 0.0),
        );
        assert_eq!(next.z, MIN_RADIUS);
        assert!(crop.width() > 0.0);
        assert!(crop.height() > 0.0);

        let crop = t.crop(&CameraState::new(50.0, 50.0, f64::NAN));
        assert_eq!(crop.width(), MIN_RADIUS * 2.0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let frame = FrameSize::new(100, 100);
        for easing in [0.0, -0.1, 1.5, f64::NAN] {
            let config = TrackerConfig {
                easing,
                ..Default::default()
            };
            assert!(CameraTracker::new(config, frame).is_err(), "easing={easing}");
        }
        let config = TrackerConfig {
            padding: -1.0,
            ..Default::default()
        };
        assert!(CameraTracker::new(config, frame).is_err());
        let config = TrackerConfig {
            pan_ratio: 0.0,
            ..Default::default()
        };
        assert!(CameraTracker::new(config, frame).is_err());
        assert!(CameraTracker::new(TrackerConfig::default(), FrameSize::new(0, 0)).is_err());
    }

    proptest! {
        #[test]
        fn prop_crop_always_inside_frame(
            width in 1u32..4000,
            height in 1u32..4000,
            x in -5000.0f64..9000.0,
            y in -5000.0f64..9000.0,
            z in 0.0f64..20000.0,
        ) {
            let frame = FrameSize::new(width, height);
            let t = tracker(0.25, 25.0, frame);
            let crop = t.crop(&CameraState::new(x, y, z));
            prop_assert!(crop.is_within(frame, 1e-6), "{crop:?} outside {width}x{height}");

            let (next, crop) = t.advance(CameraState::new(x, y, z), &Target::new(x, y, z));
            prop_assert!(next.z > 0.0);
            prop_assert!(crop.is_within(frame, 1e-6), "{crop:?} outside {width}x{height}");
        }

        #[test]
        fn prop_easing_never_overshoots(
            easing in 0.001f64..=1.0,
            start in -2000.0f64..2000.0,
            goal in -2000.0f64..2000.0,
        ) {
            let t = tracker(easing, 0.0, FrameSize::new(1000, 1000));
            let (next, _) = t.advance(
                CameraState::new(start, start, 100.0),
                &Target::new(goal, goal, 100.0),
            );
            let (lo, hi) = if start <= goal { (start, goal) } else { (goal, start) };
            prop_assert!(next.x >= lo - 1e-9 && next.x <= hi + 1e-9);
            prop_assert!(next.y >= lo - 1e-9 && next.y <= hi + 1e-9);
        }
    }
}
