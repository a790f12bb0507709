//! Target aggregation: many faces in, one camera target out.
//!
//! The target point is the unweighted mean of the box centers. The reach
//! is half the larger side of the rectangle enclosing every box, so two
//! small faces far apart still pull the camera wide.

use facecam_common::{FacecamError, FacecamResult};
use facecam_frame_model::camera::Target;
use facecam_frame_model::geometry::{BoundingBox, FrameSize};

/// Reduce the boxes detected in one frame to a pixel-space target.
///
/// Fails with `InvalidInput` when `boxes` is empty; callers decide what
/// to do with frames that have no detections.
pub fn aggregate(boxes: &[BoundingBox], frame: FrameSize) -> FacecamResult<Target> {
    if boxes.is_empty() {
        return Err(FacecamError::invalid_input(
            "cannot aggregate an empty set of bounding boxes",
        ));
    }
    if !frame.is_valid() {
        return Err(FacecamError::invalid_input(format!(
            "frame dimensions must be positive, got {}x{}",
            frame.width, frame.height
        )));
    }
    if let Some(bad) = boxes.iter().find(|b| !b.is_finite()) {
        return Err(FacecamError::invalid_input(format!(
            "bounding box has non-finite coordinates: {bad:?}"
        )));
    }

    let (x, y) = compute_centroid(boxes, frame);
    let z = compute_reach(boxes, frame);
    Ok(Target { x, y, z })
}

/// Mean of the box centers, in pixels.
fn compute_centroid(boxes: &[BoundingBox], frame: FrameSize) -> (f64, f64) {
    let n = boxes.len() as f64;
    let (sum_x, sum_y) = boxes
        .iter()
        .map(|b| b.pixel_center(frame))
        .fold((0.0, 0.0), |(sx, sy), (x, y)| (sx + x, sy + y));
    (sum_x / n, sum_y / n)
}

/// Half the larger side of the rectangle enclosing all boxes, in pixels.
fn compute_reach(boxes: &[BoundingBox], frame: FrameSize) -> f64 {
    let w = frame.width as f64;
    let h = frame.height as f64;

    let (min_x, min_y, max_x, max_y) = boxes.iter().fold(
        (f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        |(min_x, min_y, max_x, max_y), b| {
            (
                min_x.min(b.x_min * w),
                min_y.min(b.y_min * h),
                max_x.max(b.right() * w),
                max_y.max(b.bottom() * h),
            )
        },
    );

    (max_x - min_x).max(max_y - min_y) / 2.0
}
