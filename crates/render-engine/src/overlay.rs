//! Debug overlay drawing.
//!
//! Faces are outlined in green, the camera center is a red dot, and the
//! camera's framing square is outlined in blue. Coordinates come from
//! the canvas dimensions, so the canvas must be the frame the boxes were
//! detected in.

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_rect_mut};
use imageproc::rect::Rect;

use facecam_frame_model::camera::CameraState;
use facecam_frame_model::geometry::{BoundingBox, FrameSize};

pub const FACE_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
pub const CAMERA_CENTER_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
pub const CAMERA_FRAME_COLOR: Rgb<u8> = Rgb([0, 0, 255]);

/// Radius of the camera center marker (pixels).
pub const CENTER_MARKER_RADIUS: i32 = 10;

/// Outline thickness (pixels).
const LINE_THICKNESS: u32 = 2;

/// Outline every detected face.
pub fn draw_detections(canvas: &mut RgbImage, boxes: &[BoundingBox]) {
    let frame = FrameSize::new(canvas.width(), canvas.height());
    for b in boxes.iter().filter(|b| b.is_finite()) {
        let (left, top, right, bottom) = b.pixel_edges(frame);
        draw_thick_rect(canvas, left, top, right, bottom, FACE_COLOR);
    }
}

/// Mark the camera center and outline its framing square.
pub fn draw_camera(canvas: &mut RgbImage, camera: &CameraState) {
    if !(camera.x.is_finite() && camera.y.is_finite() && camera.z.is_finite()) {
        tracing::debug!(?camera, "skipping non-finite camera overlay");
        return;
    }

    let (cx, cy) = (
        clip_coord(camera.x, canvas.width()),
        clip_coord(camera.y, canvas.height()),
    );
    draw_filled_circle_mut(canvas, (cx, cy), CENTER_MARKER_RADIUS, CAMERA_CENTER_COLOR);

    draw_thick_rect(
        canvas,
        camera.x - camera.z,
        camera.y - camera.z,
        camera.x + camera.z,
        camera.y + camera.z,
        CAMERA_FRAME_COLOR,
    );
}

/// Full debug view: faces first, camera on top.
pub fn draw_debug_overlay(canvas: &mut RgbImage, boxes: &[BoundingBox], camera: &CameraState) {
    draw_detections(canvas, boxes);
    draw_camera(canvas, camera);
}

/// Truncate a pixel coordinate, pinned to a margin just outside the
/// canvas so offsets and rectangle sizes stay within `i32`.
fn clip_coord(value: f64, extent: u32) -> i32 {
    let margin = (LINE_THICKNESS as i32 + CENTER_MARKER_RADIUS) as f64;
    value.clamp(-margin, extent as f64 + margin) as i32
}

/// Outline the rectangle with edges `left..right` by `top..bottom`, in pixels.
fn draw_thick_rect(
    canvas: &mut RgbImage,
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
    color: Rgb<u8>,
) {
    let x = clip_coord(left, canvas.width());
    let y = clip_coord(top, canvas.height());
    let width = (clip_coord(right, canvas.width()) - x).max(0) as u32;
    let height = (clip_coord(bottom, canvas.height()) - y).max(0) as u32;

    for inset in 0..LINE_THICKNESS {
        let w = width.saturating_sub(2 * inset);
        let h = height.saturating_sub(2 * inset);
        if w == 0 || h == 0 {
            break;
        }
        let rect = Rect::at(x + inset as i32, y + inset as i32).of_size(w, h);
        draw_hollow_rect_mut(canvas, rect, color);
    }
}
