//! Virtual-camera output frames.

use std::path::Path;

use image::imageops::{self, FilterType};
use image::RgbImage;

use facecam_common::config::OutputDefaults;
use facecam_common::{FacecamError, FacecamResult};
use facecam_frame_model::camera::CropRectangle;
use facecam_frame_model::geometry::FrameSize;

/// How cropped frames are scaled for output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutputConfig {
    pub width: u32,
    pub height: u32,
    /// Flip horizontally after scaling.
    pub mirror: bool,
    pub filter: FilterType,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from(&OutputDefaults::default())
    }
}

impl From<&OutputDefaults> for OutputConfig {
    fn from(defaults: &OutputDefaults) -> Self {
        Self {
            width: defaults.width,
            height: defaults.height,
            mirror: defaults.mirror,
            filter: FilterType::Triangle,
        }
    }
}

/// Read a still frame from disk as RGB.
pub fn load_frame(path: &Path) -> FacecamResult<RgbImage> {
    if !path.exists() {
        return Err(FacecamError::file_not_found(path));
    }
    Ok(image::open(path)?.to_rgb8())
}

/// Write a frame; the format follows the file extension.
pub fn save_frame(frame: &RgbImage, path: &Path) -> FacecamResult<()> {
    frame.save(path)?;
    Ok(())
}

/// Scale a captured frame to the tracking resolution.
///
/// Returns the frame untouched when it already has that size.
pub fn prepare_input(frame: RgbImage, size: FrameSize) -> FacecamResult<RgbImage> {
    if !size.is_valid() {
        return Err(FacecamError::render(format!(
            "capture size must be positive, got {}x{}",
            size.width, size.height
        )));
    }
    if frame.width() == 0 || frame.height() == 0 {
        return Err(FacecamError::render("input frame is empty"));
    }
    if frame.dimensions() == (size.width, size.height) {
        return Ok(frame);
    }
    Ok(imageops::resize(
        &frame,
        size.width,
        size.height,
        FilterType::Triangle,
    ))
}

/// Cut the crop out of `source` and scale it to the output size.
pub fn render_output(
    source: &RgbImage,
    crop: &CropRectangle,
    config: &OutputConfig,
) -> FacecamResult<RgbImage> {
    if config.width == 0 || config.height == 0 {
        return Err(FacecamError::render(format!(
            "output size must be positive, got {}x{}",
            config.width, config.height
        )));
    }
    if source.width() == 0 || source.height() == 0 {
        return Err(FacecamError::render("source frame is empty"));
    }

    let frame = FrameSize::new(source.width(), source.height());
    let bounds = crop.pixel_bounds(frame);
    tracing::trace!(
        x = bounds.x,
        y = bounds.y,
        width = bounds.width,
        height = bounds.height,
        "cropping output frame"
    );

    let cropped =
        imageops::crop_imm(source, bounds.x, bounds.y, bounds.width, bounds.height).to_image();
    let scaled = imageops::resize(&cropped, config.width, config.height, config.filter);

    if config.mirror {
        Ok(imageops::flip_horizontal(&scaled))
    } else {
        Ok(scaled)
    }
}
