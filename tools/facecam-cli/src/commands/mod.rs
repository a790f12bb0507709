pub mod config;
pub mod render;
pub mod track;

use facecam_common::config::AppConfig;
use facecam_frame_model::geometry::FrameSize;
use facecam_tracking::session::FramingSession;
use facecam_tracking::tracker::{CameraTracker, TrackerConfig};

/// Build a framing session from the effective configuration.
fn build_session(config: &AppConfig) -> anyhow::Result<FramingSession> {
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;

    let frame = FrameSize::new(config.capture.width, config.capture.height);
    let tracker = CameraTracker::new(TrackerConfig::from(&config.tracking), frame)
        .map_err(|e| anyhow::anyhow!("Invalid tracking configuration: {e}"))?;

    tracing::debug!(
        width = frame.width,
        height = frame.height,
        easing = config.tracking.easing,
        padding = config.tracking.padding,
        padding_mode = ?config.tracking.padding_mode,
        "starting framing session"
    );

    Ok(FramingSession::new(tracker, config.tracking.initial_radius))
}
