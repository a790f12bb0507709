//! Render cropped virtual-camera frames from still images.

use std::path::{Path, PathBuf};

use image::imageops;

use facecam_common::config::AppConfig;
use facecam_frame_model::geometry::FrameSize;
use facecam_render_engine::{
    draw_debug_overlay, load_frame, prepare_input, render_output, save_frame, OutputConfig,
};
use facecam_tracking::{FaceDetector, ReplayDetector};

const FRAME_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp"];

pub fn run(
    frames_dir: PathBuf,
    detections: PathBuf,
    output_dir: PathBuf,
    debug_dir: Option<PathBuf>,
    config: &AppConfig,
) -> anyhow::Result<()> {
    println!("Rendering frames from: {}", frames_dir.display());

    let frames = list_frames(&frames_dir)?;
    if frames.is_empty() {
        return Err(anyhow::anyhow!(
            "No frames found in {} (expected {})",
            frames_dir.display(),
            FRAME_EXTENSIONS.join(", ")
        ));
    }

    let mut detector = ReplayDetector::from_path(&detections)
        .map_err(|e| anyhow::anyhow!("Failed to load detections: {e}"))?;
    if detector.frame_count() > frames.len() as u64 {
        tracing::warn!(
            frames = frames.len(),
            recorded = detector.frame_count(),
            "detections cover more frames than the frame directory holds"
        );
    }

    let mut session = super::build_session(config)?;
    let capture = FrameSize::new(config.capture.width, config.capture.height);
    let output = OutputConfig::from(&config.output);

    std::fs::create_dir_all(&output_dir)?;
    if let Some(dir) = &debug_dir {
        std::fs::create_dir_all(dir)?;
    }

    println!("  Frames: {}", frames.len());
    println!("  Capture: {}x{}", capture.width, capture.height);
    println!("  Output: {}x{}", output.width, output.height);

    for path in &frames {
        let name = path
            .file_name()
            .ok_or_else(|| anyhow::anyhow!("Frame path has no file name: {}", path.display()))?;

        let source = load_frame(path)
            .map_err(|e| anyhow::anyhow!("Failed to read frame {}: {e}", path.display()))?;
        let frame = prepare_input(source, capture)?;

        let boxes = detector.detect(&frame)?;
        let decision = session.step(&boxes);

        let out = render_output(&frame, &decision.crop, &output)?;
        save_frame(&out, &output_dir.join(name))
            .map_err(|e| anyhow::anyhow!("Failed to write output frame: {e}"))?;

        if let Some(dir) = &debug_dir {
            let mut canvas = frame;
            draw_debug_overlay(&mut canvas, &boxes, &decision.camera);
            if output.mirror {
                imageops::flip_horizontal_in_place(&mut canvas);
            }
            save_frame(&canvas, &dir.join(name))
                .map_err(|e| anyhow::anyhow!("Failed to write debug frame: {e}"))?;
        }
    }

    println!(
        "\nRendered {} frames to: {}",
        session.frames_processed(),
        output_dir.display()
    );
    if let Some(dir) = debug_dir {
        println!("Debug frames in: {}", dir.display());
    }

    Ok(())
}

/// Image files in `dir`, sorted by file name.
fn list_frames(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| anyhow::anyhow!("Failed to read frame directory {}: {e}", dir.display()))?;

    let mut frames = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let is_frame = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| FRAME_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
            .unwrap_or(false);
        if path.is_file() && is_frame {
            frames.push(path);
        }
    }
    frames.sort();
    Ok(frames)
}
