//! Replay recorded detections through the tracker.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use facecam_common::config::AppConfig;
use facecam_tracking::ReplayDetector;

pub fn run(detections: PathBuf, output: Option<PathBuf>, config: &AppConfig) -> anyhow::Result<()> {
    let mut replay = ReplayDetector::from_path(&detections)
        .map_err(|e| anyhow::anyhow!("Failed to load detections: {e}"))?;
    let mut session = super::build_session(config)?;

    let mut writer: Box<dyn Write> = match &output {
        Some(path) => Box::new(BufWriter::new(File::create(path).map_err(|e| {
            anyhow::anyhow!("Failed to create {}: {e}", path.display())
        })?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let mut held = 0u64;
    for _ in 0..replay.frame_count() {
        let boxes = replay.next_boxes();
        let decision = session.step(&boxes);
        if decision.held {
            held += 1;
        }
        serde_json::to_writer(&mut writer, &decision)?;
        writeln!(writer)?;
    }
    writer.flush()?;

    tracing::info!(
        frames = session.frames_processed(),
        held,
        "tracked {}",
        detections.display()
    );
    if let Some(path) = output {
        tracing::info!("Decisions written to: {}", path.display());
    }

    Ok(())
}
