//! Particle landscape - a ripple-reactive point grid driven by scripted clicks,
//! drags and UI changes, rendered to PNG snapshots.

mod config;
mod session;

use anyhow::{Context, Result};
use config::LandscapeConfig;
use session::{FrameStats, Session};
use std::path::PathBuf;

/// Frames between progress lines in the log.
const LOG_EVERY: u64 = 60;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let config = match args.next().as_deref() {
        Some("--write-config") => {
            let path = LandscapeConfig::default().save()?;
            log::info!("Wrote default config to {:?}", path);
            return Ok(());
        }
        Some(path) => LandscapeConfig::load_from(path)?,
        None => LandscapeConfig::load(),
    };

    log::info!(
        "Starting particle landscape: {} frames at {:.4}s, strength {}",
        config.frames,
        config.frame_delta,
        config.ripple_strength
    );

    if config.snapshot_every > 0 {
        std::fs::create_dir_all(&config.output_dir)
            .with_context(|| format!("creating snapshot dir {:?}", config.output_dir))?;
    }

    let mut session = Session::new(config);
    let frames = session.config().frames;
    let snapshot_every = session.config().snapshot_every;
    let output_dir = session.config().output_dir.clone();
    let camera = session.camera();
    log::info!("Camera at {} looking at {}, fov {}", camera.position, camera.target, camera.fov_degrees);

    let mut total_added = 0;
    let mut peak: f32 = 0.0;
    let mut snapshots = 0;
    let mut last = FrameStats::default();
    for _ in 0..frames {
        last = session.step();
        total_added += last.ripples_added;
        peak = peak.max(last.peak_ripple);

        if last.frame % LOG_EVERY == 0 {
            log::info!(
                "frame {:>5}  t={:>6.2}s  ripples={:>2}  peak={:.3}  sparkling={}  visible={}",
                last.frame,
                last.time,
                last.active_ripples,
                last.peak_ripple,
                last.sparkling,
                last.visible
            );
        }

        if snapshot_every > 0 && (last.frame + 1) % snapshot_every == 0 {
            let path = snapshot_path(&output_dir, last.frame + 1);
            session
                .render()
                .save(&path)
                .with_context(|| format!("writing snapshot {:?}", path))?;
            log::debug!("Saved {:?}", path);
            snapshots += 1;
        }
    }

    log::info!(
        "Done: {} frames, {:.2}s simulated, {} ripples added ({} still active), peak height {:.3}, {} snapshots",
        frames,
        last.time,
        total_added,
        session.driver().registry().len(),
        peak,
        snapshots
    );

    Ok(())
}

fn snapshot_path(dir: &std::path::Path, frame: u64) -> PathBuf {
    dir.join(format!("frame_{frame:05}.png"))
}
