//! Headless SVG export: single snapshots and numbered frame sequences.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use halftone_core::{App, SvgSurface};

/// Advance `app` to `at_sec` and render one SVG document.
pub fn render_at(app: &mut App, at_sec: f64) -> String {
    let dt = at_sec - app.clock().now_sec();
    app.tick(dt);
    let mut svg = SvgSurface::new();
    app.draw(&mut svg);
    svg.into_document()
}

fn write_file(path: &Path, contents: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, contents).with_context(|| format!("write svg '{}'", path.display()))
}

pub fn snapshot(app: &mut App, at_sec: f64, out: &Path) -> anyhow::Result<()> {
    anyhow::ensure!(
        at_sec.is_finite() && at_sec >= 0.0,
        "snapshot time must be finite and not negative (got {at_sec})"
    );
    let doc = render_at(app, at_sec);
    write_file(out, &doc)?;
    log::info!("[export] wrote {} (t={at_sec:.2}s)", out.display());
    Ok(())
}

pub fn frame_path(out_dir: &Path, index: usize) -> PathBuf {
    out_dir.join(format!("frame_{index:05}.svg"))
}

/// Write `fps * duration_sec` frames, one per tick of a fixed-rate clock.
pub fn frames(app: &mut App, fps: u32, duration_sec: f64, out_dir: &Path) -> anyhow::Result<usize> {
    anyhow::ensure!(fps > 0, "fps must be positive");
    anyhow::ensure!(
        duration_sec.is_finite() && duration_sec > 0.0,
        "duration must be finite and positive (got {duration_sec})"
    );
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("create output dir '{}'", out_dir.display()))?;

    let count = (fps as f64 * duration_sec).round() as usize;
    let start = app.clock().now_sec();
    for index in 0..count {
        let t = start + index as f64 / fps as f64;
        let doc = render_at(app, t);
        write_file(&frame_path(out_dir, index), &doc)?;
        if index % fps as usize == 0 {
            log::debug!("[export] frame {index}/{count}");
        }
    }
    log::info!("[export] wrote {count} frames to {}", out_dir.display());
    Ok(count)
}
