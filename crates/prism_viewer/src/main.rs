//! Prism viewer: renders a demo scene to a sequence of image files.
//!
//! Usage: `prism_viewer [settings.json]`. Without an argument the built-in
//! defaults are used. Log verbosity follows `RUST_LOG`.

mod scenes;
mod settings;

use anyhow::{Context, Result};
use prism_renderer::Renderer;
use scenes::DemoScene;
use settings::RenderSettings;
use std::time::Instant;

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let settings = match std::env::args().nth(1) {
        Some(path) => RenderSettings::load(&path)?,
        None => {
            log::info!("No settings file given, using defaults");
            RenderSettings::default()
        }
    };

    run(&settings)
}

fn run(settings: &RenderSettings) -> Result<()> {
    let mut demo = DemoScene::build(settings)?;
    let renderer = Renderer::new(settings.width, settings.height);
    let config = settings.render_config();

    log::info!(
        "Rendering {} frame(s) of {:?} at {}x{} ({:?}, shadows {})",
        settings.frames,
        settings.scene,
        settings.width,
        settings.height,
        config.light_mode,
        if config.shadows_enabled { "on" } else { "off" }
    );

    let start = Instant::now();
    let mut report_start = Instant::now();
    let mut report_frames = 0u32;

    for frame_index in 0..settings.frames {
        demo.animate(frame_index as f32 * settings.time_step);
        let frame = renderer.render(&demo.scene, &config);

        if let Some(path) = settings.output_path(frame_index) {
            frame
                .save(&path)
                .with_context(|| format!("failed to save frame {frame_index}"))?;
        }

        report_frames += 1;
        let elapsed = report_start.elapsed().as_secs_f32();
        if elapsed >= settings.fps_report_interval {
            log::info!("FPS: {:.1}", report_frames as f32 / elapsed);
            report_start = Instant::now();
            report_frames = 0;
        }
    }

    log::info!(
        "Finished {} frame(s) in {:.2?}",
        settings.frames,
        start.elapsed()
    );

    Ok(())
}
