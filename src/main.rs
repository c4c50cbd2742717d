mod player;
mod renderer;
mod types;
mod ui;

use anyhow::Context;
use eframe::egui;
use gstreamer as gst;

use crate::player::controller::AudioPlayer;
use crate::player::gst_backend::GstAudioBackend;
use crate::renderer::background::BackgroundVideo;
use crate::types::config::LandingConfig;
use crate::ui::app::LandingApp;

const CONFIG_PATH: &str = "landing.json";
const ICON_PATH: &str = "assets/icon.png";

// Background frames are decoded at preview size; the GPU upscales the rest.
const BG_WIDTH: u32 = 1280;
const BG_HEIGHT: u32 = 720;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    gst::init().context("failed to initialize GStreamer")?;

    let config = LandingConfig::load_or_default(CONFIG_PATH);

    let backend = GstAudioBackend::new(&config.audio_path)
        .with_context(|| format!("failed to open audio source {}", config.audio_path))?;
    let player = AudioPlayer::new(Box::new(backend));

    // The page still renders without its background video.
    let background = match BackgroundVideo::new(&config.video_path, BG_WIDTH, BG_HEIGHT) {
        Ok(background) => Some(background),
        Err(err) => {
            log::warn!("background video disabled: {err}");
            None
        }
    };

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(egui::vec2(config.window_size.0, config.window_size.1))
        .with_title(config.window_title.clone());
    if let Some(icon) = load_window_icon(ICON_PATH) {
        viewport = viewport.with_icon(icon);
    }
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    let title = config.window_title.clone();
    eframe::run_native(
        &title,
        native_options,
        Box::new(move |_cc| Ok(Box::new(LandingApp::new(config, player, background)))),
    )
    .map_err(|err| anyhow::anyhow!("failed to run landing page: {err}"))?;
    Ok(())
}

// The icon asset is optional; the window falls back to the platform default.
fn load_window_icon(path: &str) -> Option<egui::IconData> {
    let img = image::open(path).ok()?.into_rgba8();
    let (width, height) = img.dimensions();
    Some(egui::IconData {
        rgba: img.into_raw(),
        width,
        height,
    })
}
