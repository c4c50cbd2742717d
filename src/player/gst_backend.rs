use gst::prelude::*;
use gstreamer as gst;
use gstreamer_pbutils as gst_pbutils;
use thiserror::Error;

use crate::player::backend::{MediaBackend, MediaEvent};

#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("failed to build audio pipeline: {0}")]
    Pipeline(#[from] gst::glib::Error),
    #[error("launch string did not produce a pipeline")]
    NotAPipeline,
}

/// GStreamer-backed audio source for the landing page player.
///
/// The pipeline is prerolled to PAUSED at construction so seeks and duration
/// queries work before the first play. Dropping the backend tears the
/// pipeline down to NULL, stopping any audio still going.
pub struct GstAudioBackend {
    pipeline: gst::Pipeline,
    playing: bool,
    duration: Option<f64>,
    metadata_sent: bool,
}

impl GstAudioBackend {
    pub fn new(path: &str) -> Result<Self, PlayerError> {
        let pipeline_str = format!(
            "filesrc location=\"{}\" ! decodebin ! audioconvert ! audioresample ! autoaudiosink",
            path
        );
        let pipeline = gst::parse::launch(&pipeline_str)?
            .downcast::<gst::Pipeline>()
            .map_err(|_| PlayerError::NotAPipeline)?;

        if let Err(err) = pipeline.set_state(gst::State::Paused) {
            log::warn!("audio pipeline refused PAUSED: {err}");
        }

        // Metadata probe up front; query_duration polling covers the rest.
        let duration = probe_duration(path);

        Ok(Self {
            pipeline,
            playing: false,
            duration,
            metadata_sent: false,
        })
    }
}

impl MediaBackend for GstAudioBackend {
    fn play(&mut self) {
        match self.pipeline.set_state(gst::State::Playing) {
            Ok(_) => self.playing = true,
            Err(err) => log::warn!("audio play failed: {err}"),
        }
    }

    fn pause(&mut self) {
        if let Err(err) = self.pipeline.set_state(gst::State::Paused) {
            log::warn!("audio pause failed: {err}");
        }
        self.playing = false;
    }

    fn seek(&mut self, secs: f64) {
        let target = gst::ClockTime::from_nseconds((secs.max(0.0) * 1_000_000_000.0) as u64);
        if let Err(err) = self
            .pipeline
            .seek_simple(gst::SeekFlags::FLUSH | gst::SeekFlags::ACCURATE, target)
        {
            log::warn!("audio seek to {secs:.2}s failed: {err}");
        }
    }

    fn drain_events(&mut self) -> Vec<MediaEvent> {
        let mut events = Vec::new();

        if self.duration.is_none() {
            self.duration = self
                .pipeline
                .query_duration::<gst::ClockTime>()
                .map(clock_to_secs);
        }
        if let Some(duration) = self.duration {
            if !self.metadata_sent {
                self.metadata_sent = true;
                events.push(MediaEvent::MetadataLoaded { duration });
            }
        }

        if let Some(bus) = self.pipeline.bus() {
            while let Some(msg) = bus.pop() {
                match msg.view() {
                    gst::MessageView::Eos(..) => {
                        self.playing = false;
                        let _ = self.pipeline.set_state(gst::State::Paused);
                        events.push(MediaEvent::Ended);
                    }
                    gst::MessageView::Error(err) => {
                        log::error!("audio pipeline error: {}", err.error());
                    }
                    _ => {}
                }
            }
        }

        if self.playing {
            if let Some(position) = self.pipeline.query_position::<gst::ClockTime>() {
                events.push(MediaEvent::PositionChanged {
                    position: clock_to_secs(position),
                });
            }
        }

        events
    }
}

impl Drop for GstAudioBackend {
    fn drop(&mut self) {
        let _ = self.pipeline.set_state(gst::State::Null);
    }
}

fn clock_to_secs(time: gst::ClockTime) -> f64 {
    time.nseconds() as f64 / 1_000_000_000.0
}

/// Probe the source's duration with the discoverer before playback starts.
fn probe_duration(path: &str) -> Option<f64> {
    let abs_path = std::fs::canonicalize(path).ok()?;
    let uri = path_to_file_uri(&abs_path.to_string_lossy());
    let discoverer = gst_pbutils::Discoverer::new(gst::ClockTime::from_seconds(5)).ok()?;
    let info = discoverer.discover_uri(&uri).ok()?;
    info.duration().map(clock_to_secs)
}

// Helper function to convert a path to a file URI for GStreamer
#[cfg(windows)]
fn path_to_file_uri(path: &str) -> String {
    // Remove UNC prefix if present
    let mut path = path.replace("\\", "/");
    if let Some(stripped) = path.strip_prefix("//?/") {
        path = stripped.to_string();
    }
    format!("file:///{}", path)
}

#[cfg(not(windows))]
fn path_to_file_uri(path: &str) -> String {
    format!("file://{}", path)
}
