use gst::prelude::*;
use gstreamer as gst;
use gstreamer_app as gst_app;
use gstreamer_video as gst_video;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackgroundError {
    #[error("background video not found: {0}")]
    MissingFile(String),
    #[error("failed to build video pipeline: {0}")]
    Pipeline(#[from] gst::glib::Error),
    #[error("launch string did not produce a pipeline")]
    NotAPipeline,
    #[error("pipeline has no appsink")]
    MissingSink,
    #[error("video pipeline refused to start: {0}")]
    StateChange(#[from] gst::StateChangeError),
}

#[derive(Debug, Clone)]
pub struct VideoFrame {
    pub data: Vec<u8>, // Raw RGBA pixel data
    pub width: u32,
    pub height: u32,
}

/// Continuously decodes the looping, muted background video.
///
/// Frames are pulled non-blocking once per repaint; EOS restarts playback
/// from the top, matching a `loop muted autoplay` video element.
pub struct BackgroundVideo {
    pipeline: gst::Pipeline,
    appsink: gst_app::AppSink,
}

impl BackgroundVideo {
    pub fn new(path: &str, width: u32, height: u32) -> Result<Self, BackgroundError> {
        if !std::path::Path::new(path).exists() {
            return Err(BackgroundError::MissingFile(path.to_string()));
        }

        // No audio branch: the background video plays muted.
        let pipeline_str = format!(
            "filesrc location=\"{}\" ! decodebin ! videoconvert ! videoscale ! video/x-raw,format=RGBA,width={},height={} ! appsink name=sink sync=true",
            path, width, height
        );

        let pipeline = gst::parse::launch(&pipeline_str)?
            .downcast::<gst::Pipeline>()
            .map_err(|_| BackgroundError::NotAPipeline)?;

        let appsink = pipeline
            .by_name("sink")
            .ok_or(BackgroundError::MissingSink)?
            .downcast::<gst_app::AppSink>()
            .map_err(|_| BackgroundError::MissingSink)?;

        appsink.set_property("max-buffers", 2u32);
        appsink.set_property("drop", true);

        pipeline.set_state(gst::State::Playing)?;

        Ok(Self { pipeline, appsink })
    }

    /// Pulls the next decoded frame if one is ready. Never blocks the UI thread.
    pub fn poll_frame(&mut self) -> Option<VideoFrame> {
        self.poll_bus();

        let sample = self.appsink.try_pull_sample(gst::ClockTime::ZERO)?;
        let caps = sample.caps()?;
        let info = gst_video::VideoInfo::from_caps(caps).ok()?;
        let buffer = sample.buffer()?;
        let map = buffer.map_readable().ok()?;

        Some(VideoFrame {
            data: map.as_slice().to_vec(),
            width: info.width(),
            height: info.height(),
        })
    }

    // Restart from the top on EOS; the background loops for the page's lifetime.
    fn poll_bus(&mut self) {
        let Some(bus) = self.pipeline.bus() else {
            return;
        };
        while let Some(msg) = bus.pop() {
            match msg.view() {
                gst::MessageView::Eos(..) => {
                    if let Err(err) = self
                        .pipeline
                        .seek_simple(gst::SeekFlags::FLUSH, gst::ClockTime::ZERO)
                    {
                        log::warn!("background loop seek failed: {err}");
                    }
                }
                gst::MessageView::Error(err) => {
                    log::error!("background pipeline error: {}", err.error());
                }
                _ => {}
            }
        }
    }
}

impl Drop for BackgroundVideo {
    fn drop(&mut self) {
        let _ = self.pipeline.set_state(gst::State::Null);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_reported() {
        let _ = gst::init();
        match BackgroundVideo::new("/nonexistent/bg.mp4", 640, 360) {
            Err(BackgroundError::MissingFile(path)) => {
                assert_eq!(path, "/nonexistent/bg.mp4");
            }
            other => panic!("expected MissingFile, got {:?}", other.map(|_| ())),
        }
    }
}
