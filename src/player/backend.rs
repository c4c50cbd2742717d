/// Events a media backend surfaces between UI frames.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// Fired once, when the source's duration becomes known.
    MetadataLoaded { duration: f64 },
    /// The playback clock moved. Only emitted while playing.
    PositionChanged { position: f64 },
    /// Playback ran to the end of the source.
    Ended,
}

/// Capability surface of a playable media resource.
///
/// The player widget only talks to this trait, so its state machine can be
/// exercised in tests with a fake backend instead of a real pipeline.
pub trait MediaBackend {
    fn play(&mut self);
    fn pause(&mut self);
    /// Seek to an absolute position in seconds.
    fn seek(&mut self, secs: f64);
    /// Returns the events accumulated since the last call.
    fn drain_events(&mut self) -> Vec<MediaEvent>;
}
