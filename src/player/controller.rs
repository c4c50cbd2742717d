use crate::player::backend::{MediaBackend, MediaEvent};
use crate::types::playback_state::PlaybackState;

/// Bridges the player widget to a media backend.
///
/// Owns the widget's playback state and forwards play/pause/seek to the
/// backend; `tick` pulls backend events back into the state once per frame.
pub struct AudioPlayer {
    backend: Box<dyn MediaBackend>,
    pub state: PlaybackState,
}

impl AudioPlayer {
    pub fn new(backend: Box<dyn MediaBackend>) -> Self {
        Self {
            backend,
            state: PlaybackState::new(),
        }
    }

    /// Drains backend events into the playback state. Call once per UI frame.
    pub fn tick(&mut self) {
        for event in self.backend.drain_events() {
            match event {
                MediaEvent::MetadataLoaded { duration } => self.state.set_duration(duration),
                MediaEvent::PositionChanged { position } => self.state.apply_position(position),
                MediaEvent::Ended => self.state.mark_ended(),
            }
        }
    }

    /// Play/pause toggle. A play after a completed playback restarts from 0.
    pub fn toggle(&mut self) {
        if self.state.is_playing {
            self.backend.pause();
            self.state.is_playing = false;
        } else {
            if self.state.at_end() {
                self.backend.seek(0.0);
                self.state.current_time = 0.0;
            }
            self.backend.play();
            self.state.is_playing = true;
        }
    }

    /// Starts a scrub at `fraction` of the track.
    ///
    /// Dropped while the duration is still unknown, so a drag on a
    /// metadata-less source never divides by zero or seeks blind.
    pub fn begin_scrub(&mut self, fraction: f32) {
        if self.state.duration <= 0.0 {
            return;
        }
        self.state.is_dragging = true;
        self.scrub_to(fraction);
    }

    /// Moves an active scrub; the backend is seeked on every move, like the
    /// original drag behavior.
    pub fn scrub_to(&mut self, fraction: f32) {
        if !self.state.is_dragging {
            return;
        }
        let time = fraction.clamp(0.0, 1.0) as f64 * self.state.duration;
        self.state.current_time = time;
        self.backend.seek(time);
    }

    pub fn end_scrub(&mut self) {
        self.state.is_dragging = false;
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, PartialEq)]
    enum Call {
        Play,
        Pause,
        Seek(f64),
    }

    #[derive(Default)]
    struct Shared {
        calls: Vec<Call>,
        pending: Vec<MediaEvent>,
    }

    struct FakeBackend(Rc<RefCell<Shared>>);

    impl MediaBackend for FakeBackend {
        fn play(&mut self) {
            self.0.borrow_mut().calls.push(Call::Play);
        }

        fn pause(&mut self) {
            self.0.borrow_mut().calls.push(Call::Pause);
        }

        fn seek(&mut self, secs: f64) {
            self.0.borrow_mut().calls.push(Call::Seek(secs));
        }

        fn drain_events(&mut self) -> Vec<MediaEvent> {
            std::mem::take(&mut self.0.borrow_mut().pending)
        }
    }

    fn player_with_fake() -> (AudioPlayer, Rc<RefCell<Shared>>) {
        let shared = Rc::new(RefCell::new(Shared::default()));
        let player = AudioPlayer::new(Box::new(FakeBackend(shared.clone())));
        (player, shared)
    }

    fn push_event(shared: &Rc<RefCell<Shared>>, event: MediaEvent) {
        shared.borrow_mut().pending.push(event);
    }

    #[test]
    fn test_toggle_issues_one_call_each_way() {
        let (mut player, shared) = player_with_fake();

        player.toggle();
        assert!(player.is_playing());
        assert_eq!(shared.borrow().calls, vec![Call::Play]);

        player.toggle();
        assert!(!player.is_playing());
        assert_eq!(shared.borrow().calls, vec![Call::Play, Call::Pause]);
    }

    #[test]
    fn test_ended_clears_is_playing_once() {
        let (mut player, shared) = player_with_fake();
        push_event(&shared, MediaEvent::MetadataLoaded { duration: 120.0 });
        player.tick();

        player.toggle();
        assert!(player.is_playing());

        push_event(&shared, MediaEvent::Ended);
        player.tick();
        assert!(!player.is_playing());
        assert_eq!(player.state.current_time, 120.0);

        // Nothing more pending; another tick changes nothing.
        player.tick();
        assert!(!player.is_playing());
    }

    #[test]
    fn test_play_after_end_restarts_from_zero() {
        let (mut player, shared) = player_with_fake();
        push_event(&shared, MediaEvent::MetadataLoaded { duration: 120.0 });
        push_event(&shared, MediaEvent::Ended);
        player.tick();

        player.toggle();
        assert!(player.is_playing());
        assert_eq!(player.state.current_time, 0.0);
        assert_eq!(shared.borrow().calls, vec![Call::Seek(0.0), Call::Play]);
    }

    #[test]
    fn test_scrub_ignored_until_metadata() {
        let (mut player, shared) = player_with_fake();

        player.begin_scrub(0.5);
        assert!(!player.state.is_dragging);
        assert!(shared.borrow().calls.is_empty());

        push_event(&shared, MediaEvent::MetadataLoaded { duration: 120.0 });
        player.tick();

        player.begin_scrub(0.5);
        assert!(player.state.is_dragging);
        assert_eq!(shared.borrow().calls, vec![Call::Seek(60.0)]);
    }

    #[test]
    fn test_scrub_fraction_clamped() {
        let (mut player, shared) = player_with_fake();
        push_event(&shared, MediaEvent::MetadataLoaded { duration: 100.0 });
        player.tick();

        player.begin_scrub(-0.4);
        player.scrub_to(1.7);
        player.end_scrub();

        assert_eq!(
            shared.borrow().calls,
            vec![Call::Seek(0.0), Call::Seek(100.0)]
        );
    }

    #[test]
    fn test_position_events_dropped_while_scrubbing() {
        let (mut player, shared) = player_with_fake();
        push_event(&shared, MediaEvent::MetadataLoaded { duration: 120.0 });
        player.tick();

        player.begin_scrub(0.25);
        assert_eq!(player.state.current_time, 30.0);

        push_event(&shared, MediaEvent::PositionChanged { position: 65.0 });
        player.tick();
        assert_eq!(player.state.current_time, 30.0);

        player.end_scrub();
        push_event(&shared, MediaEvent::PositionChanged { position: 65.0 });
        player.tick();
        assert_eq!(player.state.current_time, 65.0);
    }

    // The full interaction pass: metadata, play, clock updates, drag, release.
    #[test]
    fn test_playback_scenario() {
        let (mut player, shared) = player_with_fake();

        push_event(&shared, MediaEvent::MetadataLoaded { duration: 120.0 });
        player.tick();
        assert_eq!(player.state.duration, 120.0);
        assert_eq!(player.state.current_time, 0.0);

        player.toggle();
        assert!(player.is_playing());

        push_event(&shared, MediaEvent::PositionChanged { position: 65.0 });
        player.tick();
        assert_eq!(player.state.current_time, 65.0);
        assert!((player.state.progress_fraction() - 0.5417).abs() < 1e-3);

        player.begin_scrub(0.25);
        assert_eq!(player.state.current_time, 30.0);
        assert!(shared.borrow().calls.contains(&Call::Seek(30.0)));

        player.end_scrub();
        push_event(&shared, MediaEvent::PositionChanged { position: 31.0 });
        player.tick();
        assert_eq!(player.state.current_time, 31.0);
    }
}
