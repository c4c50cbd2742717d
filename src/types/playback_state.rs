/// Playback state for the landing page audio player.
///
/// While `is_dragging` is set, `current_time` follows the pointer and
/// backend position updates are dropped, so the native clock never fights
/// a user-driven seek.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub is_playing: bool,
    pub current_time: f64,
    /// Zero until the backend reports metadata.
    pub duration: f64,
    pub is_dragging: bool,
}

impl PlaybackState {
    pub fn new() -> Self {
        Self {
            is_playing: false,
            current_time: 0.0,
            duration: 0.0,
            is_dragging: false,
        }
    }

    pub fn set_duration(&mut self, duration: f64) {
        self.duration = duration.max(0.0);
        if self.duration > 0.0 {
            self.current_time = self.current_time.clamp(0.0, self.duration);
        }
    }

    /// Applies a position update from the backend. Ignored while dragging.
    pub fn apply_position(&mut self, position: f64) {
        if self.is_dragging {
            return;
        }
        self.current_time = if self.duration > 0.0 {
            position.clamp(0.0, self.duration)
        } else {
            position.max(0.0)
        };
    }

    /// Filled share of the seek track, in `[0, 1]`. Zero until metadata arrives.
    pub fn progress_fraction(&self) -> f32 {
        if self.duration <= 0.0 {
            return 0.0;
        }
        (self.current_time / self.duration).clamp(0.0, 1.0) as f32
    }

    /// End of media: playback stops, position parks at the duration.
    pub fn mark_ended(&mut self) {
        self.is_playing = false;
        if self.duration > 0.0 {
            self.current_time = self.duration;
        }
    }

    pub fn at_end(&self) -> bool {
        self.duration > 0.0 && self.current_time >= self.duration
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_fraction_guards_zero_duration() {
        let mut state = PlaybackState::new();
        state.current_time = 12.0;
        assert_eq!(state.progress_fraction(), 0.0);

        state.set_duration(120.0);
        state.apply_position(65.0);
        assert!((state.progress_fraction() - 0.5417).abs() < 1e-3);
    }

    #[test]
    fn test_position_updates_ignored_while_dragging() {
        let mut state = PlaybackState::new();
        state.set_duration(120.0);
        state.is_dragging = true;
        state.current_time = 30.0;
        state.apply_position(65.0);
        assert_eq!(state.current_time, 30.0);

        state.is_dragging = false;
        state.apply_position(65.0);
        assert_eq!(state.current_time, 65.0);
    }

    #[test]
    fn test_position_clamped_to_duration() {
        let mut state = PlaybackState::new();
        state.set_duration(120.0);
        state.apply_position(500.0);
        assert_eq!(state.current_time, 120.0);
        state.apply_position(-3.0);
        assert_eq!(state.current_time, 0.0);
    }

    #[test]
    fn test_mark_ended_stops_playback_at_duration() {
        let mut state = PlaybackState::new();
        state.set_duration(120.0);
        state.is_playing = true;
        state.apply_position(119.7);
        state.mark_ended();
        assert!(!state.is_playing);
        assert_eq!(state.current_time, 120.0);
        assert!(state.at_end());
    }
}
