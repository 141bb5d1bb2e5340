/// Notifications from the audio element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackEvent {
    Play,
    Pause,
    Ended,
}

/// Playback flags the visualizer keys its mode off.
///
/// `playing` only ever becomes true from a platform `Play` notification, so a
/// rejected start (autoplay policy, decode error) leaves it false.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlaybackState {
    playing: bool,
    interacted: bool,
}

impl PlaybackState {
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn has_interacted(&self) -> bool {
        self.interacted
    }

    /// The user clicked the toggle, whatever the outcome of the start.
    pub fn mark_interacted(&mut self) {
        self.interacted = true;
    }

    pub fn apply(&mut self, event: PlaybackEvent) {
        self.playing = matches!(event, PlaybackEvent::Play);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_pause_ended_drive_flag() {
        let mut s = PlaybackState::default();
        s.apply(PlaybackEvent::Play);
        assert!(s.is_playing());
        s.apply(PlaybackEvent::Ended);
        assert!(!s.is_playing());
        s.apply(PlaybackEvent::Play);
        s.apply(PlaybackEvent::Pause);
        assert!(!s.is_playing());
        assert!(!s.has_interacted());
    }
}
