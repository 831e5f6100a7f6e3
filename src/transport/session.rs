use std::time::Duration;

use crate::metadata::TrackTags;

/// Period of the timer tick that drives progress display and end-of-track
/// detection. Elapsed time is quantized to this granularity.
pub const TICK: Duration = Duration::from_millis(500);

/// The playback state of the transport.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// No track loaded in the engine.
    #[default]
    Idle,
    Playing,
    Paused,
}

/// The single mutable playback session, created once at launch.
///
/// Invariants: `Idle` implies `current == None`; `repeat` and `shuffle`
/// are never both true; `elapsed` overshoots `duration` by less than one
/// tick at most.
pub struct TransportSession {
    /// Library index of the loaded track, if any.
    pub current: Option<usize>,
    pub state: PlaybackState,
    pub elapsed: Duration,
    /// Decoded length of the current track; meaningless while `Idle`.
    pub duration: Duration,
    /// Display tags of the current track.
    pub tags: TrackTags,
    pub repeat: bool,
    pub shuffle: bool,
    /// Volume percentage, `0..=100`. Forced to 0 while muted.
    pub volume: u8,
    pub muted: bool,
    volume_before_mute: u8,
    /// Error text shown in place of the title until the next selection.
    pub notice: Option<String>,
}

impl TransportSession {
    pub fn new(volume: u8) -> Self {
        let volume = volume.min(100);
        Self {
            current: None,
            state: PlaybackState::Idle,
            elapsed: Duration::ZERO,
            duration: Duration::ZERO,
            tags: TrackTags::default(),
            repeat: false,
            shuffle: false,
            volume,
            muted: false,
            volume_before_mute: volume,
            notice: None,
        }
    }

    /// The gain the engine should output right now.
    pub fn effective_gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            f32::from(self.volume) / 100.0
        }
    }

    /// Record a successfully started track.
    pub fn begin_track(&mut self, index: usize, duration: Duration, tags: TrackTags) {
        self.current = Some(index);
        self.state = PlaybackState::Playing;
        self.elapsed = Duration::ZERO;
        self.duration = duration;
        self.tags = tags;
        self.notice = None;
    }

    /// Drop back to `Idle` with nothing loaded.
    pub fn reset_idle(&mut self) {
        self.current = None;
        self.state = PlaybackState::Idle;
        self.elapsed = Duration::ZERO;
        self.duration = Duration::ZERO;
        self.tags = TrackTags::default();
    }

    /// `Idle` with an error notice left on display.
    pub fn fail(&mut self, notice: String) {
        self.reset_idle();
        self.notice = Some(notice);
    }

    /// Record a new volume level; returns the gain to apply to the engine,
    /// or `None` while muted (the engine stays at 0, the level becomes the
    /// unmute restore target).
    pub fn set_volume(&mut self, volume: u8) -> Option<f32> {
        let volume = volume.min(100);
        if self.muted {
            self.volume_before_mute = volume;
            self.volume = volume;
            None
        } else {
            self.volume = volume;
            Some(self.effective_gain())
        }
    }

    /// Flip mute; returns the gain to apply to the engine.
    pub fn toggle_mute(&mut self) -> f32 {
        if self.muted {
            self.muted = false;
            self.volume = self.volume_before_mute;
        } else {
            self.volume_before_mute = self.volume;
            self.muted = true;
            self.volume = 0;
        }
        self.effective_gain()
    }

    /// Flip repeat; enabling it turns shuffle off.
    pub fn toggle_repeat(&mut self) {
        self.repeat = !self.repeat;
        if self.repeat {
            self.shuffle = false;
        }
    }

    /// Flip shuffle; enabling it turns repeat off. Returns whether shuffle
    /// is now on.
    pub fn toggle_shuffle(&mut self) -> bool {
        self.shuffle = !self.shuffle;
        if self.shuffle {
            self.repeat = false;
        }
        self.shuffle
    }
}
