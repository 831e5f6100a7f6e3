use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no usable audio output device: {0}")]
    Device(String),
    #[error("failed to open {}: {}", .path.display(), .source)]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {}: {}", .path.display(), .source)]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },
    #[error("nothing is loaded")]
    NothingLoaded,
}

/// The playback provider the transport machine commands.
///
/// One track is loaded at a time. `play` replaces whatever was loaded;
/// every other operation acts on the current track and is a no-op (or an
/// error, where noted) when nothing is loaded.
pub trait AudioEngine {
    /// Load `path` and start playing it from the beginning at the current
    /// volume. On failure the previously loaded track, if any, keeps
    /// playing untouched.
    fn play(&mut self, path: &Path) -> Result<(), EngineError>;

    fn pause(&mut self);

    fn resume(&mut self);

    /// Stop and unload the current track.
    fn stop(&mut self);

    /// Reposition the current track to `position`. On failure the current
    /// track keeps playing from where it was.
    fn seek_to(&mut self, position: Duration) -> Result<(), EngineError>;

    /// Set the output gain, `0.0..=1.0`.
    fn set_volume(&mut self, gain: f32);

    fn volume(&self) -> f32;

    /// Whether a track is loaded and has not finished playing yet.
    fn is_busy(&self) -> bool;
}
