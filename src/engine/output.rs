use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};

use super::backend::{AudioEngine, EngineError};

/// `rodio`-backed engine: one output stream for the process lifetime, one
/// sink per loaded track. Seeking rebuilds the sink and skips into the
/// decoded stream, which works for every format the decoder handles.
pub struct RodioEngine {
    stream: OutputStream,
    sink: Option<Sink>,
    current: Option<PathBuf>,
    gain: f32,
}

impl RodioEngine {
    pub fn new() -> Result<Self, EngineError> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| EngineError::Device(e.to_string()))?;
        // rodio logs to stderr when OutputStream is dropped. That's useful in
        // debugging, but noisy for a TUI app.
        stream.log_on_drop(false);

        Ok(Self {
            stream,
            sink: None,
            current: None,
            gain: 1.0,
        })
    }
}

/// Create a paused `Sink` for `path` that starts playback at `start_at`.
fn create_sink_at(
    stream: &OutputStream,
    path: &Path,
    start_at: Duration,
) -> Result<Sink, EngineError> {
    let file = File::open(path).map_err(|source| EngineError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let source = Decoder::new(BufReader::new(file))
        .map_err(|source| EngineError::Decode {
            path: path.to_path_buf(),
            source,
        })?
        // `skip_duration` is our seeking primitive; even Duration::ZERO is fine.
        .skip_duration(start_at);

    let sink = Sink::connect_new(stream.mixer());
    sink.append(source);
    sink.pause();
    Ok(sink)
}

impl AudioEngine for RodioEngine {
    fn play(&mut self, path: &Path) -> Result<(), EngineError> {
        // Build the replacement sink before touching the old one, so a bad
        // file leaves the current track playing.
        let new_sink = create_sink_at(&self.stream, path, Duration::ZERO)?;
        new_sink.set_volume(self.gain);

        if let Some(old) = self.sink.take() {
            old.stop();
        }

        new_sink.play();
        self.sink = Some(new_sink);
        self.current = Some(path.to_path_buf());
        Ok(())
    }

    fn pause(&mut self) {
        if let Some(s) = self.sink.as_ref() {
            s.pause();
        }
    }

    fn resume(&mut self) {
        if let Some(s) = self.sink.as_ref() {
            s.play();
        }
    }

    fn stop(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        self.current = None;
    }

    fn seek_to(&mut self, position: Duration) -> Result<(), EngineError> {
        let Some(path) = self.current.clone() else {
            return Err(EngineError::NothingLoaded);
        };
        let Some(old) = self.sink.as_ref() else {
            return Err(EngineError::NothingLoaded);
        };
        let was_paused = old.is_paused();

        let new_sink = create_sink_at(&self.stream, &path, position)?;
        new_sink.set_volume(self.gain);
        if !was_paused {
            new_sink.play();
        }

        if let Some(old) = self.sink.take() {
            old.stop();
        }
        self.sink = Some(new_sink);
        Ok(())
    }

    fn set_volume(&mut self, gain: f32) {
        self.gain = gain;
        if let Some(s) = self.sink.as_ref() {
            s.set_volume(gain);
        }
    }

    fn volume(&self) -> f32 {
        self.gain
    }

    fn is_busy(&self) -> bool {
        self.sink.as_ref().map(|s| !s.empty()).unwrap_or(false)
    }
}
