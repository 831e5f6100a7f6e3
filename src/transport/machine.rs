use std::time::Duration;

use rand::Rng;

use crate::engine::AudioEngine;
use crate::library::Library;
use crate::metadata::MetadataSource;

use super::session::{PlaybackState, TICK, TransportSession};

/// Events fed to the transport machine by the UI shell, the remote-control
/// surface and the periodic timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// Load and play the track at the given library index.
    Select(usize),
    /// Pause when playing, resume when paused.
    TogglePause,
    /// Stop and unload; back to idle.
    Stop,
    /// Play the next track in library order, wrapping past the end.
    Next,
    /// Play the previous track in library order, wrapping before the start.
    Prev,
    /// Reposition the current track to an absolute second offset.
    SeekTo(u64),
    /// Set the volume percentage, `0..=100`.
    SetVolume(u8),
    ToggleMute,
    ToggleRepeat,
    /// Flip shuffle; turning it on immediately plays a random track.
    ToggleShuffle,
    /// Periodic timer firing: advances elapsed time and detects track end.
    Tick,
}

/// Apply one event to the session, issuing whatever engine commands the
/// transition calls for. This is the only place session state mutates.
pub fn handle_event<E, M, R>(
    session: &mut TransportSession,
    library: &Library,
    engine: &mut E,
    meta: &M,
    rng: &mut R,
    event: TransportEvent,
) where
    E: AudioEngine,
    M: MetadataSource,
    R: Rng,
{
    match event {
        TransportEvent::Select(index) => {
            if index < library.len() {
                select_track(session, library, engine, meta, index);
            }
        }

        TransportEvent::TogglePause => match session.state {
            PlaybackState::Playing => {
                engine.pause();
                session.state = PlaybackState::Paused;
            }
            PlaybackState::Paused => {
                engine.resume();
                session.state = PlaybackState::Playing;
            }
            PlaybackState::Idle => {}
        },

        TransportEvent::Stop => {
            // Nothing loaded: no engine command at all.
            if session.state == PlaybackState::Idle {
                return;
            }
            engine.stop();
            session.reset_idle();
            session.notice = None;
        }

        TransportEvent::Next => {
            if library.is_empty() {
                return;
            }
            let index = match session.current {
                Some(i) => library.next_index(i),
                None => 0,
            };
            select_track(session, library, engine, meta, index);
        }

        TransportEvent::Prev => {
            if library.is_empty() {
                return;
            }
            let index = match session.current {
                Some(i) => library.prev_index(i),
                None => library.len() - 1,
            };
            select_track(session, library, engine, meta, index);
        }

        TransportEvent::SeekTo(secs) => {
            if session.current.is_none() {
                return;
            }
            // The timeline runs over [0, floor(duration)].
            let target = Duration::from_secs(secs.min(session.duration.as_secs()));
            match engine.seek_to(target) {
                Ok(()) => session.elapsed = target,
                Err(e) => {
                    // Rejected seeks are dropped whole; elapsed stays put.
                    tracing::debug!(error = %e, "seek rejected");
                }
            }
        }

        TransportEvent::SetVolume(volume) => {
            if let Some(gain) = session.set_volume(volume) {
                engine.set_volume(gain);
            }
        }

        TransportEvent::ToggleMute => {
            let gain = session.toggle_mute();
            engine.set_volume(gain);
        }

        TransportEvent::ToggleRepeat => {
            session.toggle_repeat();
        }

        TransportEvent::ToggleShuffle => {
            let now_on = session.toggle_shuffle();
            if now_on && !library.is_empty() {
                let index = rng.gen_range(0..library.len());
                select_track(session, library, engine, meta, index);
            }
        }

        TransportEvent::Tick => tick(session, library, engine, meta, rng),
    }
}

/// Load and start the track at `index`.
///
/// Any failure (unreadable duration, engine refusing the file) aborts the
/// selection: the session keeps its prior state, a notice is raised, and a
/// previously playing track keeps playing.
fn select_track<E, M>(
    session: &mut TransportSession,
    library: &Library,
    engine: &mut E,
    meta: &M,
    index: usize,
) -> bool
where
    E: AudioEngine,
    M: MetadataSource,
{
    let Some(path) = library.absolute_path(index) else {
        return false;
    };

    let duration = match meta.duration(&path) {
        Ok(d) => d,
        Err(e) => {
            tracing::warn!(error = %e, "selection aborted: could not read track length");
            session.notice = Some(format!("Could not read track length: {e}"));
            return false;
        }
    };

    let tags = meta.tags(&path);

    if let Err(e) = engine.play(&path) {
        tracing::warn!(error = %e, "selection aborted: engine refused track");
        session.notice = Some(format!("Could not play track: {e}"));
        return false;
    }
    engine.set_volume(session.effective_gain());

    session.begin_track(index, duration, tags);
    true
}

/// End-of-track and progress handling, in strict priority order:
/// repeat, then shuffle, then sequential next, then idle.
fn tick<E, M, R>(
    session: &mut TransportSession,
    library: &Library,
    engine: &mut E,
    meta: &M,
    rng: &mut R,
) where
    E: AudioEngine,
    M: MetadataSource,
    R: Rng,
{
    // Paused: frozen. Idle: nothing to advance or detect.
    if session.state != PlaybackState::Playing {
        return;
    }

    if engine.is_busy() {
        session.elapsed += TICK;
        return;
    }

    // The current track finished between ticks.
    if session.repeat {
        if let Some(index) = session.current {
            advance(session, library, engine, meta, index);
            return;
        }
    }

    if session.shuffle && !library.is_empty() {
        let index = rng.gen_range(0..library.len());
        advance(session, library, engine, meta, index);
        return;
    }

    if !library.is_empty() {
        let index = match session.current {
            Some(i) => library.next_index(i),
            None => 0,
        };
        advance(session, library, engine, meta, index);
        return;
    }

    engine.stop();
    session.reset_idle();
}

/// Automatic advance at end of track. Unlike a user selection, a failure
/// here has no prior playback to preserve: the session is forced to idle
/// with the error in place of the title.
fn advance<E, M>(
    session: &mut TransportSession,
    library: &Library,
    engine: &mut E,
    meta: &M,
    index: usize,
) where
    E: AudioEngine,
    M: MetadataSource,
{
    if !select_track(session, library, engine, meta, index) {
        let notice = session
            .notice
            .take()
            .unwrap_or_else(|| "Playback error".to_string());
        tracing::error!(index, "end-of-track advance failed, going idle");
        engine.stop();
        session.fail(notice);
    }
}
