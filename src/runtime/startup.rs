use std::fs;
use std::path::PathBuf;

use crate::app::App;
use crate::config;
use crate::engine::AudioEngine;

/// Route diagnostics to a log file: stderr belongs to the alternate screen
/// while the TUI runs. Best-effort; the player works without a log.
pub fn init_logging() {
    let Some(dir) = dirs::data_local_dir() else {
        return;
    };
    let dir = dir.join("platter");
    if fs::create_dir_all(&dir).is_err() {
        return;
    }

    let Ok(log_file) = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("platter.log"))
    else {
        return;
    };

    let filter = std::env::var("PLATTER_LOG").unwrap_or_else(|_| "info".to_string());
    let _ = tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(filter.as_str())
        .with_ansi(false)
        .try_init();
}

/// The music root is fixed at startup: the configured override when set,
/// otherwise the platform music directory.
pub fn resolve_music_root(library: &config::LibrarySettings) -> PathBuf {
    if let Some(dir) = &library.music_dir {
        return dir.clone();
    }
    dirs::audio_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join("Music")))
        .unwrap_or_else(|| PathBuf::from("Music"))
}

/// Seed the session and engine from the playback defaults.
pub fn apply_playback_defaults<E: AudioEngine>(
    app: &mut App,
    engine: &mut E,
    settings: &config::Settings,
) {
    app.session.repeat = settings.playback.repeat;
    // Validation rejects both flags at once; keep the invariant regardless.
    app.session.shuffle = settings.playback.shuffle && !settings.playback.repeat;

    engine.set_volume(app.session.effective_gain());
}
