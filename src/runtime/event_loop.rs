use std::sync::mpsc;
use std::time::Instant;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use rand::rngs::ThreadRng;
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::config;
use crate::engine::AudioEngine;
use crate::metadata::LoftyProbe;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::runtime::mpris_sync::update_mpris;
use crate::transport::{self, PlaybackState, TICK, TransportEvent};
use crate::ui;

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Deadline of the next timer tick.
    pub next_tick: Instant,
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
    /// Last-known playing index as emitted to MPRIS.
    pub last_mpris_index: Option<usize>,
    /// Last-known playback state as emitted to MPRIS.
    pub last_mpris_playback: PlaybackState,
}

impl EventLoopState {
    /// Construct a new `EventLoopState` seeded from `app`.
    pub fn new(app: &App) -> Self {
        Self {
            next_tick: Instant::now() + TICK,
            pending_gg: false,
            last_mpris_index: app.session.current,
            last_mpris_playback: app.session.state,
        }
    }
}

fn dispatch<E: AudioEngine>(
    app: &mut App,
    engine: &mut E,
    meta: &LoftyProbe,
    rng: &mut ThreadRng,
    event: TransportEvent,
) {
    transport::handle_event(&mut app.session, &app.library, engine, meta, rng, event);
}

/// Main terminal event loop: draws, drains remote-control commands, handles
/// input, and fires the periodic tick whenever its deadline lapses. Returns
/// `Ok(())` when shutdown is requested.
pub fn run<E: AudioEngine>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    engine: &mut E,
    mpris: &MprisHandle,
    control_tx: &mpsc::Sender<ControlCmd>,
    control_rx: &mpsc::Receiver<ControlCmd>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    let meta = LoftyProbe;
    let mut rng = rand::thread_rng();

    loop {
        terminal.draw(|f| ui::draw(f, app, &settings.ui, &settings.controls))?;

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, app, engine, &meta, &mut rng) {
                dispatch(app, engine, &meta, &mut rng, TransportEvent::Stop);
                return Ok(());
            }
        }

        // Mirror playback changes to MPRIS, whatever caused them
        // (keys, remote commands or auto-advance on a tick).
        if app.session.current != state.last_mpris_index
            || app.session.state != state.last_mpris_playback
        {
            update_mpris(mpris, app);
            state.last_mpris_index = app.session.current;
            state.last_mpris_playback = app.session.state;
        }

        // Block until input or the tick deadline, whichever comes first.
        let timeout = state.next_tick.saturating_duration_since(Instant::now());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app, engine, &meta, &mut rng, control_tx, state)
                {
                    // Leave nothing playing behind the closed window.
                    dispatch(app, engine, &meta, &mut rng, TransportEvent::Stop);
                    return Ok(());
                }
            }
        }

        if Instant::now() >= state.next_tick {
            dispatch(app, engine, &meta, &mut rng, TransportEvent::Tick);
            state.next_tick = Instant::now() + TICK;
        }
    }
}

/// Apply one remote-control command. Returns `true` on quit.
fn handle_control_cmd<E: AudioEngine>(
    cmd: ControlCmd,
    app: &mut App,
    engine: &mut E,
    meta: &LoftyProbe,
    rng: &mut ThreadRng,
) -> bool {
    match cmd {
        ControlCmd::Quit => return true,
        ControlCmd::Play => match app.session.state {
            PlaybackState::Paused => {
                dispatch(app, engine, meta, rng, TransportEvent::TogglePause);
            }
            PlaybackState::Idle | PlaybackState::Playing => {
                if app.has_tracks() {
                    let selected = app.selected;
                    dispatch(app, engine, meta, rng, TransportEvent::Select(selected));
                }
            }
        },
        ControlCmd::Pause => {
            if app.session.state == PlaybackState::Playing {
                dispatch(app, engine, meta, rng, TransportEvent::TogglePause);
            }
        }
        ControlCmd::PlayPause => match app.session.state {
            PlaybackState::Idle => {
                if app.has_tracks() {
                    let selected = app.selected;
                    dispatch(app, engine, meta, rng, TransportEvent::Select(selected));
                }
            }
            PlaybackState::Playing | PlaybackState::Paused => {
                dispatch(app, engine, meta, rng, TransportEvent::TogglePause);
            }
        },
        ControlCmd::Stop => {
            dispatch(app, engine, meta, rng, TransportEvent::Stop);
        }
        ControlCmd::Next => {
            dispatch(app, engine, meta, rng, TransportEvent::Next);
        }
        ControlCmd::Prev => {
            dispatch(app, engine, meta, rng, TransportEvent::Prev);
        }
    }

    false
}

/// Apply one key press. Returns `true` on quit.
fn handle_key_event<E: AudioEngine>(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    engine: &mut E,
    meta: &LoftyProbe,
    rng: &mut ThreadRng,
    control_tx: &mpsc::Sender<ControlCmd>,
    state: &mut EventLoopState,
) -> bool {
    match key.code {
        KeyCode::Char('q') => {
            state.pending_gg = false;
            return true;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            state.pending_gg = false;
            app.cursor_next();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.pending_gg = false;
            app.cursor_prev();
        }
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                app.cursor_top();
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => {
            state.pending_gg = false;
            app.cursor_bottom();
        }
        KeyCode::Enter => {
            state.pending_gg = false;
            if app.has_tracks() {
                let selected = app.selected;
                dispatch(app, engine, meta, rng, TransportEvent::Select(selected));
            }
        }
        KeyCode::Char('p') | KeyCode::Char(' ') => {
            state.pending_gg = false;
            let _ = control_tx.send(ControlCmd::PlayPause);
        }
        KeyCode::Char('x') => {
            state.pending_gg = false;
            let _ = control_tx.send(ControlCmd::Stop);
        }
        KeyCode::Char('l') => {
            state.pending_gg = false;
            let _ = control_tx.send(ControlCmd::Next);
        }
        KeyCode::Char('h') => {
            state.pending_gg = false;
            let _ = control_tx.send(ControlCmd::Prev);
        }
        KeyCode::Char('L') => {
            state.pending_gg = false;
            let target = app.session.elapsed.as_secs() + settings.controls.seek_seconds;
            dispatch(app, engine, meta, rng, TransportEvent::SeekTo(target));
        }
        KeyCode::Char('H') => {
            state.pending_gg = false;
            let target = app
                .session
                .elapsed
                .as_secs()
                .saturating_sub(settings.controls.seek_seconds);
            dispatch(app, engine, meta, rng, TransportEvent::SeekTo(target));
        }
        KeyCode::Char('r') => {
            state.pending_gg = false;
            dispatch(app, engine, meta, rng, TransportEvent::ToggleRepeat);
        }
        KeyCode::Char('s') => {
            state.pending_gg = false;
            dispatch(app, engine, meta, rng, TransportEvent::ToggleShuffle);
        }
        KeyCode::Char('m') => {
            state.pending_gg = false;
            dispatch(app, engine, meta, rng, TransportEvent::ToggleMute);
        }
        KeyCode::Char('-') => {
            state.pending_gg = false;
            let volume = app
                .session
                .volume
                .saturating_sub(settings.controls.volume_step);
            dispatch(app, engine, meta, rng, TransportEvent::SetVolume(volume));
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            state.pending_gg = false;
            let volume = app
                .session
                .volume
                .saturating_add(settings.controls.volume_step)
                .min(100);
            dispatch(app, engine, meta, rng, TransportEvent::SetVolume(volume));
        }
        KeyCode::Char(_) => {
            // g pending should clear on any other printable char
            state.pending_gg = false;
        }
        _ => {}
    }

    false
}
