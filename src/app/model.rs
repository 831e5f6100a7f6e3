use crate::library::Library;
use crate::transport::TransportSession;

/// Everything the UI reads each frame: the immutable library, the mutable
/// transport session, and the track-list cursor.
pub struct App {
    pub library: Library,
    pub session: TransportSession,
    /// Cursor position in the track list. Independent of what is playing.
    pub selected: usize,
    /// The resolved music root, shown in the status line.
    pub root_display: String,
}

impl App {
    pub fn new(library: Library, volume: u8) -> Self {
        let root_display = library.root().display().to_string();
        Self {
            library,
            session: TransportSession::new(volume),
            selected: 0,
            root_display,
        }
    }

    pub fn has_tracks(&self) -> bool {
        !self.library.is_empty()
    }

    /// Move the cursor down, wrapping to the top.
    pub fn cursor_next(&mut self) {
        if self.has_tracks() {
            self.selected = self.library.next_index(self.selected);
        }
    }

    /// Move the cursor up, wrapping to the bottom.
    pub fn cursor_prev(&mut self) {
        if self.has_tracks() {
            self.selected = self.library.prev_index(self.selected);
        }
    }

    pub fn cursor_top(&mut self) {
        self.selected = 0;
    }

    pub fn cursor_bottom(&mut self) {
        if self.has_tracks() {
            self.selected = self.library.len() - 1;
        }
    }
}
