use std::path::{Path, PathBuf};

/// One playable entry: a display name and a path relative to the library root.
///
/// The relative path is the stable identifier of a track within a session;
/// the absolute path is reconstructed from the root whenever the engine
/// needs to open the file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Track {
    pub name: String,
    pub rel_path: PathBuf,
}

/// The ordered collection of all discovered tracks for the session.
///
/// Order is discovery order; `next_index`/`prev_index` adjacency and the
/// shuffle pool both follow it. An empty library is valid.
pub struct Library {
    root: PathBuf,
    tracks: Vec<Track>,
}

impl Library {
    pub fn new(root: PathBuf, tracks: Vec<Track>) -> Self {
        Self { root, tracks }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Rebuild the absolute path for the track at `index`.
    pub fn absolute_path(&self, index: usize) -> Option<PathBuf> {
        self.tracks.get(index).map(|t| self.root.join(&t.rel_path))
    }

    /// Index after `index`, wrapping to the start past the end.
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.tracks.len()
    }

    /// Index before `index`, wrapping to the end before the start.
    pub fn prev_index(&self, index: usize) -> usize {
        (index + self.tracks.len() - 1) % self.tracks.len()
    }
}
