//! Tag and duration probing for tracks.
//!
//! Tag reading never fails: any decode problem collapses into `"Unknown"`
//! sentinel values and a diagnostic log line. Duration reading is fallible
//! and the caller decides what a failure means.

use std::path::{Path, PathBuf};
use std::time::Duration;

use lofty::{AudioFile, ItemKey, TaggedFileExt};
use thiserror::Error;

pub const UNKNOWN: &str = "Unknown";

/// Artist/album/year display values for one track.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackTags {
    pub artist: String,
    pub album: String,
    pub year: String,
}

impl Default for TrackTags {
    fn default() -> Self {
        Self {
            artist: UNKNOWN.to_string(),
            album: UNKNOWN.to_string(),
            year: UNKNOWN.to_string(),
        }
    }
}

#[derive(Debug, Error)]
#[error("failed to read audio properties of {}: {}", .path.display(), .source)]
pub struct MetadataError {
    path: PathBuf,
    #[source]
    source: lofty::error::LoftyError,
}

/// Source of track tags and durations.
///
/// The transport machine talks to this seam rather than to `lofty`
/// directly so its transitions can be exercised without fixture files.
pub trait MetadataSource {
    /// Read display tags; failures are absorbed into [`TrackTags::default`].
    fn tags(&self, path: &Path) -> TrackTags;

    /// Decode the track length.
    fn duration(&self, path: &Path) -> Result<Duration, MetadataError>;
}

/// The production source: probes files with `lofty`.
pub struct LoftyProbe;

impl MetadataSource for LoftyProbe {
    fn tags(&self, path: &Path) -> TrackTags {
        match lofty::read_from_path(path) {
            Ok(tagged) => {
                let mut tags = TrackTags::default();
                if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
                    if let Some(v) = non_empty(tag.get_string(&ItemKey::TrackArtist)) {
                        tags.artist = v;
                    }
                    if let Some(v) = non_empty(tag.get_string(&ItemKey::AlbumTitle)) {
                        tags.album = v;
                    }
                    if let Some(v) = non_empty(
                        tag.get_string(&ItemKey::Year)
                            .or_else(|| tag.get_string(&ItemKey::RecordingDate)),
                    ) {
                        tags.year = v;
                    }
                }
                tags
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "tag read failed, using sentinels");
                TrackTags::default()
            }
        }
    }

    fn duration(&self, path: &Path) -> Result<Duration, MetadataError> {
        let tagged = lofty::read_from_path(path).map_err(|source| MetadataError {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(tagged.properties().duration())
    }
}

fn non_empty(v: Option<&str>) -> Option<String> {
    v.map(str::trim).filter(|s| !s.is_empty()).map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn tags_of_unreadable_file_are_all_unknown() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("garbage.mp3");
        fs::write(&path, b"not a real mp3").unwrap();

        let tags = LoftyProbe.tags(&path);
        assert_eq!(tags.artist, UNKNOWN);
        assert_eq!(tags.album, UNKNOWN);
        assert_eq!(tags.year, UNKNOWN);
    }

    #[test]
    fn tags_of_missing_file_are_all_unknown() {
        let tags = LoftyProbe.tags(Path::new("/no/such/file.mp3"));
        assert_eq!(tags, TrackTags::default());
    }

    #[test]
    fn duration_of_unreadable_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("garbage.mp3");
        fs::write(&path, b"not a real mp3").unwrap();

        let err = LoftyProbe.duration(&path).unwrap_err();
        assert!(err.to_string().contains("garbage.mp3"));
    }
}
