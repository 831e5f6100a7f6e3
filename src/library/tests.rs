use std::path::PathBuf;

use super::model::{Library, Track};

fn t(name: &str, rel: &str) -> Track {
    Track {
        name: name.into(),
        rel_path: PathBuf::from(rel),
    }
}

fn lib(tracks: Vec<Track>) -> Library {
    Library::new(PathBuf::from("/music"), tracks)
}

#[test]
fn absolute_path_joins_root_and_relative_path() {
    let library = lib(vec![t("a", "album/a.mp3")]);
    assert_eq!(
        library.absolute_path(0),
        Some(PathBuf::from("/music/album/a.mp3"))
    );
    assert_eq!(library.absolute_path(1), None);
}

#[test]
fn next_and_prev_wrap_around_with_modulo_arithmetic() {
    let library = lib(vec![t("a", "a.mp3"), t("b", "b.mp3"), t("c", "c.mp3")]);

    assert_eq!(library.next_index(0), 1);
    assert_eq!(library.next_index(2), 0);
    assert_eq!(library.prev_index(0), 2);
    assert_eq!(library.prev_index(1), 0);

    // Next then previous from any index returns to the original track.
    for i in 0..library.len() {
        assert_eq!(library.prev_index(library.next_index(i)), i);
    }
}

#[test]
fn single_track_library_wraps_onto_itself() {
    let library = lib(vec![t("only", "only.mp3")]);
    assert_eq!(library.next_index(0), 0);
    assert_eq!(library.prev_index(0), 0);
}

#[test]
fn empty_library_is_valid() {
    let library = lib(Vec::new());
    assert!(library.is_empty());
    assert_eq!(library.len(), 0);
    assert_eq!(library.get(0), None);
}
