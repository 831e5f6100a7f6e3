use std::path::Path;

use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::model::{Library, Track};

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Walk `root` once and collect every matching audio file as a [`Track`].
///
/// Tracks keep the walk's discovery order (no sorting): it defines
/// next/previous adjacency for the whole session. A missing root yields an
/// empty library rather than an error.
pub fn scan(root: &Path, settings: &LibrarySettings) -> Library {
    let mut tracks: Vec<Track> = Vec::new();

    let mut walker = WalkDir::new(root).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if path.is_file()
            && (settings.include_hidden || !is_hidden(path))
            && is_audio_file(path, settings)
        {
            let Ok(rel_path) = path.strip_prefix(root) else {
                continue;
            };

            let name = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("UNKNOWN")
                .to_string();

            tracks.push(Track {
                name,
                rel_path: rel_path.to_path_buf(),
            });
        }
    }

    Library::new(root.to_path_buf(), tracks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn is_audio_file_matches_configured_extensions_case_insensitive() {
        let settings = LibrarySettings::default();
        assert!(is_audio_file(Path::new("/tmp/a.mp3"), &settings));
        assert!(is_audio_file(Path::new("/tmp/a.MP3"), &settings));
        assert!(!is_audio_file(Path::new("/tmp/a.flac"), &settings));
        assert!(!is_audio_file(Path::new("/tmp/a.txt"), &settings));
        assert!(!is_audio_file(Path::new("/tmp/a"), &settings));
    }

    #[test]
    fn scan_of_missing_root_yields_empty_library() {
        let library = scan(
            Path::new("/definitely/not/a/real/music/folder"),
            &LibrarySettings::default(),
        );
        assert!(library.is_empty());
    }

    #[test]
    fn scan_filters_non_audio_and_keeps_relative_paths() {
        let dir = tempdir().unwrap();
        let sub = dir.path().join("album");
        fs::create_dir_all(&sub).unwrap();

        fs::write(dir.path().join("a.MP3"), b"not a real mp3").unwrap();
        fs::write(sub.join("b.mp3"), b"not a real mp3").unwrap();
        fs::write(dir.path().join("c.txt"), b"ignore me").unwrap();

        let library = scan(dir.path(), &LibrarySettings::default());
        assert_eq!(library.len(), 2);
        assert_eq!(library.root(), dir.path());

        let mut rels: Vec<PathBuf> =
            library.tracks().iter().map(|t| t.rel_path.clone()).collect();
        rels.sort();
        assert_eq!(rels, vec![PathBuf::from("a.MP3"), sub.strip_prefix(dir.path()).unwrap().join("b.mp3")]);

        // Display names are the file stems.
        let mut names: Vec<&str> = library.tracks().iter().map(|t| t.name.as_str()).collect();
        names.sort();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn scan_respects_include_hidden_false() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".hidden.mp3"), b"not real").unwrap();
        fs::write(dir.path().join("visible.mp3"), b"not real").unwrap();

        let settings = LibrarySettings::default();
        assert!(!settings.include_hidden);
        let library = scan(dir.path(), &settings);

        assert_eq!(library.len(), 1);
        assert_eq!(library.tracks()[0].name, "visible");
    }

    #[test]
    fn scan_respects_recursive_false() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("root.mp3"), b"not real").unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir_all(&sub).unwrap();
        fs::write(sub.join("child.mp3"), b"not real").unwrap();

        let settings = LibrarySettings {
            recursive: false,
            ..LibrarySettings::default()
        };
        let library = scan(dir.path(), &settings);
        assert_eq!(library.len(), 1);
        assert_eq!(library.tracks()[0].name, "root");
    }

    #[test]
    fn scan_respects_max_depth() {
        let dir = tempdir().unwrap();
        let d1 = dir.path().join("d1");
        let d2 = d1.join("d2");
        fs::create_dir_all(&d2).unwrap();
        fs::write(dir.path().join("root.mp3"), b"not real").unwrap();
        fs::write(d1.join("one.mp3"), b"not real").unwrap();
        fs::write(d2.join("two.mp3"), b"not real").unwrap();

        // WalkDir depth counts root as 0, children as 1, grandchildren as 2...
        // With max_depth=2 we should see root + d1/*, but not d1/d2/*.
        let settings = LibrarySettings {
            max_depth: Some(2),
            ..LibrarySettings::default()
        };
        let library = scan(dir.path(), &settings);

        let names: Vec<String> = library.tracks().iter().map(|t| t.name.clone()).collect();
        assert!(names.contains(&"root".to_string()));
        assert!(names.contains(&"one".to_string()));
        assert!(!names.contains(&"two".to_string()));
    }
}
