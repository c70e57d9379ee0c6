// Copyright (C) 2026  Clipdeck Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Clip discovery on the local filesystem.
//!
//! The deck is built once at startup: every MP4 file directly inside the
//! configured media directory, sorted lexicographically by path so the set
//! order is reproducible between runs. Durations are probed with `lofty`
//! purely for display in the playlist screen; a clip that cannot be probed
//! still plays, it just shows without a duration.
//!
//! Nothing here validates that a file is actually decodable. Unreadable or
//! corrupt clips surface later through the player backend.

use std::path::{Path, PathBuf};

use lofty::prelude::*;
use lofty::probe::Probe;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Debug, Error)]
pub(crate) enum LibraryError {
    #[error("media directory {0:?} does not exist or is not a directory")]
    NotADirectory(PathBuf),
}

/// One entry of the clip deck.
#[derive(Clone, Debug)]
pub(crate) struct ClipEntry {
    pub(crate) path: PathBuf,
    /// File name used in the playlist screen.
    pub(crate) name: String,
    /// Probed duration in whole seconds, if the file could be read.
    pub(crate) duration: Option<u64>,
}

/// Scans `root` for MP4 files and returns the deck in playback order.
///
/// The scan is intentionally shallow: only files directly inside `root` are
/// considered, matching the flat "data folder" layout the deck is driven
/// from. The extension match is case-insensitive.
///
/// # Errors
///
/// Returns an error if `root` is not an existing directory. An existing but
/// empty directory yields an empty deck; deciding what to do about that is
/// the caller's business.
pub(crate) fn scan_clips(root: &Path) -> Result<Vec<ClipEntry>, LibraryError> {
    if !root.is_dir() {
        return Err(LibraryError::NotADirectory(root.to_path_buf()));
    }

    let mut clips: Vec<ClipEntry> = WalkDir::new(root)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("mp4"))
        })
        .map(|e| clip_entry(e.path()))
        .collect();

    clips.sort_by(|a, b| a.path.cmp(&b.path));

    Ok(clips)
}

fn clip_entry(path: &Path) -> ClipEntry {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    ClipEntry {
        path: path.to_path_buf(),
        name,
        duration: probe_duration(path),
    }
}

/// Reads the container duration, best effort.
fn probe_duration(path: &Path) -> Option<u64> {
    match Probe::open(path).and_then(|p| p.read()) {
        Ok(tagged_file) => Some(tagged_file.properties().duration().as_secs()),
        Err(e) => {
            tracing::warn!("Failed to probe duration of {:?}: {}", path, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    struct TempMediaDir {
        root: PathBuf,
    }

    impl TempMediaDir {
        fn new(label: &str) -> Self {
            let root = std::env::temp_dir().join(format!(
                "clipdeck-library-test-{}-{}",
                label,
                std::process::id()
            ));
            fs::create_dir_all(&root).unwrap();
            Self { root }
        }

        fn touch(&self, name: &str) {
            fs::write(self.root.join(name), b"").unwrap();
        }
    }

    impl Drop for TempMediaDir {
        fn drop(&mut self) {
            fs::remove_dir_all(&self.root).ok();
        }
    }

    #[test]
    fn scan_filters_by_extension_and_sorts_by_path() {
        let dir = TempMediaDir::new("filter-sort");
        dir.touch("b.mp4");
        dir.touch("a.mp4");
        dir.touch("notes.txt");
        dir.touch("C.MP4");

        let clips = scan_clips(&dir.root).unwrap();

        let names: Vec<&str> = clips.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["C.MP4", "a.mp4", "b.mp4"]);
    }

    #[test]
    fn scan_is_not_recursive() {
        let dir = TempMediaDir::new("shallow");
        dir.touch("top.mp4");
        fs::create_dir_all(dir.root.join("nested")).unwrap();
        fs::write(dir.root.join("nested/deep.mp4"), b"").unwrap();

        let clips = scan_clips(&dir.root).unwrap();

        assert_eq!(clips.len(), 1);
        assert_eq!(clips[0].name, "top.mp4");
    }

    #[test]
    fn scan_of_empty_directory_yields_empty_deck() {
        let dir = TempMediaDir::new("empty");

        let clips = scan_clips(&dir.root).unwrap();

        assert!(clips.is_empty());
    }

    #[test]
    fn scan_of_missing_directory_is_an_error() {
        let missing = std::env::temp_dir().join("clipdeck-library-test-does-not-exist");

        assert!(scan_clips(&missing).is_err());
    }

    #[test]
    fn unreadable_clip_still_enters_the_deck_without_a_duration() {
        let dir = TempMediaDir::new("bad-container");
        // Not a real MP4; the duration probe fails but the entry survives.
        dir.touch("broken.mp4");

        let clips = scan_clips(&dir.root).unwrap();

        assert_eq!(clips.len(), 1);
        assert_eq!(clips[0].duration, None);
    }
}
