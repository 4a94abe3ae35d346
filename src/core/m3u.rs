/*
 * Extended-M3U serialization. An export run turns each resolved song into an
 * `M3uEntry`, renders the whole playlist into one string and writes it to the
 * destination file in a single call. The writer is behind a trait
 * (`M3uWriterOperations`) so the orchestrator can be tested without touching
 * the file system.
 */
use super::models::Song;
use crate::core::path_utils;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

pub const M3U_FILE_EXTENSION: &str = "m3u";

const M3U_HEADER: &str = "#EXTM3U";

// One `#EXTINF` record: the display path written to the playlist, the title
// line, and the length in whole seconds (-1 when unknown).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct M3uEntry {
    pub path: String,
    pub title: String,
    pub length: i64,
}

impl M3uEntry {
    /*
     * Derives the playlist entry for one song. Remote streams keep their
     * location untouched and export with a bare title and unknown length;
     * local songs get the root rewrite applied and the full
     * "performers - title" line.
     */
    pub fn from_song(song: &Song, remove_root: &str, new_root: &str) -> Self {
        if song.is_stream {
            M3uEntry {
                path: song.filename.to_string_lossy().into_owned(),
                title: song.title.clone(),
                length: -1,
            }
        } else {
            let rewritten = path_utils::rewrite_root(&song.filename, remove_root, new_root);
            M3uEntry {
                path: rewritten.to_string_lossy().into_owned(),
                title: song.display_title(),
                length: song.length_secs,
            }
        }
    }
}

/// Renders a complete EXTM3U document: the header line, then per entry an
/// `#EXTINF:<length>,<title>` line followed by the path line.
pub fn render(entries: &[M3uEntry]) -> String {
    let mut document = String::from(M3U_HEADER);
    document.push('\n');
    for entry in entries {
        document.push_str(&format!("#EXTINF:{},{}\n", entry.length, entry.title));
        document.push_str(&entry.path);
        document.push('\n');
    }
    document
}

pub trait M3uWriterOperations: Send + Sync {
    fn write(&self, file_path: &Path, entries: &[M3uEntry]) -> io::Result<()>;
}

pub struct CoreM3uWriter {}

impl CoreM3uWriter {
    pub fn new() -> Self {
        CoreM3uWriter {}
    }
}

impl Default for CoreM3uWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl M3uWriterOperations for CoreM3uWriter {
    /*
     * Writes the rendered document to `file_path` as UTF-8 in one
     * `write_all`. Open and write errors propagate to the caller, which
     * decides whether the batch continues.
     */
    fn write(&self, file_path: &Path, entries: &[M3uEntry]) -> io::Result<()> {
        let document = render(entries);
        let mut file = File::create(file_path)?;
        file.write_all(document.as_bytes())?;
        log::debug!(
            "M3uWriter: Wrote {} entries to {file_path:?}.",
            entries.len()
        );
        Ok(())
    }
}
