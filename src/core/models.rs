use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// Identifies one of the two independent sync-list namespaces. Each namespace
// persists to its own file under the `lists` subfolder of the state directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncNamespace {
    Queries,
    Playlists,
}

impl SyncNamespace {
    pub fn file_name(&self) -> &'static str {
        match self {
            SyncNamespace::Queries => "queries.sync",
            SyncNamespace::Playlists => "playlists.sync",
        }
    }
}

// A song record as handed over by the hosting player's library. Read-only from
// this crate's perspective; exports derive `M3uEntry` values from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Song {
    pub filename: PathBuf,
    pub title: String,
    pub performers: Vec<String>,
    pub version: Option<String>,
    pub length_secs: i64,
    // True for remote streams, whose duration is unknown and whose location
    // must not be run through root rewriting.
    pub is_stream: bool,
}

impl Song {
    /// Creates a plain local song with no performers, version or stream flag.
    pub fn new(filename: PathBuf, title: String, length_secs: i64) -> Self {
        Song {
            filename,
            title,
            performers: Vec::new(),
            version: None,
            length_secs,
            is_stream: false,
        }
    }

    /*
     * The title line used for local songs in exported playlists:
     * performers joined by ", ", then " - ", then the title with its version
     * suffix appended when one exists.
     */
    pub fn display_title(&self) -> String {
        let people = self.performers.join(", ");
        match &self.version {
            Some(version) => format!("{people} - {} - {version}", self.title),
            None => format!("{people} - {}", self.title),
        }
    }
}

// A named query expression read from the saved-search source file. The query
// text is opaque here; parsing and evaluation belong to the host's query
// engine collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedSearch {
    pub name: String,
    pub query: String,
}

// The three user-editable export settings. This is the structure that gets
// persisted as JSON by the settings store; the orchestrator additionally keeps
// a draft copy mirroring the panel's text fields until export commits it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSettings {
    pub destination: String,
    pub remove_root: String,
    pub new_root: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_song_new_defaults() {
        let s = Song::new(PathBuf::from("/music/a.mp3"), "A".into(), 120);
        assert!(s.performers.is_empty());
        assert!(s.version.is_none());
        assert!(!s.is_stream);
        assert_eq!(s.length_secs, 120);
    }

    #[test]
    fn test_display_title_joins_performers() {
        let mut s = Song::new(PathBuf::from("/music/a.mp3"), "Song".into(), 10);
        s.performers = vec!["Alice".into(), "Bob".into()];
        assert_eq!(s.display_title(), "Alice, Bob - Song");
    }

    #[test]
    fn test_display_title_appends_version() {
        let mut s = Song::new(PathBuf::from("/music/a.mp3"), "Song".into(), 10);
        s.performers = vec!["Alice".into()];
        s.version = Some("Live".into());
        assert_eq!(s.display_title(), "Alice - Song - Live");
    }

    #[test]
    fn test_sync_namespace_file_names_differ() {
        assert_eq!(SyncNamespace::Queries.file_name(), "queries.sync");
        assert_eq!(SyncNamespace::Playlists.file_name(), "playlists.sync");
    }
}
