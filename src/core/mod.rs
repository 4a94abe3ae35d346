/*
 * This module consolidates the core, host-agnostic logic of the plugin.
 * It re-exports the data model and the key abstractions
 * (`SyncListStoreOperations`, `SettingsStoreOperations`,
 * `M3uWriterOperations`, `SongLibraryOperations`, `QueryEngineOperations`)
 * for sync-list persistence, export settings, M3U serialization and the
 * seams to the hosting player's library and query engine.
 */
pub mod config;
pub mod library;
pub mod m3u;
pub mod models;
pub mod path_utils;
pub mod queries;
pub mod sync_lists;

// Re-export key structures and enums
pub use models::{ExportSettings, SavedSearch, Song, SyncNamespace};

// Re-export sync-list related items
pub use sync_lists::{CoreSyncListStore, SyncListError, SyncListStoreOperations, reconcile};

// Re-export settings related items
pub use config::{CoreSettingsStore, SettingsError, SettingsStoreOperations};

// Re-export M3U related items
pub use m3u::{CoreM3uWriter, M3U_FILE_EXTENSION, M3uEntry, M3uWriterOperations};

// Re-export host collaborator seams
pub use library::SongLibraryOperations;
pub use queries::{
    QueryEngineOperations, QueryError, SAVED_SEARCHES_FILE_NAME, SongPredicate,
    read_saved_searches,
};
