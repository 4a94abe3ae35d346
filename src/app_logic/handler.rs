use crate::app_logic::status::{MessageSeverity, StatusSinkOperations};
use crate::app_logic::ui_constants;
use crate::core::{
    ExportSettings, M3U_FILE_EXTENSION, M3uEntry, M3uWriterOperations, QueryEngineOperations,
    SavedSearch, SettingsStoreOperations, Song, SongLibraryOperations, SyncListStoreOperations,
    SyncNamespace, path_utils, queries, sync_lists,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

// Application name used to derive the state directory when hosts construct
// the Core store implementations.
pub const APP_NAME_FOR_STATE: &str = "PlaylistSync";

// Checkbox row for one saved search or playlist as the panel should render it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncEntryState {
    pub name: String,
    pub enabled: bool,
}

// Snapshot handed to the host every time the preferences panel opens or is
// rebuilt: both checkbox lists plus the current draft settings for the three
// text fields.
#[derive(Debug, Clone)]
pub struct PanelState {
    pub searches: Vec<SyncEntryState>,
    pub playlists: Vec<SyncEntryState>,
    pub settings: ExportSettings,
}

// What one export run did. Validation failures leave both lists empty; a
// partially failed batch fills both.
#[derive(Debug, Default)]
pub struct ExportOutcome {
    pub written: Vec<PathBuf>,
    pub failed: Vec<PathBuf>,
}

/*
 * Drives the sync panel and the export pipeline in a host-agnostic manner.
 * Checkbox toggles, text edits and the export button arrive here as plain
 * method calls; every effect on the host player goes back out through the
 * injected collaborator traits. The three text fields are mirrored in
 * `draft_settings` and committed to the settings store only when an export
 * is actually run.
 */
pub struct SyncExportLogic {
    saved_searches_path: PathBuf,
    draft_settings: ExportSettings,
    sync_list_store: Arc<dyn SyncListStoreOperations>,
    settings_store: Arc<dyn SettingsStoreOperations>,
    library: Arc<dyn SongLibraryOperations>,
    query_engine: Arc<dyn QueryEngineOperations>,
    m3u_writer: Arc<dyn M3uWriterOperations>,
    status_sink: Arc<dyn StatusSinkOperations>,
}

impl SyncExportLogic {
    /*
     * Initializes the logic with its collaborators and seeds the draft
     * settings from the settings store. A store that cannot be read starts
     * the panel from all-empty defaults rather than failing construction.
     */
    pub fn new(
        saved_searches_path: PathBuf,
        sync_list_store: Arc<dyn SyncListStoreOperations>,
        settings_store: Arc<dyn SettingsStoreOperations>,
        library: Arc<dyn SongLibraryOperations>,
        query_engine: Arc<dyn QueryEngineOperations>,
        m3u_writer: Arc<dyn M3uWriterOperations>,
        status_sink: Arc<dyn StatusSinkOperations>,
    ) -> Self {
        let draft_settings = settings_store.load_settings().unwrap_or_else(|e| {
            log::warn!("AppLogic: Could not load export settings, starting from defaults: {e}");
            ExportSettings::default()
        });
        SyncExportLogic {
            saved_searches_path,
            draft_settings,
            sync_list_store,
            settings_store,
            library,
            query_engine,
            m3u_writer,
            status_sink,
        }
    }

    /*
     * Builds the panel snapshot. Reading the current saved searches and
     * playlists also reconciles both sync lists against them, so entries for
     * deleted searches/playlists are pruned from disk as a side effect of
     * opening the panel.
     */
    pub fn refresh_panel(&self) -> PanelState {
        let searches = self.load_saved_searches();
        let search_names: Vec<String> = searches.iter().map(|s| s.name.clone()).collect();
        let enabled_queries = sync_lists::reconcile(
            self.sync_list_store.as_ref(),
            SyncNamespace::Queries,
            &search_names,
        );

        let playlist_names = self.library.playlist_names();
        let enabled_playlists = sync_lists::reconcile(
            self.sync_list_store.as_ref(),
            SyncNamespace::Playlists,
            &playlist_names,
        );

        PanelState {
            searches: search_names
                .iter()
                .map(|name| SyncEntryState {
                    name: name.clone(),
                    enabled: enabled_queries.contains(name),
                })
                .collect(),
            playlists: playlist_names
                .iter()
                .map(|name| SyncEntryState {
                    name: name.clone(),
                    enabled: enabled_playlists.contains(name),
                })
                .collect(),
            settings: self.draft_settings.clone(),
        }
    }

    /// Handles a toggle of a saved search's checkbox.
    pub fn set_query_enabled(&self, name: &str, enabled: bool) {
        self.set_sync_entry(SyncNamespace::Queries, name, enabled);
    }

    /// Handles a toggle of a playlist's checkbox.
    pub fn set_playlist_enabled(&self, name: &str, enabled: bool) {
        self.set_sync_entry(SyncNamespace::Playlists, name, enabled);
    }

    /*
     * Sets membership of one name in a namespace's sync list and persists
     * the result immediately. Disabling removes exactly that name and leaves
     * the rest of the list untouched. A failed write is reported as a
     * non-blocking warning; the host keeps running with the in-memory state.
     */
    fn set_sync_entry(&self, namespace: SyncNamespace, name: &str, enabled: bool) {
        let mut names = match self.sync_list_store.load(namespace) {
            Ok(names) => names,
            Err(e) => {
                log::warn!("AppLogic: Could not load {namespace:?} list, treating as empty: {e}");
                Vec::new()
            }
        };

        if enabled {
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        } else {
            names.retain(|n| n != name);
        }

        if let Err(e) = self.sync_list_store.save(namespace, &names) {
            log::warn!("AppLogic: Failed to persist {namespace:?} selection: {e}");
            self.status_sink.report(
                MessageSeverity::Warning,
                ui_constants::TITLE_SELECTION_NOT_SAVED,
                &format!("Could not persist the selection for \"{name}\"."),
            );
        }
    }

    // Draft settings mirror the panel's text fields while it is open.
    pub fn set_destination(&mut self, text: &str) {
        self.draft_settings.destination = text.to_string();
    }

    pub fn set_remove_root(&mut self, text: &str) {
        self.draft_settings.remove_root = text.to_string();
    }

    pub fn set_new_root(&mut self, text: &str) {
        self.draft_settings.new_root = text.to_string();
    }

    pub fn draft_settings(&self) -> &ExportSettings {
        &self.draft_settings
    }

    /*
     * Runs the export for all enabled playlists and saved searches.
     *
     * The draft settings are committed to the settings store first, even if
     * validation then rejects them; a failed commit degrades to a warning.
     * Validation failures halt the run with an error dialog and an empty
     * outcome. A file that cannot be written is reported and skipped while
     * the rest of the batch proceeds.
     */
    pub fn run_export(&self) -> ExportOutcome {
        log::debug!("AppLogic: Running playlist export");
        if let Err(e) = self.settings_store.save_settings(&self.draft_settings) {
            log::warn!("AppLogic: Failed to persist export settings: {e}");
            self.status_sink.report(
                MessageSeverity::Warning,
                ui_constants::TITLE_SETTINGS_NOT_SAVED,
                &format!("Could not persist the export settings: {e}"),
            );
        }

        let mut outcome = ExportOutcome::default();
        if !self.check_valid_inputs() {
            return outcome;
        }
        self.export_all(&mut outcome);
        log::debug!(
            "AppLogic: Export finished, {} written, {} failed.",
            outcome.written.len(),
            outcome.failed.len()
        );
        outcome
    }

    /*
     * Ensures the destination path is usable before any file is touched:
     * it must be non-empty and absolute. Each failure is reported through a
     * blocking error dialog on the status sink.
     */
    fn check_valid_inputs(&self) -> bool {
        let destination = &self.draft_settings.destination;
        if destination.is_empty() {
            self.status_sink.report(
                MessageSeverity::Error,
                ui_constants::TITLE_NO_DESTINATION,
                ui_constants::MSG_NO_DESTINATION,
            );
            return false;
        }
        if !Path::new(destination).is_absolute() {
            self.status_sink.report(
                MessageSeverity::Error,
                ui_constants::TITLE_DESTINATION_NOT_ABSOLUTE,
                ui_constants::MSG_DESTINATION_NOT_ABSOLUTE,
            );
            return false;
        }
        true
    }

    // Playlists are exported before saved searches; within each namespace
    // the reconciled list order decides.
    fn export_all(&self, outcome: &mut ExportOutcome) {
        let playlist_names = self.library.playlist_names();
        let enabled_playlists = sync_lists::reconcile(
            self.sync_list_store.as_ref(),
            SyncNamespace::Playlists,
            &playlist_names,
        );
        for playlist_name in &enabled_playlists {
            self.save_playlist_to_m3u(playlist_name, outcome);
        }

        let searches = self.load_saved_searches();
        let search_names: Vec<String> = searches.iter().map(|s| s.name.clone()).collect();
        let enabled_queries = sync_lists::reconcile(
            self.sync_list_store.as_ref(),
            SyncNamespace::Queries,
            &search_names,
        );
        for query_name in &enabled_queries {
            self.save_query_to_m3u(query_name, &searches, outcome);
        }
    }

    fn save_playlist_to_m3u(&self, playlist_name: &str, outcome: &mut ExportOutcome) {
        let Some(songs) = self.library.playlist_songs(playlist_name) else {
            log::warn!("AppLogic: Playlist '{playlist_name}' vanished before export, skipping.");
            return;
        };
        self.write_m3u_file(playlist_name, &songs, outcome);
    }

    fn save_query_to_m3u(
        &self,
        query_name: &str,
        searches: &[SavedSearch],
        outcome: &mut ExportOutcome,
    ) {
        // Scan from the end so a later duplicate definition wins.
        let Some(search) = searches.iter().rev().find(|s| s.name == query_name) else {
            return;
        };
        let predicate = match self.query_engine.parse(&search.query) {
            Ok(predicate) => predicate,
            Err(e) => {
                log::warn!("AppLogic: Skipping saved search '{query_name}': {e}");
                self.status_sink.report(
                    MessageSeverity::Warning,
                    ui_constants::TITLE_EXPORT_FAILED,
                    &format!("The saved search \"{query_name}\" could not be evaluated."),
                );
                return;
            }
        };

        let songs: Vec<Song> = self
            .library
            .all_songs()
            .into_iter()
            .filter(|song| predicate.matches(song))
            .collect();
        self.write_m3u_file(query_name, &songs, outcome);
    }

    /*
     * Writes one playlist file: `<destination>/<safe name>.m3u`, with every
     * song path run through the configured root rewrite. Failures are
     * reported with the failing path and recorded in the outcome, but do not
     * stop the remaining files of the run.
     */
    fn write_m3u_file(&self, name: &str, songs: &[Song], outcome: &mut ExportOutcome) {
        let safe_name = path_utils::make_safe_name(name);
        let file_path = Path::new(&self.draft_settings.destination)
            .join(format!("{safe_name}.{M3U_FILE_EXTENSION}"));

        let entries: Vec<M3uEntry> = songs
            .iter()
            .map(|song| {
                M3uEntry::from_song(
                    song,
                    &self.draft_settings.remove_root,
                    &self.draft_settings.new_root,
                )
            })
            .collect();

        match self.m3u_writer.write(&file_path, &entries) {
            Ok(()) => {
                log::debug!("AppLogic: Exported '{name}' to {file_path:?}.");
                outcome.written.push(file_path);
            }
            Err(e) => {
                log::error!("AppLogic: Writing {file_path:?} failed: {e}");
                self.status_sink.report(
                    MessageSeverity::Error,
                    ui_constants::TITLE_EXPORT_FAILED,
                    &format!("Writing to {} failed.", file_path.display()),
                );
                outcome.failed.push(file_path);
            }
        }
    }

    fn load_saved_searches(&self) -> Vec<SavedSearch> {
        match queries::read_saved_searches(&self.saved_searches_path) {
            Ok(searches) => searches,
            Err(e) => {
                log::warn!("AppLogic: Could not read saved searches: {e}");
                Vec::new()
            }
        }
    }
}
