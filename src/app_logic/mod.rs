/*
 * This module provides the application logic layer, primarily centered around
 * `SyncExportLogic`, which reacts to panel events (checkbox toggles, text
 * edits, the export button) and drives the sync-list store and M3U export
 * pipeline. Unit tests for `SyncExportLogic` are in `handler_tests.rs`.
 */
pub mod handler;
pub mod status;
pub mod ui_constants;


pub use handler::{
    APP_NAME_FOR_STATE, ExportOutcome, PanelState, SyncEntryState, SyncExportLogic,
};
pub use status::{MessageSeverity, StatusSinkOperations};
