/*
 * Defines the user-visible dialog titles and messages the orchestrator hands
 * to the status sink. Keeping them in one place lets the hosting player map
 * them to its own dialog plumbing (and, eventually, translation).
 */

// Shown when the export button is pressed with no destination configured.
pub const TITLE_NO_DESTINATION: &str = "No destination path provided";
pub const MSG_NO_DESTINATION: &str =
    "Please specify the directory where songs should be exported.";

// Shown when the configured destination is not an absolute path.
pub const TITLE_DESTINATION_NOT_ABSOLUTE: &str = "Export path is not absolute";
pub const MSG_DESTINATION_NOT_ABSOLUTE: &str = "Please select an absolute export path";

// Shown when one playlist file cannot be written; the rest of the batch
// still proceeds.
pub const TITLE_EXPORT_FAILED: &str = "Unable to export playlist";

// Non-blocking warning when a toggled selection could not be persisted.
pub const TITLE_SELECTION_NOT_SAVED: &str = "Selection not saved";

// Non-blocking warning when committing the export settings failed.
pub const TITLE_SETTINGS_NOT_SAVED: &str = "Settings not saved";
