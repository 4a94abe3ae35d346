/*
 * This module is responsible for the two sync lists: the saved searches and
 * the playlists a user has marked for synchronization. Each namespace is
 * persisted as a small newline-delimited text file inside the `lists`
 * subfolder of the application state directory, and is rewritten in full on
 * every change.
 *
 * It includes a trait for sync-list operations (`SyncListStoreOperations`) to
 * facilitate testing and dependency injection, a concrete implementation
 * (`CoreSyncListStore`), and the `reconcile` helper that prunes entries whose
 * search or playlist no longer exists.
 */
use super::models::SyncNamespace;
use crate::core::path_utils;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::PathBuf;

pub const SYNC_LISTS_SUBFOLDER_NAME: &str = "lists";

#[derive(Debug)]
pub enum SyncListError {
    Io(io::Error),
    NoStateDirectory,
}

impl From<io::Error> for SyncListError {
    fn from(err: io::Error) -> Self {
        SyncListError::Io(err)
    }
}

impl std::fmt::Display for SyncListError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncListError::Io(e) => write!(f, "I/O error: {e}"),
            SyncListError::NoStateDirectory => {
                write!(f, "Could not determine state directory for sync lists")
            }
        }
    }
}

impl std::error::Error for SyncListError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SyncListError::Io(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SyncListError>;

pub trait SyncListStoreOperations: Send + Sync {
    fn load(&self, namespace: SyncNamespace) -> Result<Vec<String>>;
    fn save(&self, namespace: SyncNamespace, names: &[String]) -> Result<()>;
}

pub struct CoreSyncListStore {
    lists_dir: PathBuf,
}

impl CoreSyncListStore {
    /*
     * Creates a store rooted at `<app state dir>/lists` for the given
     * application name. Fails if the state directory cannot be determined or
     * created.
     */
    pub fn new(app_name: &str) -> Result<Self> {
        path_utils::get_base_app_state_dir(app_name)
            .map(|dir| CoreSyncListStore {
                lists_dir: dir.join(SYNC_LISTS_SUBFOLDER_NAME),
            })
            .ok_or(SyncListError::NoStateDirectory)
    }

    /// Creates a store over an explicit directory. Used by tests and hosts
    /// that manage their own state location.
    pub fn with_lists_dir(lists_dir: PathBuf) -> Self {
        CoreSyncListStore { lists_dir }
    }

    fn file_path(&self, namespace: SyncNamespace) -> PathBuf {
        self.lists_dir.join(namespace.file_name())
    }
}

impl SyncListStoreOperations for CoreSyncListStore {
    /*
     * Loads the names stored for a namespace. A missing file is an empty
     * list, not an error. Entries are split on newlines, trimmed, and blank
     * lines dropped.
     */
    fn load(&self, namespace: SyncNamespace) -> Result<Vec<String>> {
        let file_path = self.file_path(namespace);
        if !file_path.exists() {
            log::debug!("SyncListStore: {file_path:?} does not exist, treating as empty list.");
            return Ok(Vec::new());
        }

        let mut file = File::open(&file_path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let names: Vec<String> = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();
        log::debug!(
            "SyncListStore: Loaded {} names for {namespace:?} from {file_path:?}.",
            names.len()
        );
        Ok(names)
    }

    /*
     * Overwrites a namespace's file with one name per line. When the file
     * does not exist and there is nothing to save, no write happens, so an
     * untouched installation never grows empty artifact files. Parent
     * directories are created on demand.
     */
    fn save(&self, namespace: SyncNamespace, names: &[String]) -> Result<()> {
        let file_path = self.file_path(namespace);
        if !file_path.exists() && names.is_empty() {
            log::trace!("SyncListStore: Nothing to persist for {namespace:?}, skipping write.");
            return Ok(());
        }

        if !self.lists_dir.is_dir() {
            fs::create_dir_all(&self.lists_dir)?;
            log::debug!("SyncListStore: Created lists directory {:?}.", self.lists_dir);
        }

        let mut file = File::create(&file_path)?;
        file.write_all(names.join("\n").as_bytes())?;
        log::debug!(
            "SyncListStore: Saved {} names for {namespace:?} to {file_path:?}.",
            names.len()
        );
        Ok(())
    }
}

/*
 * Intersects a namespace's stored names with the names that currently exist
 * and persists the pruned result straight back, so stale entries disappear
 * from disk as a side effect of reading. Load failures degrade to an empty
 * list and save failures are logged; neither aborts the caller.
 */
pub fn reconcile(
    store: &dyn SyncListStoreOperations,
    namespace: SyncNamespace,
    valid_names: &[String],
) -> Vec<String> {
    let stored = match store.load(namespace) {
        Ok(names) => names,
        Err(e) => {
            log::warn!("SyncListStore: Failed to load {namespace:?} list, treating as empty: {e}");
            Vec::new()
        }
    };

    let kept: Vec<String> = stored
        .into_iter()
        .filter(|name| valid_names.contains(name))
        .collect();

    if let Err(e) = store.save(namespace, &kept) {
        log::warn!("SyncListStore: Failed to persist pruned {namespace:?} list: {e}");
    }
    kept
}

#[cfg(test)]
mod sync_list_tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(temp_dir: &TempDir) -> CoreSyncListStore {
        CoreSyncListStore::with_lists_dir(temp_dir.path().join(SYNC_LISTS_SUBFOLDER_NAME))
    }

    #[test]
    fn test_load_non_existent_file_returns_empty() -> Result<()> {
        let temp_dir = TempDir::new().expect("Failed to create temp dir for test");
        let store = store_in(&temp_dir);

        let names = store.load(SyncNamespace::Queries)?;
        assert!(names.is_empty());
        Ok(())
    }

    #[test]
    fn test_save_empty_list_creates_no_file() -> Result<()> {
        let temp_dir = TempDir::new().expect("Failed to create temp dir for test");
        let store = store_in(&temp_dir);

        store.save(SyncNamespace::Playlists, &[])?;

        let file_path = temp_dir
            .path()
            .join(SYNC_LISTS_SUBFOLDER_NAME)
            .join(SyncNamespace::Playlists.file_name());
        assert!(!file_path.exists(), "Empty save must not create a file");
        Ok(())
    }

    #[test]
    fn test_save_and_load_round_trip() -> Result<()> {
        let temp_dir = TempDir::new().expect("Failed to create temp dir for test");
        let store = store_in(&temp_dir);
        let names = vec!["Morning Mix".to_string(), "Favourites".to_string()];

        store.save(SyncNamespace::Playlists, &names)?;
        let loaded = store.load(SyncNamespace::Playlists)?;

        assert_eq!(loaded, names);
        Ok(())
    }

    #[test]
    fn test_save_empty_over_existing_file_truncates() -> Result<()> {
        let temp_dir = TempDir::new().expect("Failed to create temp dir for test");
        let store = store_in(&temp_dir);

        store.save(SyncNamespace::Queries, &["A".to_string()])?;
        store.save(SyncNamespace::Queries, &[])?;

        assert!(store.load(SyncNamespace::Queries)?.is_empty());
        Ok(())
    }

    #[test]
    fn test_namespaces_are_independent() -> Result<()> {
        let temp_dir = TempDir::new().expect("Failed to create temp dir for test");
        let store = store_in(&temp_dir);

        store.save(SyncNamespace::Queries, &["rock".to_string()])?;
        store.save(SyncNamespace::Playlists, &["Party".to_string()])?;

        assert_eq!(store.load(SyncNamespace::Queries)?, vec!["rock".to_string()]);
        assert_eq!(
            store.load(SyncNamespace::Playlists)?,
            vec!["Party".to_string()]
        );
        Ok(())
    }

    #[test]
    fn test_load_skips_blank_lines() -> Result<()> {
        let temp_dir = TempDir::new().expect("Failed to create temp dir for test");
        let lists_dir = temp_dir.path().join(SYNC_LISTS_SUBFOLDER_NAME);
        fs::create_dir_all(&lists_dir).expect("Failed to create lists dir");
        fs::write(
            lists_dir.join(SyncNamespace::Queries.file_name()),
            "rock\n\n  \njazz\n",
        )
        .expect("Failed to seed sync list file");
        let store = store_in(&temp_dir);

        let names = store.load(SyncNamespace::Queries)?;
        assert_eq!(names, vec!["rock".to_string(), "jazz".to_string()]);
        Ok(())
    }

    #[test]
    fn test_reconcile_prunes_and_resaves() -> Result<()> {
        let temp_dir = TempDir::new().expect("Failed to create temp dir for test");
        let store = store_in(&temp_dir);
        store.save(
            SyncNamespace::Playlists,
            &["A".to_string(), "B".to_string(), "C".to_string()],
        )?;

        let valid = vec!["A".to_string(), "C".to_string(), "D".to_string()];
        let kept = reconcile(&store, SyncNamespace::Playlists, &valid);

        assert_eq!(kept, vec!["A".to_string(), "C".to_string()]);
        // The pruned list must already be on disk.
        assert_eq!(store.load(SyncNamespace::Playlists)?, kept);
        Ok(())
    }

    #[test]
    fn test_reconcile_missing_file_yields_empty_without_creating_it() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir for test");
        let store = store_in(&temp_dir);

        let kept = reconcile(&store, SyncNamespace::Queries, &["A".to_string()]);

        assert!(kept.is_empty());
        let file_path = temp_dir
            .path()
            .join(SYNC_LISTS_SUBFOLDER_NAME)
            .join(SyncNamespace::Queries.file_name());
        assert!(!file_path.exists());
    }
}
