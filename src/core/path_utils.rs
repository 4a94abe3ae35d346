/*
 * This module provides utility functions for path manipulation: locating the
 * application's per-user state directory, rewriting the root of absolute song
 * paths for export, and sanitizing playlist names into portable file names.
 * It centralizes common path logic used by different parts of the core.
 */
use directories::ProjectDirs;
use std::fs;
use std::path::{Component, Path, PathBuf};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/*
 * Retrieves the application's primary local state directory.
 * This function determines the platform-specific path for local (non-roaming)
 * application data and ensures the directory exists, creating it if
 * necessary. The path is derived without an organization qualifier, placing
 * it directly under the user's local application data structure.
 *
 * Returns an `Option<PathBuf>` containing the path if successful, or `None`
 * if the directory could not be determined or created.
 */
pub fn get_base_app_state_dir(app_name: &str) -> Option<PathBuf> {
    log::trace!("PathUtils: Attempting to get base app state dir for '{app_name}'");
    ProjectDirs::from("", "", app_name).and_then(|proj_dirs| {
        let state_path = proj_dirs.config_local_dir();
        if !state_path.exists() {
            if let Err(e) = fs::create_dir_all(state_path) {
                log::error!("PathUtils: Failed to create base app state directory {state_path:?}: {e}");
                return None;
            }
            log::debug!("PathUtils: Created base app state directory: {state_path:?}");
        } else {
            log::trace!("PathUtils: Base app state directory already exists: {state_path:?}");
        }
        Some(state_path.to_path_buf())
    })
}

/*
 * Computes how to get from `base` to `path`: the shared prefix is dropped and
 * every remaining `base` component becomes a `..` step. Unlike
 * `Path::strip_prefix` this never fails; a `path` outside `base` simply
 * yields a `..`-prefixed result. Equal paths yield `.`.
 */
pub fn relative_to(path: &Path, base: &Path) -> PathBuf {
    let path_components: Vec<Component> = path.components().collect();
    let base_components: Vec<Component> = base.components().collect();

    let common = path_components
        .iter()
        .zip(base_components.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..base_components.len() {
        relative.push("..");
    }
    for component in &path_components[common..] {
        relative.push(component.as_os_str());
    }

    if relative.as_os_str().is_empty() {
        relative.push(".");
    }
    relative
}

/*
 * Rewrites the leading root of a song path for export.
 *
 * With an empty `remove_root` the path passes through unchanged. Otherwise
 * the path is made relative to `remove_root`, and, when `new_root` is also
 * non-empty, re-anchored under `new_root`. Whether the path actually lies
 * under `remove_root` is not validated; callers get relpath semantics either
 * way.
 */
pub fn rewrite_root(path: &Path, remove_root: &str, new_root: &str) -> PathBuf {
    if remove_root.is_empty() {
        return path.to_path_buf();
    }
    let relative = relative_to(path, Path::new(remove_root));
    if new_root.is_empty() {
        relative
    } else {
        Path::new(new_root).join(relative)
    }
}

// Characters that are rejected in Win32 file names.
const WIN32_INCOMPAT_CHARS: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

#[cfg(not(windows))]
fn strip_win32_incompat(name: &str) -> String {
    name.chars()
        .filter(|c| !WIN32_INCOMPAT_CHARS.contains(c) && !c.is_control())
        .collect()
}

// On Windows the characters never reach the filesystem anyway; the host's
// filename expansion rejects them before a path is formed.
#[cfg(windows)]
fn strip_win32_incompat(name: &str) -> String {
    name.to_string()
}

/*
 * Turns a playlist or saved-search name into a file name that is safe on the
 * local filesystem and portable to Windows. Unicode text is NFKD-decomposed
 * and combining marks (diacritics) are dropped; on non-Windows targets
 * Win32-incompatible characters are removed as well, so generated files can
 * later be moved to any platform.
 */
pub fn make_safe_name(name: &str) -> String {
    let stripped: String = name.nfkd().filter(|c| !is_combining_mark(*c)).collect();
    strip_win32_incompat(&stripped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrite_root_strips_and_replaces() {
        let rewritten = rewrite_root(Path::new("/music/rock/song.mp3"), "/music", "/new");
        assert_eq!(rewritten, PathBuf::from("/new/rock/song.mp3"));
    }

    #[test]
    fn test_rewrite_root_empty_remove_root_is_identity() {
        let original = Path::new("/music/rock/song.mp3");
        assert_eq!(rewrite_root(original, "", "/new"), original);
        assert_eq!(rewrite_root(original, "", ""), original);
    }

    #[test]
    fn test_rewrite_root_without_new_root_yields_relative_path() {
        let rewritten = rewrite_root(Path::new("/music/rock/song.mp3"), "/music", "");
        assert_eq!(rewritten, PathBuf::from("rock/song.mp3"));
    }

    #[test]
    fn test_relative_to_outside_base_walks_up() {
        let rewritten = relative_to(Path::new("/videos/clip.mp4"), Path::new("/music"));
        assert_eq!(rewritten, PathBuf::from("../videos/clip.mp4"));
    }

    #[test]
    fn test_relative_to_equal_paths_is_dot() {
        assert_eq!(
            relative_to(Path::new("/music"), Path::new("/music")),
            PathBuf::from(".")
        );
    }

    #[test]
    fn test_make_safe_name_strips_diacritics() {
        assert_eq!(make_safe_name("Café"), "Cafe");
        assert_eq!(make_safe_name("Motörhead"), "Motorhead");
    }

    #[cfg(not(windows))]
    #[test]
    fn test_make_safe_name_strips_win32_incompat_chars() {
        assert_eq!(make_safe_name("a:b*c?d"), "abcd");
        assert_eq!(make_safe_name("rock/metal"), "rockmetal");
        assert_eq!(make_safe_name("<\"best\" | of>"), "best  of");
    }

    #[test]
    fn test_make_safe_name_keeps_plain_names() {
        assert_eq!(make_safe_name("Morning Mix 2024"), "Morning Mix 2024");
    }

    #[test]
    fn test_get_base_app_state_dir_creates_if_not_exists() {
        // A unique app name avoids collisions with real user state or other
        // test runs.
        let unique_app_name = format!("TestApp_PlaylistSync_{}", rand::random::<u128>());
        if let Some(proj_dirs) = ProjectDirs::from("", "", &unique_app_name) {
            let path_to_check = proj_dirs.config_local_dir();
            if path_to_check.exists() {
                fs::remove_dir_all(path_to_check).expect("Pre-test cleanup failed");
            }
        }

        let path_opt = get_base_app_state_dir(&unique_app_name);

        assert!(path_opt.is_some(), "Should return a path for a new app name");
        let path = path_opt.unwrap();
        assert!(path.exists(), "Directory should have been created at {path:?}");
        assert!(path.is_dir());

        if let Some(proj_dirs) = ProjectDirs::from("", "", &unique_app_name) {
            let dir_to_remove = proj_dirs.config_local_dir();
            if dir_to_remove.exists() {
                if let Err(e) = fs::remove_dir_all(dir_to_remove) {
                    eprintln!("Test cleanup error for {}: {e}", path.display());
                }
            }
        }
    }
}
