/*
 * Engine of a "synchronize to playlist" preferences panel for a desktop audio
 * player. The crate owns the sync-list persistence, path rewriting and M3U
 * export pipeline; the hosting player supplies songs, playlists, query
 * evaluation and dialog rendering through the trait seams in `core` and
 * `app_logic`.
 */
pub mod app_logic;
pub mod core;
