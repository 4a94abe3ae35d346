use super::models::Song;

/*
 * Port trait wrapping the host player's song library and playlist store, the
 * only capabilities of it this crate consumes: enumerating playlists by name,
 * fetching the songs of a named playlist in playlist order, and iterating
 * every song for query evaluation. Implementations live in the hosting
 * player (production) or test mocks.
 */
pub trait SongLibraryOperations: Send + Sync {
    fn playlist_names(&self) -> Vec<String>;

    /// The songs of a named playlist in playlist order, or `None` if no such
    /// playlist exists (it may have been deleted since the names were read).
    fn playlist_songs(&self, playlist_name: &str) -> Option<Vec<Song>>;

    /// Every song in the library. Iteration order is whatever the host
    /// provides and is not guaranteed stable across calls.
    fn all_songs(&self) -> Vec<Song>;
}
