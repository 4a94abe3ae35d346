/*
 * This module reads the host player's saved-search source file and defines
 * the seam to its query engine. The file format is pairs of lines, a query
 * expression followed by the search's display name; evaluation of the query
 * text against songs is entirely the host's business and is reached through
 * `QueryEngineOperations`.
 */
use super::models::{SavedSearch, Song};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

pub const SAVED_SEARCHES_FILE_NAME: &str = "queries.saved";

#[derive(Debug)]
pub enum QueryError {
    Parse(String),
}

impl std::fmt::Display for QueryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryError::Parse(query) => write!(f, "Could not parse query: {query}"),
        }
    }
}

impl std::error::Error for QueryError {}

/// A compiled query, ready to test songs for membership.
pub trait SongPredicate {
    fn matches(&self, song: &Song) -> bool;
}

// Port trait wrapping the host's query language. Implementations live in the
// hosting player (production) or test mocks.
pub trait QueryEngineOperations: Send + Sync {
    fn parse(&self, query: &str) -> std::result::Result<Box<dyn SongPredicate>, QueryError>;
}

/*
 * Reads all saved searches from the source file, preserving file order.
 * A missing file yields an empty list. The file holds repeating pairs of
 * lines `<query>\n<name>\n`; a trailing query line with no name line is
 * dropped. Duplicate names are kept in order, so name lookups that scan from
 * the end see the later definition win.
 */
pub fn read_saved_searches(path: &Path) -> io::Result<Vec<SavedSearch>> {
    if !path.exists() {
        log::debug!("Queries: Saved search file {path:?} does not exist.");
        return Ok(Vec::new());
    }

    let reader = BufReader::new(File::open(path)?);
    let mut searches = Vec::new();
    let mut lines = reader.lines();
    while let Some(query_line) = lines.next() {
        let query = query_line?;
        let Some(name_line) = lines.next() else {
            log::warn!("Queries: {path:?} ends with an unpaired query line, ignoring it.");
            break;
        };
        searches.push(SavedSearch {
            name: name_line?.trim().to_string(),
            query: query.trim().to_string(),
        });
    }
    log::debug!("Queries: Read {} saved searches from {path:?}.", searches.len());
    Ok(searches)
}
