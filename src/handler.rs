// Handler abstraction - every handler is bound to one backend location
//
// A location is a SQLite file path for the taxonomy store or a SPARQL
// endpoint URL for the bibliographic store. Bad locations are rejected
// when they are assigned, not on first use.

use crate::error::{Error, Result};

pub trait Handler {
    /// Current backend location ("" when unset)
    fn db_path_or_url(&self) -> &str;

    /// Bind the handler to a backend location
    fn set_db_path_or_url(&mut self, location: &str) -> Result<()>;
}

/// Validate a location string before a handler accepts it
pub fn validate_location(location: &str) -> Result<String> {
    let trimmed = location.trim();
    if trimmed.is_empty() {
        return Err(Error::invalid_argument("backend location must not be empty"));
    }
    Ok(trimmed.to_string())
}

/// Location that must be set before the handler can touch its backend
pub fn require_location(location: &str) -> Result<&str> {
    if location.is_empty() {
        Err(Error::invalid_argument("database path or URL is not set"))
    } else {
        Ok(location)
    }
}

/// Whether a location addresses a remote SPARQL endpoint
pub fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}
