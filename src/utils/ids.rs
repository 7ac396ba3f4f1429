use crate::error::{Error, Result};

/// Ids in paths are plain integers, anything else cannot name an existing row.
pub fn parse_id(raw: &str, not_found: Error) -> Result<i32> {
    raw.parse::<i32>().map_err(|_| not_found)
}
