//! The four commands, each a load / mutate / save cycle over one store.

use anyhow::Result;

use crate::codec::{KV_SEPARATOR, LAST_MARKED_KEY};
use crate::error::MarkError;
use crate::model::MarkPath;
use crate::store::MarkStore;

/// Rejects names that would collide with the last-mark slot or break the
/// line format.
pub fn validate_name(name: &str) -> Result<(), MarkError> {
    if name == LAST_MARKED_KEY {
        return Err(MarkError::ReservedName(name.to_string()));
    }
    if name.is_empty() || name.contains(KV_SEPARATOR) || name.contains(['\n', '\r']) {
        return Err(MarkError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Stores `path` as the last mark, and under `name` when given.
///
/// The path is taken as is; callers check that it exists.
pub fn set_mark(store: &MarkStore, path: &MarkPath, name: Option<&str>) -> Result<()> {
    if let Some(name) = name {
        validate_name(name)?;
    }
    let mut record = store.load()?;
    record.set(path, name);
    store.save(&record)?;
    tracing::debug!(path = %path, name = ?name, "mark set");
    Ok(())
}

/// Returns the named mark, or the last mark when `name` is `None`.
///
/// With no last mark yet the result is an empty path.
pub fn get_mark(store: &MarkStore, name: Option<&str>) -> Result<MarkPath> {
    let mut record = store.load()?;
    match name {
        None => Ok(record.last_marked.unwrap_or_default()),
        Some(name) => record
            .marks
            .remove(name)
            .ok_or_else(|| MarkError::MarkNotFound(name.to_string()).into()),
    }
}

/// Named marks sorted by name. The last mark is not included.
pub fn list_marks(store: &MarkStore) -> Result<Vec<(String, MarkPath)>> {
    Ok(store.load()?.marks.into_iter().collect())
}

pub fn clean_marks(store: &MarkStore) -> Result<()> {
    store.clean()
}

#[cfg(test)]
#[path = "tests/marks_tests.rs"]
mod tests;
