use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::codec::{LAST_MARKED_KEY, decode_line, encode_line};
use crate::error::MarkError;
use crate::location::resolve_store_path;
use crate::model::MarkRecord;

/// The shared mark file.
///
/// Each operation reads the whole file and mutating ones rewrite it in full.
/// Nothing here locks the file or replaces it atomically: two shells writing
/// at the same moment race, and the last writer wins.
#[derive(Clone, Debug)]
pub struct MarkStore {
    path: PathBuf,
}

impl MarkStore {
    pub fn open_default() -> Self {
        Self::at(resolve_store_path())
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<MarkRecord> {
        if !self.path.exists() {
            // An empty file stands for the empty record.
            File::create(&self.path).map_err(|source| MarkError::StoreWriteError {
                path: self.path.clone(),
                source,
            })?;
        }

        let file = File::open(&self.path).map_err(|source| MarkError::StoreUnreadable {
            path: self.path.clone(),
            source,
        })?;

        let mut record = MarkRecord::default();
        for (idx, line) in BufReader::new(file).split(b'\n').enumerate() {
            let mut line = line.map_err(|source| MarkError::StoreUnreadable {
                path: self.path.clone(),
                source,
            })?;
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            let (key, path) = match decode_line(&line) {
                Ok(kv) => kv,
                Err(err) => {
                    tracing::warn!(
                        store = %self.path.display(),
                        line = idx + 1,
                        "skipping unreadable mark: {}",
                        err
                    );
                    continue;
                }
            };
            if key == LAST_MARKED_KEY {
                record.last_marked = Some(path);
            } else {
                record.marks.insert(key, path);
            }
        }

        tracing::debug!(
            store = %self.path.display(),
            marks = record.marks.len(),
            "loaded marks"
        );
        Ok(record)
    }

    /// Overwrites the file with `record`.
    ///
    /// With no last mark nothing is written at all, so named marks in the
    /// record are dropped along with the old file contents.
    pub fn save(&self, record: &MarkRecord) -> Result<()> {
        self.write_record(record)
            .map_err(|source| MarkError::StoreWriteError {
                path: self.path.clone(),
                source,
            })
            .context("save marks")?;
        tracing::debug!(store = %self.path.display(), "saved marks");
        Ok(())
    }

    fn write_record(&self, record: &MarkRecord) -> io::Result<()> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)?;

        let Some(last) = record.last_marked.as_ref().filter(|p| !p.is_empty()) else {
            return Ok(());
        };

        let mut out = BufWriter::new(file);
        writeln!(out, "{}", encode_line(LAST_MARKED_KEY, last))?;
        for (name, path) in &record.marks {
            if path.is_empty() {
                continue;
            }
            writeln!(out, "{}", encode_line(name, path))?;
        }
        out.flush()
    }

    /// Removes the file; a missing file is already clean.
    pub fn clean(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(store = %self.path.display(), "removed mark file");
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err)
                .with_context(|| format!("remove mark file {}", self.path.display())),
        }
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
