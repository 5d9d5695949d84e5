use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::fmt;
use std::path::Path;

/// A marked path, kept as the exact bytes it was given with.
///
/// Paths are not required to be UTF-8, so nothing here assumes they are.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkPath(pub Vec<u8>);

impl MarkPath {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn from_path(path: &Path) -> Self {
        Self::from_os_str(path.as_os_str())
    }

    pub fn from_os_str(path: &OsStr) -> Self {
        Self(path.as_encoded_bytes().to_vec())
    }
}

impl From<&str> for MarkPath {
    fn from(path: &str) -> Self {
        Self(path.as_bytes().to_vec())
    }
}

impl From<Vec<u8>> for MarkPath {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

/// Lossy, for messages only.
impl fmt::Display for MarkPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}

/// Everything the mark file holds.
///
/// `marks` is ordered by name so listings come out the same on every run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MarkRecord {
    pub last_marked: Option<MarkPath>,
    pub marks: BTreeMap<String, MarkPath>,
}

impl MarkRecord {
    pub fn is_empty(&self) -> bool {
        self.last_marked.as_ref().is_none_or(MarkPath::is_empty) && self.marks.is_empty()
    }

    /// Records `path` as the last mark and, when named, under `name` too.
    pub fn set(&mut self, path: &MarkPath, name: Option<&str>) {
        self.last_marked = Some(path.clone());
        if let Some(name) = name {
            self.marks.insert(name.to_string(), path.clone());
        }
    }
}
