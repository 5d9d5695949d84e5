use std::path::PathBuf;

pub const STORE_FILE_NAME: &str = "hpoon";

/// Fixed location of the shared mark file for the host OS.
///
/// Every shell session on the machine reads and writes this one file; there
/// is no per-user scoping and no override.
pub fn resolve_store_path() -> PathBuf {
    if cfg!(windows) {
        PathBuf::from(r"C:\Windows\Temp").join(STORE_FILE_NAME)
    } else {
        PathBuf::from("/tmp").join(STORE_FILE_NAME)
    }
}

#[cfg(test)]
#[path = "tests/location_tests.rs"]
mod tests;
