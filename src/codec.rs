//! Line format of the mark file: `<key>/<base64(path)>`.
//!
//! Only the path is encoded. Keys stay readable in the file, and a path may
//! hold any bytes, line breaks included.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::LineError;
use crate::model::MarkPath;

/// Key of the line holding the last unnamed mark.
pub const LAST_MARKED_KEY: &str = "_";

/// Ends the key. Keys never contain it, so only its first occurrence counts:
/// the standard base64 alphabet used for the payload includes `/` as well.
pub const KV_SEPARATOR: char = '/';

pub fn encode_line(key: &str, path: &MarkPath) -> String {
    format!("{}{}{}", key, KV_SEPARATOR, STANDARD.encode(path.as_bytes()))
}

/// Decodes one raw line, without its terminator.
///
/// Lines come straight off disk and may hold any bytes; a key that is not
/// UTF-8 makes the line malformed.
pub fn decode_line(line: &[u8]) -> Result<(String, MarkPath), LineError> {
    let malformed = || LineError::Malformed(String::from_utf8_lossy(line).into_owned());

    let sep = line
        .iter()
        .position(|b| *b == KV_SEPARATOR as u8)
        .ok_or_else(malformed)?;
    let key = std::str::from_utf8(&line[..sep]).map_err(|_| malformed())?;

    let bytes = STANDARD.decode(&line[sep + 1..])?;
    Ok((key.to_string(), MarkPath(bytes)))
}

#[cfg(test)]
#[path = "tests/codec_tests.rs"]
mod tests;
