use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use hpoon::error::MarkError;
use hpoon::marks::{clean_marks, get_mark, list_marks, set_mark};
use hpoon::model::MarkPath;
use hpoon::store::MarkStore;

/// Prefix that turns an argument into a name lookup.
pub(crate) const NAME_REF: char = '!';

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Invocation {
    ShowLast,
    ShowNamed(String),
    List,
    Clean,
    Mark { path: PathBuf, name: Option<String> },
}

impl Invocation {
    pub(crate) fn classify(target: Option<OsString>, name: Option<String>) -> Self {
        let Some(target) = target else {
            return Invocation::ShowLast;
        };
        if name.is_some() {
            return Invocation::Mark {
                path: PathBuf::from(target),
                name,
            };
        }
        match target.to_str() {
            Some("list") => Invocation::List,
            Some("clean") => Invocation::Clean,
            Some(text) if text.starts_with(NAME_REF) => {
                Invocation::ShowNamed(text[NAME_REF.len_utf8()..].to_string())
            }
            _ => Invocation::Mark {
                path: PathBuf::from(target),
                name: None,
            },
        }
    }
}

pub(crate) fn handle_invocation(store: &MarkStore, invocation: Invocation) -> Result<()> {
    match invocation {
        Invocation::ShowLast => emit(get_mark(store, None)?.as_bytes())?,
        Invocation::ShowNamed(name) => emit(get_mark(store, Some(&name))?.as_bytes())?,
        Invocation::List => {
            let mut out = Vec::new();
            for (name, path) in list_marks(store)? {
                out.extend_from_slice(name.as_bytes());
                out.extend_from_slice(b": ");
                out.extend_from_slice(path.as_bytes());
                out.push(b'\n');
            }
            emit(&out)?;
        }
        Invocation::Clean => clean_marks(store)?,
        Invocation::Mark { path, name } => {
            let path = resolve_existing(&path)?;
            set_mark(store, &MarkPath::from_path(&path), name.as_deref())?;
        }
    }
    Ok(())
}

/// Makes `arg` absolute and requires it to exist.
pub(crate) fn resolve_existing(arg: &Path) -> Result<PathBuf> {
    let path = std::path::absolute(arg)
        .with_context(|| format!("Not sure what to do with: '{}'", arg.display()))?;
    if !path.exists() {
        return Err(MarkError::PathNotFound(path).into());
    }
    Ok(path)
}

/// Marks are printed byte for byte and without a trailing newline so they
/// splice cleanly into other commands.
fn emit(bytes: &[u8]) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(bytes).context("write stdout")?;
    stdout.flush().context("flush stdout")?;
    Ok(())
}

#[cfg(test)]
#[path = "tests/cli_exec_tests.rs"]
mod tests;
