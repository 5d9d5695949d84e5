use anyhow::Context;

use super::*;

fn temp_store() -> Result<(tempfile::TempDir, MarkStore)> {
    let tmp = tempfile::tempdir().context("create tempdir")?;
    let store = MarkStore::at(tmp.path().join("hpoon"));
    Ok((tmp, store))
}

fn path(p: &str) -> MarkPath {
    MarkPath::from(p)
}

fn is_not_found(err: &anyhow::Error, expected: &str) -> bool {
    matches!(err.downcast_ref::<MarkError>(), Some(MarkError::MarkNotFound(n)) if n == expected)
}

#[test]
fn get_without_any_mark_is_empty() -> Result<()> {
    let (_tmp, store) = temp_store()?;
    assert_eq!(get_mark(&store, None)?, path(""));
    assert!(list_marks(&store)?.is_empty());
    Ok(())
}

#[test]
fn unnamed_set_then_get() -> Result<()> {
    let (_tmp, store) = temp_store()?;

    set_mark(&store, &path("/tmp/foo"), None)?;
    assert_eq!(get_mark(&store, None)?, path("/tmp/foo"));
    assert!(list_marks(&store)?.is_empty());
    Ok(())
}

#[test]
fn named_set_updates_name_and_last() -> Result<()> {
    let (_tmp, store) = temp_store()?;

    set_mark(&store, &path("/tmp/foo"), Some("myfile"))?;
    assert_eq!(get_mark(&store, Some("myfile"))?, path("/tmp/foo"));
    assert_eq!(get_mark(&store, None)?, path("/tmp/foo"));
    assert_eq!(
        list_marks(&store)?,
        vec![("myfile".to_string(), path("/tmp/foo"))]
    );
    Ok(())
}

#[test]
fn unnamed_set_keeps_existing_names() -> Result<()> {
    let (_tmp, store) = temp_store()?;

    set_mark(&store, &path("/tmp/foo"), Some("myfile"))?;
    set_mark(&store, &path("/tmp/bar"), None)?;
    assert_eq!(get_mark(&store, None)?, path("/tmp/bar"));
    assert_eq!(get_mark(&store, Some("myfile"))?, path("/tmp/foo"));
    Ok(())
}

#[test]
fn renaming_overwrites_previous_path() -> Result<()> {
    let (_tmp, store) = temp_store()?;

    set_mark(&store, &path("/tmp/old"), Some("proj"))?;
    set_mark(&store, &path("/tmp/new"), Some("proj"))?;
    assert_eq!(get_mark(&store, Some("proj"))?, path("/tmp/new"));
    assert_eq!(list_marks(&store)?.len(), 1);
    Ok(())
}

#[test]
fn missing_name_is_not_found() -> Result<()> {
    let (_tmp, store) = temp_store()?;
    clean_marks(&store)?;

    let err = get_mark(&store, Some("nope")).expect_err("nope was never set");
    assert!(is_not_found(&err, "nope"));
    assert_eq!(err.to_string(), "mark 'nope' does not exist");
    Ok(())
}

#[test]
fn list_is_sorted_by_name() -> Result<()> {
    let (_tmp, store) = temp_store()?;

    set_mark(&store, &path("/c"), Some("charlie"))?;
    set_mark(&store, &path("/a"), Some("alpha"))?;
    set_mark(&store, &path("/b"), Some("bravo"))?;

    let names: Vec<String> = list_marks(&store)?.into_iter().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["alpha", "bravo", "charlie"]);
    Ok(())
}

#[test]
fn clean_resets_everything() -> Result<()> {
    let (_tmp, store) = temp_store()?;

    set_mark(&store, &path("/tmp/foo"), Some("x"))?;
    clean_marks(&store)?;

    assert_eq!(get_mark(&store, None)?, path(""));
    assert!(list_marks(&store)?.is_empty());
    let err = get_mark(&store, Some("x")).expect_err("x was cleaned");
    assert!(is_not_found(&err, "x"));
    Ok(())
}

#[test]
fn stale_paths_are_still_returned() -> Result<()> {
    let (tmp, store) = temp_store()?;
    let target = tmp.path().join("gone.txt");
    std::fs::write(&target, b"x").context("write target")?;

    set_mark(&store, &MarkPath::from_path(&target), Some("gone"))?;
    std::fs::remove_file(&target).context("remove target")?;

    assert_eq!(get_mark(&store, Some("gone"))?, MarkPath::from_path(&target));
    Ok(())
}

#[cfg(unix)]
#[test]
fn non_utf8_path_set_then_get() -> Result<()> {
    use std::os::unix::ffi::OsStrExt;

    let (_tmp, store) = temp_store()?;
    let raw = std::ffi::OsStr::from_bytes(b"/tmp/caf\xe9");

    set_mark(&store, &MarkPath::from_os_str(raw), Some("cafe"))?;
    assert_eq!(get_mark(&store, Some("cafe"))?.as_bytes(), raw.as_bytes());
    assert_eq!(get_mark(&store, None)?.as_bytes(), raw.as_bytes());
    Ok(())
}

#[test]
fn reserved_name_is_rejected_before_touching_store() -> Result<()> {
    let (_tmp, store) = temp_store()?;

    let err = set_mark(&store, &path("/tmp/foo"), Some(LAST_MARKED_KEY)).expect_err("reserved");
    assert!(matches!(
        err.downcast_ref::<MarkError>(),
        Some(MarkError::ReservedName(_))
    ));
    assert!(!store.path().exists());
    Ok(())
}

#[test]
fn names_that_break_the_format_are_rejected() {
    for bad in ["", "a/b", "two\nlines", "cr\r"] {
        assert!(
            matches!(validate_name(bad), Err(MarkError::InvalidName(_))),
            "{bad:?} should be rejected"
        );
    }
    assert!(validate_name("myfile").is_ok());
    assert!(validate_name("_x").is_ok());
    assert!(validate_name("with space").is_ok());
}
