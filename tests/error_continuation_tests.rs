//! Partial-failure behavior: input problems become diagnostics and the
//! scan keeps going over everything else.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use dupescan::config::SearchConfig;
use dupescan::duplicates::DuplicateFinder;

#[test]
fn bad_root_among_good_roots_does_not_abort() {
    let good = TempDir::new().unwrap();
    fs::write(good.path().join("a.txt"), b"same").unwrap();
    fs::write(good.path().join("b.txt"), b"same").unwrap();

    let config = SearchConfig::new(
        vec![
            PathBuf::from("/no/such/directory"),
            good.path().to_path_buf(),
        ],
        true,
        false,
    )
    .unwrap();
    let outcome = DuplicateFinder::with_defaults().scan(&config);

    // The good root is still fully scanned
    assert_eq!(outcome.summary.total_files, 2);
    assert_eq!(outcome.groups.len(), 1);
    assert_eq!(outcome.diagnostics.len(), 1);
    assert_eq!(
        outcome.diagnostics[0].path,
        PathBuf::from("/no/such/directory")
    );
}

#[test]
fn file_used_as_root_is_a_diagnostic() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("not-a-dir.txt");
    fs::write(&file, b"content").unwrap();

    let config = SearchConfig::new(vec![file.clone(), dir.path().to_path_buf()], true, false)
        .unwrap();
    let outcome = DuplicateFinder::with_defaults().scan(&config);

    assert_eq!(outcome.diagnostics.len(), 1);
    assert_eq!(outcome.diagnostics[0].path, file);
    // The file itself is still found through the directory root
    assert_eq!(outcome.summary.total_files, 1);
}

#[test]
fn all_roots_invalid_reports_every_one() {
    let config = SearchConfig::new(
        vec![PathBuf::from("/missing/one"), PathBuf::from("/missing/two")],
        true,
        false,
    )
    .unwrap();
    let outcome = DuplicateFinder::with_defaults().scan(&config);

    assert_eq!(outcome.summary.total_files, 0);
    assert!(outcome.groups.is_empty());
    assert_eq!(outcome.diagnostics.len(), 2);
    assert!(outcome.summary.is_consistent());
}

#[cfg(unix)]
#[test]
fn unreadable_file_is_skipped_with_a_diagnostic() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let locked = dir.path().join("locked.txt");
    fs::write(&locked, b"hidden content").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Permission bits do not stop root; nothing to test there
    if fs::File::open(&locked).is_ok() {
        return;
    }

    fs::write(dir.path().join("a.txt"), b"same").unwrap();
    fs::write(dir.path().join("b.txt"), b"same").unwrap();

    let config = SearchConfig::for_root(dir.path());
    let outcome = DuplicateFinder::with_defaults().scan(&config);

    // Restore so TempDir cleanup succeeds
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();

    assert_eq!(outcome.groups.len(), 1);
    assert_eq!(outcome.diagnostics.len(), 1);
    assert_eq!(outcome.diagnostics[0].path, locked);
    assert!(outcome.summary.is_consistent());
}

#[cfg(unix)]
#[test]
fn dangling_symlink_is_a_diagnostic() {
    use std::os::unix::fs::symlink;

    let dir = TempDir::new().unwrap();
    symlink(dir.path().join("nowhere"), dir.path().join("dangling")).unwrap();
    fs::write(dir.path().join("real.txt"), b"data").unwrap();

    let config = SearchConfig::for_root(dir.path());
    let outcome = DuplicateFinder::with_defaults().scan(&config);

    assert_eq!(outcome.summary.total_files, 1);
    assert_eq!(outcome.diagnostics.len(), 1);
}
