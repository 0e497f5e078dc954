use assert_fs::prelude::*;
use std::fs;

use desktop_release::{FindOptions, PathFinder, ReleaseError, find_down};

#[test]
fn root_file_is_found_before_descending() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("a/x.deb").touch().unwrap();
    temp.child("a/b/y.deb").touch().unwrap();

    let root = temp.path().join("a");
    let found = find_down(".deb", &root).unwrap();
    assert_eq!(found.file_name, "x.deb");
    assert_eq!(found.file_path, root.join("x.deb"));
}

#[test]
fn result_path_is_absolute_and_under_root() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("wrap/dist/Wire-Setup.exe").touch().unwrap();

    let found = PathFinder::new()
        .find("-Setup.exe", &FindOptions::in_dir(temp.path().join("wrap")))
        .unwrap()
        .unwrap();
    assert!(found.file_path.is_absolute());
    assert!(found.file_path.ends_with("wrap/dist/Wire-Setup.exe"));
}

#[test]
fn first_sorted_subtree_wins_and_result_is_stable() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("build/2-second/app.pkg").touch().unwrap();
    temp.child("build/1-first/deeper/app.pkg").touch().unwrap();
    temp.child("build/1-first/readme.md").touch().unwrap();

    let root = temp.path().join("build");
    let first = find_down(".pkg", &root).unwrap();
    assert!(first.file_path.ends_with("1-first/deeper/app.pkg"));
    for _ in 0..3 {
        assert_eq!(find_down(".pkg", &root).unwrap(), first);
    }
}

#[test]
fn missing_suffix_is_not_found_unless_optional() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("only.txt").touch().unwrap();

    let err = find_down(".AppImage", temp.path()).unwrap_err();
    assert!(matches!(err, ReleaseError::NotFound { ref suffix } if suffix == ".AppImage"));
    assert!(err.to_string().contains(".AppImage"));

    let none = PathFinder::new()
        .find(".AppImage", &FindOptions::in_dir(temp.path()).optional())
        .unwrap();
    assert!(none.is_none());
}

#[test]
fn nonexistent_root_is_io_error() {
    let temp = assert_fs::TempDir::new().unwrap();
    let err = find_down(".deb", &temp.path().join("missing")).unwrap_err();
    assert!(matches!(err, ReleaseError::Io { .. }));
}

#[test]
fn directories_named_like_the_suffix_are_not_matches() {
    let temp = assert_fs::TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("fake.deb")).unwrap();
    temp.child("z/real.deb").touch().unwrap();

    let found = find_down(".deb", temp.path()).unwrap();
    assert!(found.file_path.ends_with("z/real.deb"));
}

#[cfg(unix)]
#[test]
fn symlinked_directories_are_followed_once() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("real/pkg.deb").touch().unwrap();
    std::os::unix::fs::symlink(temp.path().join("real"), temp.path().join("a-link")).unwrap();
    std::os::unix::fs::symlink(temp.path(), temp.path().join("real/loop")).unwrap();

    let found = find_down(".deb", temp.path()).unwrap();
    // "a-link" sorts before "real" and resolves to a directory.
    assert!(found.file_path.ends_with("a-link/pkg.deb"));

    let none = PathFinder::new()
        .find(".rpm", &FindOptions::in_dir(temp.path()).optional())
        .unwrap();
    assert!(none.is_none());
}
