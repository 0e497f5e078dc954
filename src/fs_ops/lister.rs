//! Directory listing capability used by the artifact finder.
//!
//! The finder never touches `std::fs` directly; it asks a `DirLister` for the
//! entries of a directory and their (symlink-resolved) kind. `LocalFs` is the
//! real implementation, tests substitute an in-memory tree.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// What an entry resolves to after following symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
    /// Sockets, fifos, dangling links and anything else we never descend into.
    Other,
}

/// One directory entry: its name within the parent and its resolved kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: OsString,
    pub kind: EntryKind,
}

impl DirEntry {
    pub fn new(name: impl Into<OsString>, kind: EntryKind) -> Self {
        Self { name: name.into(), kind }
    }
}

pub trait DirLister {
    /// List the entries of `dir` in any order.
    fn list(&self, dir: &Path) -> io::Result<Vec<DirEntry>>;

    /// Turn a possibly relative search root into an absolute path.
    fn absolute(&self, path: &Path) -> io::Result<PathBuf> {
        Ok(path.to_path_buf())
    }

    /// Identity used to avoid visiting the same directory twice through links.
    fn canonical(&self, dir: &Path) -> io::Result<PathBuf> {
        Ok(dir.to_path_buf())
    }
}

/// The real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl DirLister for LocalFs {
    fn list(&self, dir: &Path) -> io::Result<Vec<DirEntry>> {
        let mut out = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            // fs::metadata follows symlinks; a dangling link lands in Other.
            let kind = match fs::metadata(entry.path()) {
                Ok(meta) if meta.is_file() => EntryKind::File,
                Ok(meta) if meta.is_dir() => EntryKind::Dir,
                _ => EntryKind::Other,
            };
            out.push(DirEntry::new(entry.file_name(), kind));
        }
        Ok(out)
    }

    fn absolute(&self, path: &Path) -> io::Result<PathBuf> {
        std::path::absolute(path)
    }

    fn canonical(&self, dir: &Path) -> io::Result<PathBuf> {
        fs::canonicalize(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn local_fs_classifies_files_and_dirs() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("a.deb").touch().unwrap();
        temp.child("sub").create_dir_all().unwrap();

        let mut entries = LocalFs.list(temp.path()).unwrap();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        assert_eq!(
            entries,
            vec![
                DirEntry::new("a.deb", EntryKind::File),
                DirEntry::new("sub", EntryKind::Dir),
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn local_fs_follows_symlinks() {
        let temp = assert_fs::TempDir::new().unwrap();
        let target = temp.child("real.pkg");
        target.touch().unwrap();
        std::os::unix::fs::symlink(target.path(), temp.path().join("link.pkg")).unwrap();
        std::os::unix::fs::symlink(temp.path().join("missing"), temp.path().join("dangling")).unwrap();

        let entries = LocalFs.list(temp.path()).unwrap();
        let kind_of = |n: &str| entries.iter().find(|e| e.name == n).map(|e| e.kind);
        assert_eq!(kind_of("link.pkg"), Some(EntryKind::File));
        assert_eq!(kind_of("dangling"), Some(EntryKind::Other));
    }

    #[test]
    fn local_fs_absolute_makes_relative_paths_absolute() {
        let abs = LocalFs.absolute(Path::new(".")).unwrap();
        assert!(abs.is_absolute());
    }
}
