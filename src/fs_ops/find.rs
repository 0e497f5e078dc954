//! Locating build artifacts by file-name suffix.
//!
//! Search order is part of the contract, CI relies on it being reproducible:
//! - entries of a directory are sorted by name;
//! - files of the current directory are checked before any subdirectory;
//! - subdirectories are searched depth-first in sorted order;
//! - the first match wins.
//!
//! Entry kinds are resolved through symlinks. A directory reachable through
//! several links is searched once per call.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::errors::{ReleaseError, Result};

use super::lister::{DirLister, EntryKind, LocalFs};

/// A located artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindResult {
    /// Base name of the file.
    pub file_name: String,
    /// Absolute path of the file.
    pub file_path: PathBuf,
}

/// Where to search and whether a miss is an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindOptions {
    pub root: PathBuf,
    pub required: bool,
}

impl Default for FindOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            required: true,
        }
    }
}

impl FindOptions {
    pub fn in_dir(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }

    /// A miss yields `Ok(None)` instead of `NotFound`.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

/// Depth-first suffix search over a `DirLister`.
#[derive(Debug, Clone, Default)]
pub struct PathFinder<L = LocalFs> {
    lister: L,
}

impl PathFinder<LocalFs> {
    pub fn new() -> Self {
        Self { lister: LocalFs }
    }
}

impl<L: DirLister> PathFinder<L> {
    pub fn with_lister(lister: L) -> Self {
        Self { lister }
    }

    /// Find the first file whose name ends with `suffix`.
    ///
    /// Returns `Ok(None)` on a miss only when `options.required` is false.
    pub fn find(&self, suffix: &str, options: &FindOptions) -> Result<Option<FindResult>> {
        let root = self
            .lister
            .absolute(&options.root)
            .map_err(|e| ReleaseError::io(&options.root, e))?;
        let mut visited = HashSet::new();

        match self.search(&root, suffix, &mut visited)? {
            Some(found) => {
                info!(suffix, path = %found.file_path.display(), "Found artifact");
                Ok(Some(found))
            }
            None if options.required => Err(ReleaseError::NotFound {
                suffix: suffix.to_string(),
            }),
            None => {
                debug!(suffix, root = %root.display(), "No artifact found (optional)");
                Ok(None)
            }
        }
    }

    /// Like `find` with `required = true`.
    pub fn find_required(&self, suffix: &str, root: &Path) -> Result<FindResult> {
        self.find(suffix, &FindOptions::in_dir(root))?
            .ok_or_else(|| ReleaseError::NotFound {
                suffix: suffix.to_string(),
            })
    }

    fn search(
        &self,
        dir: &Path,
        suffix: &str,
        visited: &mut HashSet<PathBuf>,
    ) -> Result<Option<FindResult>> {
        let identity = self
            .lister
            .canonical(dir)
            .map_err(|e| ReleaseError::io(dir, e))?;
        if !visited.insert(identity) {
            debug!(dir = %dir.display(), "Directory already searched; skipping");
            return Ok(None);
        }

        let mut entries = self.lister.list(dir).map_err(|e| ReleaseError::io(dir, e))?;
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        let mut subdirs = Vec::new();
        for entry in &entries {
            match entry.kind {
                EntryKind::File => {
                    let name = entry.name.to_string_lossy();
                    if name.ends_with(suffix) {
                        return Ok(Some(FindResult {
                            file_name: name.into_owned(),
                            file_path: dir.join(&entry.name),
                        }));
                    }
                }
                EntryKind::Dir => subdirs.push(dir.join(&entry.name)),
                EntryKind::Other => {}
            }
        }

        for sub in subdirs {
            if let Some(found) = self.search(&sub, suffix, visited)? {
                return Ok(Some(found));
            }
        }
        Ok(None)
    }
}

/// Find a required artifact under `root` on the local filesystem.
pub fn find_down(suffix: &str, root: &Path) -> Result<FindResult> {
    PathFinder::new().find_required(suffix, root)
}
