//! Object-store publishing: upload, delete and copy of single keys, and a
//! fan-out batch upload.

use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::errors::{ReleaseError, Result};

/// Raw object-store operations. Implementations issue exactly one request per
/// call and map non-2xx responses to `Upload`/`Delete`/`Copy` errors.
pub trait ObjectStore: Send + Sync {
    /// Store the bytes of `source` under `key`, publicly readable.
    fn put_public(&self, key: &str, source: &Path) -> Result<()>;
    fn delete(&self, key: &str) -> Result<()>;
    /// Server-side copy within the bucket; the destination is publicly readable.
    fn copy_public(&self, from: &str, to: &str) -> Result<()>;
}

impl<S: ObjectStore + ?Sized> ObjectStore for &S {
    fn put_public(&self, key: &str, source: &Path) -> Result<()> {
        (**self).put_public(key, source)
    }
    fn delete(&self, key: &str) -> Result<()> {
        (**self).delete(key)
    }
    fn copy_public(&self, from: &str, to: &str) -> Result<()> {
        (**self).copy_public(from, to)
    }
}

/// One file to upload and where it goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadJob {
    pub source: PathBuf,
    pub key: String,
}

impl UploadJob {
    pub fn new(source: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            key: key.into(),
        }
    }
}

/// Checked wrapper over an `ObjectStore`.
#[derive(Debug, Clone)]
pub struct ArtifactPublisher<S> {
    store: S,
}

impl<S: ObjectStore> ArtifactPublisher<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Upload a regular file. Anything else fails with `NotAFile` before the
    /// store is contacted.
    pub fn upload(&self, source: &Path, key: &str) -> Result<()> {
        match fs::metadata(source) {
            Ok(meta) if meta.is_file() => {}
            _ => return Err(ReleaseError::NotAFile(source.to_path_buf())),
        }

        let name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        info!(file = %name, key, "Uploading");
        self.store.put_public(key, source)?;
        info!(key, "Uploaded");
        Ok(())
    }

    pub fn delete(&self, key: &str) -> Result<()> {
        self.store.delete(key)?;
        info!(key, "Deleted");
        Ok(())
    }

    pub fn copy(&self, from: &str, to: &str) -> Result<()> {
        self.store.copy_public(from, to)?;
        info!(from, to, "Copied");
        Ok(())
    }

    /// Upload every job in parallel and wait for all of them.
    ///
    /// Every job is attempted even when a sibling fails; the first failure in
    /// job order is returned.
    pub fn upload_all(&self, jobs: &[UploadJob]) -> Result<()> {
        let results: Vec<Result<()>> = jobs
            .par_iter()
            .map(|job| self.upload(&job.source, &job.key))
            .collect();

        let failed = results.iter().filter(|r| r.is_err()).count();
        if failed > 0 {
            error!(failed, total = jobs.len(), "Batch upload finished with failures");
        } else {
            info!(total = jobs.len(), "Batch upload finished");
        }
        results.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::RemoteStatus;
    use assert_fs::prelude::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recording {
        calls: Mutex<Vec<String>>,
        fail_key: Option<String>,
    }

    impl ObjectStore for Recording {
        fn put_public(&self, key: &str, _source: &Path) -> Result<()> {
            self.calls.lock().unwrap().push(format!("put {key}"));
            if self.fail_key.as_deref() == Some(key) {
                return Err(ReleaseError::Upload {
                    target: key.into(),
                    status: RemoteStatus::new(403, "AccessDenied"),
                });
            }
            Ok(())
        }
        fn delete(&self, key: &str) -> Result<()> {
            self.calls.lock().unwrap().push(format!("delete {key}"));
            Ok(())
        }
        fn copy_public(&self, from: &str, to: &str) -> Result<()> {
            self.calls.lock().unwrap().push(format!("copy {from} {to}"));
            Ok(())
        }
    }

    #[test]
    fn directory_source_is_not_a_file() {
        let temp = assert_fs::TempDir::new().unwrap();
        let store = Recording::default();
        let publisher = ArtifactPublisher::new(&store);
        let err = publisher.upload(temp.path(), "k").unwrap_err();
        assert!(matches!(err, ReleaseError::NotAFile(_)));
        assert!(store.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn delete_and_copy_pass_through() {
        let store = Recording::default();
        let publisher = ArtifactPublisher::new(&store);
        publisher.delete("win/RELEASES").unwrap();
        publisher.copy("win/a", "win/b").unwrap();
        assert_eq!(
            *store.calls.lock().unwrap(),
            vec!["delete win/RELEASES".to_string(), "copy win/a win/b".to_string()]
        );
    }

    #[test]
    fn batch_reports_first_failure_in_job_order() {
        let temp = assert_fs::TempDir::new().unwrap();
        let jobs: Vec<UploadJob> = ["a", "b", "c"]
            .iter()
            .map(|n| {
                let f = temp.child(n);
                f.write_str(n).unwrap();
                UploadJob::new(f.path(), format!("linux/{n}"))
            })
            .collect();
        let store = Recording {
            fail_key: Some("linux/b".into()),
            ..Default::default()
        };
        let err = ArtifactPublisher::new(&store).upload_all(&jobs).unwrap_err();
        assert!(matches!(err, ReleaseError::Upload { ref target, .. } if target == "linux/b"));
        assert_eq!(store.calls.lock().unwrap().len(), 3);
    }
}
