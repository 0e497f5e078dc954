//! `ObjectStore` backed by Amazon S3.

use s3::bucket::Bucket;
use s3::creds::Credentials;
use s3::region::Region;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::config::S3Settings;
use crate::errors::{ReleaseError, RemoteStatus, Result};

use super::s3_error::remote_status;
use super::store::ObjectStore;

const SERVICE: &str = "s3";

/// One bucket. Writes go through a handle carrying the public-read ACL.
#[derive(Debug, Clone)]
pub struct S3Store {
    bucket: Box<Bucket>,
    public: Box<Bucket>,
}

impl S3Store {
    pub fn connect(settings: &S3Settings) -> Result<Self> {
        let region: Region = settings
            .region
            .parse()
            .map_err(|e| ReleaseError::transport(SERVICE, e))?;
        let credentials = Credentials::new(
            Some(&settings.access_key_id),
            Some(&settings.secret_access_key),
            None,
            None,
            None,
        )
        .map_err(|e| ReleaseError::transport(SERVICE, e))?;

        let bucket: Box<Bucket> = Bucket::new(&settings.bucket, region, credentials)
            .map_err(|e| ReleaseError::transport(SERVICE, e))?
            .into();
        let mut public = bucket.clone();
        public.add_header("x-amz-acl", "public-read");

        debug!(bucket = %settings.bucket, region = %settings.region, "Connected S3 store");
        Ok(Self { bucket, public })
    }
}

fn object_path(key: &str) -> String {
    if key.starts_with('/') {
        key.to_string()
    } else {
        format!("/{key}")
    }
}

/// `Ok` for 2xx, otherwise the status with the S3 error code as text.
fn check(code: u16, body: &[u8]) -> std::result::Result<(), RemoteStatus> {
    if (200..300).contains(&code) {
        Ok(())
    } else {
        Err(remote_status(code, body))
    }
}

impl ObjectStore for S3Store {
    fn put_public(&self, key: &str, source: &Path) -> Result<()> {
        let body = fs::read(source).map_err(|e| ReleaseError::io(source, e))?;
        let response = self
            .public
            .put_object(object_path(key), &body)
            .map_err(|e| ReleaseError::transport(SERVICE, e))?;
        check(response.status_code(), response.as_slice()).map_err(|status| ReleaseError::Upload {
            target: key.to_string(),
            status,
        })
    }

    fn delete(&self, key: &str) -> Result<()> {
        let response = self
            .bucket
            .delete_object(object_path(key))
            .map_err(|e| ReleaseError::transport(SERVICE, e))?;
        check(response.status_code(), response.as_slice()).map_err(|status| ReleaseError::Delete {
            target: key.to_string(),
            status,
        })
    }

    fn copy_public(&self, from: &str, to: &str) -> Result<()> {
        let code = self
            .public
            .copy_object_internal(object_path(from), object_path(to))
            .map_err(|e| ReleaseError::transport(SERVICE, e))?;
        check(code, &[]).map_err(|status| ReleaseError::Copy {
            from: from.to_string(),
            to: to.to_string(),
            status,
        })
    }
}
