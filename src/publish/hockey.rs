//! HockeyApp app-version publishing.

use reqwest::blocking::{Client, multipart};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{error, info};

use crate::errors::{ReleaseError, RemoteStatus, Result};
use crate::fs_ops::{remove_archive, sibling_zip_path, zip_single};

use super::USER_AGENT;

const SERVICE: &str = "hockey";
const TOKEN_HEADER: &str = "X-HockeyAppToken";
const NOTES: &str = "Jenkins Build";

/// Version fields sent both on creation and with the upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionFields {
    /// `major.minor`
    pub bundle_short_version: String,
    /// `patch`
    pub bundle_version: String,
    pub notes: String,
    pub notify: u8,
    pub status: u8,
}

impl VersionFields {
    /// Split `major.minor.patch` into Hockey's short version and bundle version.
    pub fn from_version(version: &str) -> Result<Self> {
        let mut parts = version.split('.');
        let (Some(major), Some(minor), Some(patch)) = (parts.next(), parts.next(), parts.next()) else {
            return Err(ReleaseError::InvalidWrapperBuild(version.to_string()));
        };
        Ok(Self {
            bundle_short_version: format!("{major}.{minor}"),
            bundle_version: patch.to_string(),
            notes: NOTES.to_string(),
            notify: 0,
            status: 2,
        })
    }

    fn form(&self) -> multipart::Form {
        multipart::Form::new()
            .text("bundle_short_version", self.bundle_short_version.clone())
            .text("bundle_version", self.bundle_version.clone())
            .text("notes", self.notes.clone())
            .text("notify", self.notify.to_string())
            .text("status", self.status.to_string())
    }
}

/// An app-distribution service that takes versioned binary uploads.
pub trait AppDistribution {
    /// Create a version and return its id.
    fn create_version(&self, fields: &VersionFields) -> Result<u64>;
    fn upload_version(&self, version_id: u64, fields: &VersionFields, file: &Path) -> Result<()>;
}

#[derive(Debug, Deserialize)]
struct CreatedVersion {
    id: u64,
}

#[derive(Debug, Clone)]
pub struct HockeyClient {
    client: Client,
    api_base: String,
    app_id: String,
    token: String,
}

impl HockeyClient {
    pub fn new(app_id: impl Into<String>, token: impl Into<String>, api_base: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ReleaseError::transport(SERVICE, e))?;
        Ok(Self {
            client,
            api_base: api_base.into(),
            app_id: app_id.into(),
            token: token.into(),
        })
    }

    pub fn versions_url(&self) -> String {
        format!(
            "{}/apps/{}/app_versions",
            self.api_base.trim_end_matches('/'),
            self.app_id
        )
    }
}

impl AppDistribution for HockeyClient {
    fn create_version(&self, fields: &VersionFields) -> Result<u64> {
        info!(version = %fields.bundle_short_version, "Creating app version on Hockey");
        let response = self
            .client
            .post(format!("{}/new", self.versions_url()))
            .header(TOKEN_HEADER, &self.token)
            .json(fields)
            .send()
            .map_err(|e| ReleaseError::transport(SERVICE, e))?;

        if !response.status().is_success() {
            let status = RemoteStatus::from_http(response.status());
            error!(code = status.code, body = %response.text().unwrap_or_default(), "Error response from Hockey");
            return Err(ReleaseError::VersionCreation(status));
        }
        let created: CreatedVersion = response
            .json()
            .map_err(|e| ReleaseError::transport(SERVICE, e))?;
        info!(id = created.id, "Received version from Hockey");
        Ok(created.id)
    }

    fn upload_version(&self, version_id: u64, fields: &VersionFields, file: &Path) -> Result<()> {
        let form = fields
            .form()
            .file("files", file)
            .map_err(|e| ReleaseError::io(file, e))?;

        info!(id = version_id, "Uploading version to Hockey");
        let response = self
            .client
            .put(format!("{}/{}", self.versions_url(), version_id))
            .header(TOKEN_HEADER, &self.token)
            .multipart(form)
            .send()
            .map_err(|e| ReleaseError::transport(SERVICE, e))?;

        if !response.status().is_success() {
            let status = RemoteStatus::from_http(response.status());
            error!(code = status.code, body = %response.text().unwrap_or_default(), "Error response from Hockey");
            return Err(ReleaseError::Upload {
                target: format!("hockey version {version_id}"),
                status,
            });
        }
        info!("Hockey upload finished");
        Ok(())
    }
}

/// Zip `artifact` next to itself, create a version, upload the zip.
/// The zip is removed afterwards whether or not compression or the upload
/// worked. `artifact` must be a regular file.
pub fn publish_version<D: AppDistribution + ?Sized>(
    service: &D,
    version: &str,
    artifact: &Path,
) -> Result<u64> {
    let fields = VersionFields::from_version(version)?;
    match fs::metadata(artifact) {
        Ok(meta) if meta.is_file() => {}
        _ => return Err(ReleaseError::NotAFile(artifact.to_path_buf())),
    }

    let zip_path = sibling_zip_path(artifact);
    let result = zip_single(artifact, &zip_path).and_then(|_| {
        service
            .create_version(&fields)
            .and_then(|id| service.upload_version(id, &fields, &zip_path).map(|()| id))
    });

    remove_archive(&zip_path);
    result
}
