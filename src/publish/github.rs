//! GitHub Releases as a `ReleaseService`.

use reqwest::blocking::{Client, Response};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use std::fs::File;
use std::path::Path;
use tracing::{debug, error};

use crate::config::RepoSlug;
use crate::errors::{ReleaseError, RemoteStatus, Result};

use super::release::{DraftHandle, DraftMetadata, DraftRequest, ReleaseService};
use super::USER_AGENT;

const SERVICE: &str = "github";

#[derive(Debug, Deserialize)]
struct DraftResponse {
    upload_url: String,
    url: String,
}

#[derive(Debug, Clone)]
pub struct GithubReleases {
    client: Client,
    api_base: String,
    repo: RepoSlug,
    token: String,
}

impl GithubReleases {
    pub fn new(token: impl Into<String>, api_base: impl Into<String>, repo: RepoSlug) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ReleaseError::transport(SERVICE, e))?;
        Ok(Self {
            client,
            api_base: api_base.into(),
            repo,
            token: token.into(),
        })
    }

    pub fn releases_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/releases",
            self.api_base.trim_end_matches('/'),
            self.repo.owner,
            self.repo.name
        )
    }

    fn auth(&self) -> String {
        format!("token {}", self.token)
    }
}

/// Log the response body of a failed call and return its status.
fn failure_status(response: Response) -> RemoteStatus {
    let status = RemoteStatus::from_http(response.status());
    let body = response.text().unwrap_or_default();
    error!(code = status.code, %body, "Error response from GitHub");
    status
}

impl ReleaseService for GithubReleases {
    fn create_draft(&self, metadata: &DraftMetadata) -> Result<DraftHandle> {
        debug!(url = %self.releases_url(), ?metadata, "POST draft");
        let response = self
            .client
            .post(self.releases_url())
            .header(AUTHORIZATION, self.auth())
            .json(&DraftRequest::from(metadata))
            .send()
            .map_err(|e| ReleaseError::transport(SERVICE, e))?;

        if !response.status().is_success() {
            return Err(ReleaseError::DraftCreation(failure_status(response)));
        }
        let data: DraftResponse = response
            .json()
            .map_err(|e| ReleaseError::transport(SERVICE, e))?;
        Ok(DraftHandle::from_template(&data.upload_url, data.url))
    }

    fn upload_asset(&self, draft: &DraftHandle, asset: &Path) -> Result<()> {
        let name = asset
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| ReleaseError::NotAFile(asset.to_path_buf()))?;
        let file = File::open(asset).map_err(|e| ReleaseError::io(asset, e))?;

        let response = self
            .client
            .post(&draft.upload_url)
            .query(&[("name", name.as_str())])
            .header(AUTHORIZATION, self.auth())
            .header(CONTENT_TYPE, "application/binary")
            .body(file)
            .send()
            .map_err(|e| ReleaseError::transport(SERVICE, e))?;

        if !response.status().is_success() {
            return Err(ReleaseError::Upload {
                target: name,
                status: failure_status(response),
            });
        }
        Ok(())
    }

    fn delete_draft(&self, draft: &DraftHandle) -> Result<()> {
        let response = self
            .client
            .delete(&draft.draft_url)
            .header(AUTHORIZATION, self.auth())
            .send()
            .map_err(|e| ReleaseError::transport(SERVICE, e))?;

        if !response.status().is_success() {
            return Err(ReleaseError::Delete {
                target: draft.draft_url.clone(),
                status: failure_status(response),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn releases_url_joins_base_and_repo() {
        let gh = GithubReleases::new(
            "t",
            "https://api.github.com/",
            "wireapp/wire-desktop".parse().unwrap(),
        )
        .unwrap();
        assert_eq!(
            gh.releases_url(),
            "https://api.github.com/repos/wireapp/wire-desktop/releases"
        );
        assert_eq!(gh.auth(), "token t");
    }

    #[test]
    fn draft_response_ignores_extra_fields() {
        let data: DraftResponse = serde_json::from_str(
            r#"{"id": 1, "url": "https://api/r/1", "upload_url": "https://up/r/1/assets{?name,label}", "draft": true}"#,
        )
        .unwrap();
        let h = DraftHandle::from_template(&data.upload_url, data.url);
        assert_eq!(h.upload_url, "https://up/r/1/assets");
    }
}
