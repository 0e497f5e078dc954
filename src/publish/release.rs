//! Release drafts: create a draft, attach assets, roll the draft back when an
//! asset cannot be attached.

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use crate::errors::Result;

/// What the draft is created with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DraftMetadata {
    pub tag_name: String,
    pub target_commitish: String,
    pub name: String,
    pub body: String,
}

/// Request body sent to the release service. Always an unpublished,
/// non-prerelease draft.
#[derive(Debug, Serialize)]
pub struct DraftRequest<'a> {
    #[serde(flatten)]
    pub metadata: &'a DraftMetadata,
    pub draft: bool,
    pub prerelease: bool,
}

impl<'a> From<&'a DraftMetadata> for DraftRequest<'a> {
    fn from(metadata: &'a DraftMetadata) -> Self {
        Self {
            metadata,
            draft: true,
            prerelease: false,
        }
    }
}

/// Identifies one draft for the rest of a publish run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftHandle {
    /// Asset upload endpoint, URI template already stripped.
    pub upload_url: String,
    /// Resource URL of the draft itself (used for deletion).
    pub draft_url: String,
}

impl DraftHandle {
    /// Build from the service's `upload_url` template (`...assets{?name,label}`)
    /// and resource `url`.
    pub fn from_template(upload_url_template: &str, draft_url: impl Into<String>) -> Self {
        let upload_url = upload_url_template
            .split('{')
            .next()
            .unwrap_or(upload_url_template)
            .to_string();
        Self {
            upload_url,
            draft_url: draft_url.into(),
        }
    }
}

/// A remote release service holding drafts and their assets.
pub trait ReleaseService {
    fn create_draft(&self, metadata: &DraftMetadata) -> Result<DraftHandle>;
    fn upload_asset(&self, draft: &DraftHandle, asset: &Path) -> Result<()>;
    fn delete_draft(&self, draft: &DraftHandle) -> Result<()>;
}

/// Create a draft and upload `assets` to it in order.
///
/// The first failed upload stops the run: the draft is deleted (best-effort,
/// the outcome is logged) and the upload error is returned. Later assets are
/// not attempted.
pub fn publish_release_with_assets<R: ReleaseService + ?Sized>(
    service: &R,
    metadata: &DraftMetadata,
    assets: &[PathBuf],
) -> Result<DraftHandle> {
    info!(tag = %metadata.tag_name, name = %metadata.name, "Creating a draft");
    let draft = service.create_draft(metadata)?;
    info!(url = %draft.draft_url, "Draft created");

    for asset in assets {
        info!(asset = %asset.display(), "Uploading asset");
        if let Err(upload_err) = service.upload_asset(&draft, asset) {
            error!(asset = %asset.display(), error = %upload_err, "Upload failed");
            warn!(url = %draft.draft_url, "Deleting draft because upload failed");
            match service.delete_draft(&draft) {
                Ok(()) => info!(url = %draft.draft_url, "Draft deleted"),
                Err(delete_err) => {
                    error!(url = %draft.draft_url, error = %delete_err, code = delete_err.code(), "Draft deletion failed")
                }
            }
            return Err(upload_err);
        }
        info!(asset = %asset.display(), "Asset uploaded");
    }

    info!(count = assets.len(), "Done creating draft");
    Ok(draft)
}
