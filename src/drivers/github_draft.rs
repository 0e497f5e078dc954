//! `github-draft`: create a GitHub release draft for a build and attach the
//! installers and signatures found in the build directory.

use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::{GithubDraftSettings, WrapperBuild};
use crate::errors::{ReleaseError, Result};
use crate::fs_ops::{DirLister, EntryKind};
use crate::publish::{DraftHandle, DraftMetadata, ReleaseService, publish_release_with_assets};
use crate::utils::git_head_commit;

/// File name endings attached to a draft.
pub const ASSET_SUFFIXES: &[&str] = &[".asc", ".sig", ".AppImage", ".deb", ".exe", ".pkg"];

/// Tag `<platform>/<version>`, title `<version> - <Platform>`.
pub fn draft_metadata(build: &WrapperBuild, commitish: &str, changelog: &str) -> Result<DraftMetadata> {
    let platform = build.platform()?;
    Ok(DraftMetadata {
        tag_name: format!("{}/{}", build.platform_name, build.version),
        target_commitish: commitish.to_string(),
        name: format!("{} - {}", build.version, platform.display_name()),
        body: changelog.to_string(),
    })
}

/// Regular files directly inside `dir` with one of the asset suffixes, by name.
pub fn collect_assets<L: DirLister>(lister: &L, dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = lister.list(dir).map_err(|e| ReleaseError::io(dir, e))?;
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries
        .into_iter()
        .filter(|e| e.kind == EntryKind::File)
        .filter(|e| {
            let name = e.name.to_string_lossy();
            ASSET_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
        })
        .map(|e| dir.join(e.name))
        .collect())
}

pub fn run<L, R>(settings: &GithubDraftSettings, lister: &L, service: &R) -> Result<DraftHandle>
where
    L: DirLister,
    R: ReleaseService + ?Sized,
{
    let commitish = match &settings.commitish {
        Some(c) => c.clone(),
        None => git_head_commit(Path::new("."))?,
    };
    let metadata = draft_metadata(&settings.build, &commitish, &settings.changelog)?;
    let assets = collect_assets(lister, &settings.search_path)?;
    info!(repo = %settings.repo, count = assets.len(), "Collected release assets");

    publish_release_with_assets(service, &metadata, &assets)
}
