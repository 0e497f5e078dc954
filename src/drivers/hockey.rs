//! `hockey`: zip the platform installer and publish it as a HockeyApp version.

use std::path::PathBuf;
use tracing::info;

use crate::config::{HockeySettings, Platform};
use crate::errors::Result;
use crate::fs_ops::{DirLister, PathFinder};
use crate::publish::{AppDistribution, publish_version};

/// The installer Hockey receives for each platform.
pub fn artifact_suffix(platform: Platform) -> &'static str {
    match platform {
        Platform::Linux => ".deb",
        Platform::Windows => "-Setup.exe",
        Platform::MacOs => ".pkg",
    }
}

/// `--file` if given, otherwise the first installer under the search path.
pub fn resolve_artifact<L: DirLister>(settings: &HockeySettings, finder: &PathFinder<L>) -> Result<PathBuf> {
    if let Some(file) = &settings.file {
        return Ok(file.clone());
    }
    let suffix = artifact_suffix(settings.build.platform()?);
    Ok(finder.find_required(suffix, &settings.search_path)?.file_path)
}

pub fn run<L, D>(settings: &HockeySettings, finder: &PathFinder<L>, service: &D) -> Result<u64>
where
    L: DirLister,
    D: AppDistribution + ?Sized,
{
    let artifact = resolve_artifact(settings, finder)?;
    info!(artifact = %artifact.display(), version = %settings.build.version, "Publishing to Hockey");
    publish_version(service, &settings.build.version, &artifact)
}
