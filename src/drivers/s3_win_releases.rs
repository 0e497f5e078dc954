//! `s3-win-releases`: point the static Windows update keys (`RELEASES` and
//! the setup executable) at the freshly uploaded versioned objects.

use std::path::Path;
use tracing::info;

use crate::config::{Platform, S3UploadSettings, WrapperBuild};
use crate::errors::{ReleaseError, Result};
use crate::fs_ops::{DirLister, PathFinder};
use crate::publish::{ArtifactPublisher, ObjectStore};
use crate::utils::{capture_name, s3_key};

use super::s3_upload::NUPKG_PATTERN;

pub const SETUP_PATTERN: &str = r"(.+)-Setup\.exe";

/// Static keys clients poll and the versioned keys they should now serve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleasePointers {
    pub static_releases_key: String,
    pub static_exe_key: String,
    pub latest_releases_key: String,
    pub latest_exe_key: String,
}

pub fn plan<L: DirLister>(
    finder: &PathFinder<L>,
    build: &WrapperBuild,
    search_path: &Path,
    s3_base: &str,
) -> Result<ReleasePointers> {
    if build.platform()? != Platform::Windows {
        return Err(ReleaseError::UnsupportedPlatform(build.platform_name.clone()));
    }

    let nupkg = finder.find_required("-full.nupkg", search_path)?;
    let setup_exe = finder.find_required("-Setup.exe", search_path)?;
    let app_short = capture_name(NUPKG_PATTERN, &nupkg.file_name)?;
    let app_full = capture_name(SETUP_PATTERN, &setup_exe.file_name)?;
    let version = &build.version;

    Ok(ReleasePointers {
        static_releases_key: s3_key(s3_base, "RELEASES"),
        static_exe_key: s3_key(s3_base, &format!("{app_full}-Setup.exe")),
        latest_releases_key: s3_key(s3_base, &format!("{app_short}-{version}-RELEASES")),
        latest_exe_key: s3_key(s3_base, &format!("{app_short}-{version}.exe")),
    })
}

/// Delete the static keys, then copy the versioned objects onto them, in order.
pub fn apply<S: ObjectStore>(publisher: &ArtifactPublisher<S>, pointers: &ReleasePointers) -> Result<()> {
    publisher.delete(&pointers.static_releases_key)?;
    publisher.delete(&pointers.static_exe_key)?;
    publisher.copy(&pointers.latest_releases_key, &pointers.static_releases_key)?;
    publisher.copy(&pointers.latest_exe_key, &pointers.static_exe_key)?;
    Ok(())
}

pub fn run<L, S>(settings: &S3UploadSettings, finder: &PathFinder<L>, publisher: &ArtifactPublisher<S>) -> Result<()>
where
    L: DirLister,
    S: ObjectStore,
{
    let pointers = plan(finder, &settings.build, &settings.search_path, &settings.s3_path)?;
    info!(?pointers, bucket = %settings.s3.bucket, "Updating RELEASES on S3");
    apply(publisher, &pointers)
}
