//! `s3`: upload a build's installers (and, for Linux, the Debian repository
//! indexes) to the object store in one batch.

use std::path::Path;
use tracing::info;

use crate::config::{Platform, S3UploadSettings};
use crate::errors::Result;
use crate::fs_ops::{DirLister, FindResult, PathFinder};
use crate::publish::{ArtifactPublisher, ObjectStore, UploadJob};
use crate::utils::{capture_name, s3_key};

/// Debian repository files published next to the package, relative to the
/// build directory.
pub const DEBIAN_REPOSITORY_FILES: &[&str] = &[
    "debian/dists/stable/Contents-amd64",
    "debian/dists/stable/Contents-amd64.bz2",
    "debian/dists/stable/Contents-amd64.gz",
    "debian/dists/stable/InRelease",
    "debian/dists/stable/Release",
    "debian/dists/stable/Release.gpg",
    "debian/dists/stable/main/binary-amd64/Packages",
    "debian/dists/stable/main/binary-amd64/Packages.bz2",
    "debian/dists/stable/main/binary-amd64/Packages.gz",
];

pub const NUPKG_PATTERN: &str = r"(.+)-[\d.]+-full\.nupkg";

fn job(found: &FindResult, s3_base: &str, name: &str) -> UploadJob {
    UploadJob::new(found.file_path.clone(), s3_key(s3_base, name))
}

/// Work out every file to upload for `platform` and its destination key.
pub fn plan_uploads<L: DirLister>(
    finder: &PathFinder<L>,
    platform: Platform,
    version: &str,
    search_path: &Path,
    s3_base: &str,
) -> Result<Vec<UploadJob>> {
    match platform {
        Platform::Linux => {
            let app_image = finder.find_required(".AppImage", search_path)?;
            let deb = finder.find_required(".deb", search_path)?;

            let pool_name = format!("debian/pool/main/{}", deb.file_name);
            let mut jobs: Vec<UploadJob> = std::iter::once(pool_name.as_str())
                .chain(DEBIAN_REPOSITORY_FILES.iter().copied())
                .map(|name| UploadJob::new(search_path.join(name), s3_key(s3_base, name)))
                .collect();
            jobs.push(job(&app_image, s3_base, &app_image.file_name));
            jobs.push(job(&deb, s3_base, &deb.file_name));
            Ok(jobs)
        }
        Platform::Windows => {
            let setup_exe = finder.find_required("-Setup.exe", search_path)?;
            let nupkg = finder.find_required("-full.nupkg", search_path)?;
            let releases = finder.find_required("RELEASES", search_path)?;
            let app = capture_name(NUPKG_PATTERN, &nupkg.file_name)?;

            Ok(vec![
                job(&nupkg, s3_base, &nupkg.file_name),
                job(&releases, s3_base, &format!("{app}-{version}-RELEASES")),
                job(&setup_exe, s3_base, &format!("{app}-{version}.exe")),
            ])
        }
        Platform::MacOs => {
            let pkg = finder.find_required(".pkg", search_path)?;
            Ok(vec![job(&pkg, s3_base, &pkg.file_name)])
        }
    }
}

pub fn run<L, S>(settings: &S3UploadSettings, finder: &PathFinder<L>, publisher: &ArtifactPublisher<S>) -> Result<()>
where
    L: DirLister,
    S: ObjectStore,
{
    let platform = settings.build.platform()?;
    let jobs = plan_uploads(
        finder,
        platform,
        &settings.build.version,
        &settings.search_path,
        &settings.s3_path,
    )?;
    info!(%platform, bucket = %settings.s3.bucket, count = jobs.len(), "Uploading to S3");
    publisher.upload_all(&jobs)
}
