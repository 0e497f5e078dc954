//! Remote side of a release: object store, release drafts and app versions.

pub mod github;
pub mod hockey;
pub mod release;
pub mod s3;
pub mod s3_error;
pub mod store;

pub use github::GithubReleases;
pub use hockey::{AppDistribution, HockeyClient, VersionFields, publish_version};
pub use release::{DraftHandle, DraftMetadata, ReleaseService, publish_release_with_assets};
pub use s3::S3Store;
pub use store::{ArtifactPublisher, ObjectStore, UploadJob};

pub(crate) const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
