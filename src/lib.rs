//! Core library for `desktop_release`.
//!
//! Finds build artifacts on disk and publishes them: release drafts on
//! GitHub, app versions on HockeyApp and objects on S3. Configuration is
//! handed in explicitly; nothing in here reads the environment.

pub mod cli;
pub mod config;
pub mod drivers;
pub mod errors;
pub mod fs_ops;
pub mod output;
pub mod publish;
pub mod utils;

pub use config::{LogLevel, Platform, WrapperBuild};
pub use errors::{ReleaseError, RemoteStatus};
pub use fs_ops::{FindOptions, FindResult, PathFinder, find_down};
pub use publish::{
    ArtifactPublisher, DraftHandle, DraftMetadata, ObjectStore, ReleaseService, UploadJob,
    publish_release_with_assets,
};
