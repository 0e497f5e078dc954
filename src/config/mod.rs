//! Config module.
//! Provides the wrapper-build/platform types, per-command settings structs and
//! the validation helpers that turn optional flags into required settings.

pub mod types;
mod validate;

pub use types::{
    GithubDraftSettings, HockeySettings, LogLevel, Platform, RepoSlug, S3Settings,
    S3UploadSettings, WrapperBuild,
};
pub use validate::{require, require_wrapper_build};

/// Defaults shared across submodules.
pub const GITHUB_API_DEFAULT: &str = "https://api.github.com";
pub const GITHUB_REPO_DEFAULT: &str = "wireapp/wire-desktop";
pub const HOCKEY_API_DEFAULT: &str = "https://rink.hockeyapp.net/api/2";
pub const AWS_REGION_DEFAULT: &str = "us-east-1";
pub const CHANGELOG_DEFAULT: &str = "...";
