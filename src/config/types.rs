//! Core configuration types.
//! - WrapperBuild/Platform describe what is being released.
//! - The *Settings structs are built once per invocation and handed to the
//!   drivers; nothing below the CLI layer reads the environment.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::errors::{ReleaseError, Result};

/// Program-defined verbosity levels exposed to users.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Informational output (default)
    #[default]
    Normal,
    /// More info (like verbose)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Desktop platform a build targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Linux,
    Windows,
    MacOs,
}

impl Platform {
    /// Detect the platform by substring, e.g. "linux-internal" is Linux.
    pub fn detect(raw: &str) -> Result<Self> {
        let lower = raw.to_ascii_lowercase();
        if lower.contains("linux") {
            Ok(Platform::Linux)
        } else if lower.contains("windows") {
            Ok(Platform::Windows)
        } else if lower.contains("macos") {
            Ok(Platform::MacOs)
        } else {
            Err(ReleaseError::UnsupportedPlatform(raw.to_string()))
        }
    }

    /// Human name used in release titles.
    pub fn display_name(self) -> &'static str {
        match self {
            Platform::Linux => "Linux",
            Platform::Windows => "Windows",
            Platform::MacOs => "macOS",
        }
    }

    /// `(app id, token)` variables CI exports for this platform's Hockey app.
    pub fn hockey_env(self) -> (&'static str, &'static str) {
        match self {
            Platform::Linux => ("LINUX_HOCKEY_ID", "LINUX_HOCKEY_TOKEN"),
            Platform::Windows => ("WIN_HOCKEY_ID", "WIN_HOCKEY_TOKEN"),
            Platform::MacOs => ("MACOS_CUSTOM_HOCKEY_ID", "MACOS_CUSTOM_HOCKEY_TOKEN"),
        }
    }

    /// `(bucket, base path)` variables CI exports for S3, Windows only.
    pub fn s3_env(self) -> Option<(&'static str, &'static str)> {
        match self {
            Platform::Windows => Some(("WIN_S3_BUCKET", "WIN_S3_PATH")),
            Platform::Linux | Platform::MacOs => None,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A CI build identifier of the form `<platform>#<version>`, lowercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapperBuild {
    /// Raw platform segment (e.g. "linux", "windows-internal").
    pub platform_name: String,
    pub version: String,
}

impl WrapperBuild {
    pub fn parse(raw: &str) -> Result<Self> {
        let lower = raw.trim().to_lowercase();
        let Some((platform, version)) = lower.split_once('#') else {
            return Err(ReleaseError::InvalidWrapperBuild(raw.to_string()));
        };
        if platform.is_empty() || version.is_empty() {
            return Err(ReleaseError::InvalidWrapperBuild(raw.to_string()));
        }
        Ok(Self {
            platform_name: platform.to_string(),
            version: version.to_string(),
        })
    }

    pub fn platform(&self) -> Result<Platform> {
        Platform::detect(&self.platform_name)
    }
}

impl FromStr for WrapperBuild {
    type Err = ReleaseError;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// GitHub `owner/name` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    pub owner: String,
    pub name: String,
}

impl FromStr for RepoSlug {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
                Ok(Self {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(format!("invalid repository '{s}': expected <owner>/<name>")),
        }
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Object store connection settings.
#[derive(Debug, Clone)]
pub struct S3Settings {
    pub bucket: String,
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
}

/// Settings for `github-draft`.
#[derive(Debug, Clone)]
pub struct GithubDraftSettings {
    pub token: String,
    pub api_base: String,
    pub repo: RepoSlug,
    pub build: WrapperBuild,
    pub search_path: PathBuf,
    pub changelog: String,
    /// Target commit; `None` means ask git for HEAD.
    pub commitish: Option<String>,
}

/// Settings for `hockey`.
#[derive(Debug, Clone)]
pub struct HockeySettings {
    pub app_id: String,
    pub token: String,
    pub api_base: String,
    pub build: WrapperBuild,
    pub search_path: PathBuf,
    /// Explicit artifact; skips discovery when set.
    pub file: Option<PathBuf>,
}

/// Settings for `s3` and `s3-win-releases`.
#[derive(Debug, Clone)]
pub struct S3UploadSettings {
    pub s3: S3Settings,
    pub build: WrapperBuild,
    pub s3_path: String,
    pub search_path: PathBuf,
}
