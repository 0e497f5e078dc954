//! Typed error definitions for desktop_release.
//! Provides a small set of well-known failure modes for better logs and tests.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Status code and reason reported by a remote service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteStatus {
    pub code: u16,
    pub text: String,
}

impl RemoteStatus {
    pub fn new(code: u16, text: impl Into<String>) -> Self {
        Self { code, text: text.into() }
    }

    /// Build from an HTTP status, using the canonical reason phrase as text.
    pub fn from_http(status: reqwest::StatusCode) -> Self {
        Self::new(status.as_u16(), status.canonical_reason().unwrap_or("Unknown"))
    }
}

impl fmt::Display for RemoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "status code \"{}\": \"{}\"", self.code, self.text)
    }
}

#[derive(Debug, Error)]
pub enum ReleaseError {
    #[error("Required setting {flag} (env {env}) is not defined")]
    MissingSetting { flag: &'static str, env: &'static str },

    #[error("Invalid wrapper build '{0}': expected <platform>#<version>")]
    InvalidWrapperBuild(String),

    #[error("Invalid platform '{0}'")]
    UnsupportedPlatform(String),

    #[error("Could not find \"{suffix}\"")]
    NotFound { suffix: String },

    #[error("File \"{0}\" not found or not a regular file")]
    NotAFile(PathBuf),

    #[error("File name \"{name}\" does not match {pattern}")]
    NamePattern { name: String, pattern: &'static str },

    #[error("Draft creation failed with {0}")]
    DraftCreation(RemoteStatus),

    #[error("Uploading \"{target}\" failed with {status}")]
    Upload { target: String, status: RemoteStatus },

    #[error("Deleting \"{target}\" failed with {status}")]
    Delete { target: String, status: RemoteStatus },

    #[error("Copying \"{from}\" to \"{to}\" failed with {status}")]
    Copy {
        from: String,
        to: String,
        status: RemoteStatus,
    },

    #[error("Hockey version creation failed with {0}")]
    VersionCreation(RemoteStatus),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Transport error talking to {service}: {message}")]
    Transport { service: &'static str, message: String },
}

impl ReleaseError {
    /// Attach a path to an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ReleaseError::Io { path: path.into(), source }
    }

    pub fn transport(service: &'static str, err: impl fmt::Display) -> Self {
        ReleaseError::Transport { service, message: err.to_string() }
    }

    /// Stable numeric code for structured logs.
    pub fn code(&self) -> u16 {
        match self {
            ReleaseError::MissingSetting { .. } => 10,
            ReleaseError::InvalidWrapperBuild(_) => 11,
            ReleaseError::UnsupportedPlatform(_) => 12,
            ReleaseError::NotFound { .. } => 20,
            ReleaseError::NotAFile(_) => 21,
            ReleaseError::NamePattern { .. } => 22,
            ReleaseError::DraftCreation(_) => 30,
            ReleaseError::Upload { .. } => 31,
            ReleaseError::Delete { .. } => 32,
            ReleaseError::Copy { .. } => 33,
            ReleaseError::VersionCreation(_) => 34,
            ReleaseError::Io { .. } => 40,
            ReleaseError::Archive(_) => 41,
            ReleaseError::Transport { .. } => 50,
        }
    }

    /// Short snake_case name used as the `kind` log field.
    pub fn kind(&self) -> &'static str {
        match self {
            ReleaseError::MissingSetting { .. } => "missing_setting",
            ReleaseError::InvalidWrapperBuild(_) => "invalid_wrapper_build",
            ReleaseError::UnsupportedPlatform(_) => "unsupported_platform",
            ReleaseError::NotFound { .. } => "not_found",
            ReleaseError::NotAFile(_) => "not_a_file",
            ReleaseError::NamePattern { .. } => "name_pattern",
            ReleaseError::DraftCreation(_) => "draft_creation",
            ReleaseError::Upload { .. } => "upload",
            ReleaseError::Delete { .. } => "delete",
            ReleaseError::Copy { .. } => "copy",
            ReleaseError::VersionCreation(_) => "version_creation",
            ReleaseError::Io { .. } => "io",
            ReleaseError::Archive(_) => "archive",
            ReleaseError::Transport { .. } => "transport",
        }
    }

    /// Whether the error is a usage problem (bad or missing flags).
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            ReleaseError::MissingSetting { .. } | ReleaseError::InvalidWrapperBuild(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ReleaseError>;
