use regex::Regex;
use std::path::Path;
use std::process::Command;
use tracing::debug;

use crate::errors::{ReleaseError, Result};

/// Join an S3 base path and a relative name with exactly one slash between
/// segments and no leading slash.
pub fn s3_key(base: &str, name: &str) -> String {
    base.split('/')
        .chain(name.split('/'))
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// First capture group of `pattern` in `name`.
pub fn capture_name(pattern: &'static str, name: &str) -> Result<String> {
    let mismatch = || ReleaseError::NamePattern {
        name: name.to_string(),
        pattern,
    };
    let re = Regex::new(pattern).map_err(|_| mismatch())?;
    re.captures(name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(mismatch)
}

/// `git rev-parse HEAD` in `dir`.
pub fn git_head_commit(dir: &Path) -> Result<String> {
    let output = Command::new("git")
        .args(["rev-parse", "HEAD"])
        .current_dir(dir)
        .output()
        .map_err(|e| ReleaseError::io(dir, e))?;

    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if !output.status.success() || !stderr.is_empty() {
        return Err(ReleaseError::io(
            dir,
            std::io::Error::other(format!("git rev-parse HEAD failed: {stderr}")),
        ));
    }
    let commit = String::from_utf8_lossy(&output.stdout).trim().to_string();
    debug!(%commit, "Resolved HEAD");
    Ok(commit)
}
