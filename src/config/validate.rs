//! Setting validation.
//! Flags are optional at the clap level (they may come from the environment);
//! these helpers turn an absent or blank value into a typed usage error.

use tracing::error;

use crate::errors::{ReleaseError, Result};

use super::types::WrapperBuild;

/// Return the value if present and non-blank, otherwise `MissingSetting`.
pub fn require(value: Option<&str>, flag: &'static str, env: &'static str) -> Result<String> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => {
            error!(flag, env, "Required setting is missing");
            Err(ReleaseError::MissingSetting { flag, env })
        }
    }
}

/// Require `--wrapper-build` and parse it.
pub fn require_wrapper_build(value: Option<&str>) -> Result<WrapperBuild> {
    let raw = require(value, "--wrapper-build", "WRAPPER_BUILD")?;
    WrapperBuild::parse(&raw)
}
