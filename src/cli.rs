//! CLI definition and parsing.
//! Defines Args (one subcommand per release step) and the conversion of each
//! subcommand's flags into its settings struct.
//!
//! Notes:
//! - Credentials and the wrapper build fall back to environment variables, so
//!   CI jobs can export them once instead of repeating flags.
//! - --debug is a shorthand for --log-level debug.

use clap::{Args as ClapArgs, Parser, Subcommand, ValueHint};
use std::path::PathBuf;

use crate::config::{
    AWS_REGION_DEFAULT, CHANGELOG_DEFAULT, GITHUB_API_DEFAULT, GITHUB_REPO_DEFAULT,
    GithubDraftSettings, HOCKEY_API_DEFAULT, HockeySettings, LogLevel, Platform, RepoSlug, S3Settings,
    S3UploadSettings, require, require_wrapper_build,
};
use crate::errors::Result;

#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Publish desktop application builds to GitHub Releases, HockeyApp and S3"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(short = 'd', long, global = true, help = "Enable debug logging (shorthand for --log-level debug)")]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, global = true, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Emit logs in structured JSON (includes timestamp, level, and structured fields).
    #[arg(long, global = true, help = "Emit logs in structured JSON")]
    pub json: bool,

    /// Also append logs to this file.
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create a release draft on GitHub and upload the build's assets
    GithubDraft(GithubDraftArgs),
    /// Upload the build's installer to Hockey
    Hockey(HockeyArgs),
    /// Upload the build's files to S3
    S3(S3Args),
    /// Point the static Windows RELEASES/setup keys on S3 at this build
    S3WinReleases(S3Args),
}

/// Flags every subcommand shares.
#[derive(ClapArgs, Debug, Clone)]
pub struct BuildArgs {
    /// Wrapper build, e.g. "Linux#3.7.1234".
    #[arg(short = 'w', long, env = "WRAPPER_BUILD")]
    pub wrapper_build: Option<String>,

    /// Local path to look for files (e.g. "../../wrap").
    #[arg(short = 'p', long, value_hint = ValueHint::DirPath)]
    pub path: Option<PathBuf>,
}

impl BuildArgs {
    fn search_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

#[derive(ClapArgs, Debug, Clone)]
pub struct GithubDraftArgs {
    #[command(flatten)]
    pub build: BuildArgs,

    /// GitHub access token.
    #[arg(short = 't', long, env = "GITHUB_ACCESS_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Repository as <owner>/<name>.
    #[arg(long, default_value = GITHUB_REPO_DEFAULT)]
    pub repo: RepoSlug,

    #[arg(long, default_value = GITHUB_API_DEFAULT, hide = true)]
    pub github_api: String,

    /// Release notes body.
    #[arg(long, default_value = CHANGELOG_DEFAULT)]
    pub changelog: String,

    /// Commit the tag points at (defaults to `git rev-parse HEAD`).
    #[arg(long)]
    pub commitish: Option<String>,
}

impl GithubDraftArgs {
    pub fn settings(&self) -> Result<GithubDraftSettings> {
        Ok(GithubDraftSettings {
            token: require(self.github_token.as_deref(), "--github-token", "GITHUB_ACCESS_TOKEN")?,
            api_base: self.github_api.clone(),
            repo: self.repo.clone(),
            build: require_wrapper_build(self.build.wrapper_build.as_deref())?,
            search_path: self.build.search_path(),
            changelog: self.changelog.clone(),
            commitish: self.commitish.clone(),
        })
    }
}

#[derive(ClapArgs, Debug, Clone)]
pub struct HockeyArgs {
    #[command(flatten)]
    pub build: BuildArgs,

    /// Hockey app ID.
    #[arg(short = 'i', long, env = "HOCKEY_ID")]
    pub hockey_id: Option<String>,

    /// Hockey API token.
    #[arg(short = 't', long, env = "HOCKEY_TOKEN", hide_env_values = true)]
    pub hockey_token: Option<String>,

    #[arg(long, default_value = HOCKEY_API_DEFAULT, hide = true)]
    pub hockey_api: String,

    /// Upload this file instead of searching --path for the installer.
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub file: Option<PathBuf>,
}

impl HockeyArgs {
    /// Flags and `HOCKEY_*` win; otherwise the platform's own variables
    /// (`LINUX_HOCKEY_ID`, `WIN_HOCKEY_TOKEN`, ...) are used.
    pub fn settings(&self) -> Result<HockeySettings> {
        let build = require_wrapper_build(self.build.wrapper_build.as_deref())?;
        let platform_vars = build.platform().ok().map(Platform::hockey_env);

        let app_id = or_platform_env(self.hockey_id.as_deref(), platform_vars.map(|(id, _)| id));
        let token = or_platform_env(self.hockey_token.as_deref(), platform_vars.map(|(_, t)| t));
        Ok(HockeySettings {
            app_id: require(app_id.as_deref(), "--hockey-id", "HOCKEY_ID")?,
            token: require(token.as_deref(), "--hockey-token", "HOCKEY_TOKEN")?,
            api_base: self.hockey_api.clone(),
            build,
            search_path: self.build.search_path(),
            file: self.file.clone(),
        })
    }
}

#[derive(ClapArgs, Debug, Clone)]
pub struct S3Args {
    #[command(flatten)]
    pub build: BuildArgs,

    /// S3 bucket.
    #[arg(short = 'b', long, env = "BUCKET")]
    pub bucket: Option<String>,

    /// Base path on S3 (e.g. "apps/windows"). Windows builds fall back to WIN_S3_PATH.
    #[arg(short = 's', long = "s3path", default_value = "")]
    pub s3_path: String,

    #[arg(long, env = "AWS_ACCESS_KEY_ID", hide_env_values = true)]
    pub aws_access_key_id: Option<String>,

    #[arg(long, env = "AWS_SECRET_ACCESS_KEY", hide_env_values = true)]
    pub aws_secret_access_key: Option<String>,

    #[arg(long, env = "AWS_REGION", default_value = AWS_REGION_DEFAULT)]
    pub region: String,
}

impl S3Args {
    /// Windows builds fall back to `WIN_S3_BUCKET`/`WIN_S3_PATH` when neither
    /// the flag nor the generic variable is set.
    pub fn settings(&self) -> Result<S3UploadSettings> {
        let build = require_wrapper_build(self.build.wrapper_build.as_deref())?;
        let platform_vars = build.platform().ok().and_then(Platform::s3_env);

        let bucket = or_platform_env(self.bucket.as_deref(), platform_vars.map(|(b, _)| b));
        let s3_path = or_platform_env(Some(&self.s3_path), platform_vars.map(|(_, p)| p)).unwrap_or_default();
        let s3 = S3Settings {
            bucket: require(bucket.as_deref(), "--bucket", "BUCKET")?,
            region: self.region.clone(),
            access_key_id: require(
                self.aws_access_key_id.as_deref(),
                "--aws-access-key-id",
                "AWS_ACCESS_KEY_ID",
            )?,
            secret_access_key: require(
                self.aws_secret_access_key.as_deref(),
                "--aws-secret-access-key",
                "AWS_SECRET_ACCESS_KEY",
            )?,
        };
        Ok(S3UploadSettings {
            s3,
            build,
            s3_path,
            search_path: self.build.search_path(),
        })
    }
}

/// `value` when set and non-blank, else the named variable from the environment.
fn or_platform_env(value: Option<&str>, var: Option<&'static str>) -> Option<String> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Some(v.to_string()),
        _ => var.and_then(|name| std::env::var(name).ok()),
    }
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }
}

/// Parse argv. Usage errors exit with code 1; --help/--version exit 0.
pub fn parse() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code)
        }
    }
}
