//! Application orchestrator.
//! Initializes logging, turns the parsed subcommand into its settings, builds
//! the remote clients and runs the matching driver.

use anyhow::Result;
use tracing::{debug, error, info};

use desktop_release::ReleaseError;
use desktop_release::cli::{Args, Command};
use desktop_release::drivers::{github_draft, hockey, s3_upload, s3_win_releases};
use desktop_release::fs_ops::{LocalFs, PathFinder};
use desktop_release::output as out;
use desktop_release::publish::{ArtifactPublisher, GithubReleases, HockeyClient, S3Store};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    let level = args.effective_log_level().unwrap_or_default();
    let guard = init_tracing(&level, args.log_file.as_deref(), args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {e}"));
        e
    })?;

    debug!(command = ?args.command, "Starting desktop-release");

    let result = dispatch(&args.command);

    if let Err(e) = &result {
        report(e);
    }
    // Flush the file appender before the process exits.
    drop(guard);
    result.map_err(anyhow::Error::from)
}

fn dispatch(command: &Command) -> Result<(), ReleaseError> {
    match command {
        Command::GithubDraft(a) => {
            let settings = a.settings()?;
            let service = GithubReleases::new(&settings.token, &settings.api_base, settings.repo.clone())?;
            let draft = github_draft::run(&settings, &LocalFs, &service)?;
            info!(url = %draft.draft_url, "Draft ready");
            out::print_success("Done creating draft.");
        }
        Command::Hockey(a) => {
            let settings = a.settings()?;
            let service = HockeyClient::new(&settings.app_id, &settings.token, &settings.api_base)?;
            let version_id = hockey::run(&settings, &PathFinder::new(), &service)?;
            info!(version_id, "Hockey version published");
            out::print_success("Done.");
        }
        Command::S3(a) => {
            let settings = a.settings()?;
            let publisher = ArtifactPublisher::new(S3Store::connect(&settings.s3)?);
            s3_upload::run(&settings, &PathFinder::new(), &publisher)?;
            out::print_success("Done uploading to S3.");
        }
        Command::S3WinReleases(a) => {
            let settings = a.settings()?;
            let publisher = ArtifactPublisher::new(S3Store::connect(&settings.s3)?);
            s3_win_releases::run(&settings, &PathFinder::new(), &publisher)?;
            out::print_success("Done updating RELEASES on S3.");
        }
    }
    Ok(())
}

/// Log a failure with its code/kind and give the user one readable line.
fn report(e: &ReleaseError) {
    let code = e.code();
    let kind = e.kind();
    match e {
        ReleaseError::NotFound { suffix } => {
            error!(code, kind, %suffix, "No artifact matched")
        }
        ReleaseError::NotAFile(path) => {
            error!(code, kind, path = %path.display(), "Upload source is not a regular file")
        }
        ReleaseError::DraftCreation(status) | ReleaseError::VersionCreation(status) => {
            error!(code, kind, status = status.code, text = %status.text, "Remote creation failed")
        }
        ReleaseError::Upload { target, status }
        | ReleaseError::Delete { target, status } => {
            error!(code, kind, %target, status = status.code, text = %status.text, "Remote call failed")
        }
        ReleaseError::Copy { from, to, status } => {
            error!(code, kind, %from, %to, status = status.code, text = %status.text, "Remote copy failed")
        }
        _ => error!(code, kind, error = %e, "Release step failed"),
    }

    out::print_error(&e.to_string());
    if e.is_usage() {
        out::print_info("Run with --help to see the required flags and environment variables.");
    }
}
