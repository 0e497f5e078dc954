use clap::Parser;
use serial_test::serial;
use std::path::PathBuf;

use desktop_release::cli::{Args, Command};
use desktop_release::{Platform, ReleaseError};

const ENV_VARS: &[&str] = &[
    "WRAPPER_BUILD",
    "GITHUB_ACCESS_TOKEN",
    "HOCKEY_ID",
    "HOCKEY_TOKEN",
    "BUCKET",
    "AWS_ACCESS_KEY_ID",
    "AWS_SECRET_ACCESS_KEY",
    "AWS_REGION",
    "LINUX_HOCKEY_ID",
    "LINUX_HOCKEY_TOKEN",
    "WIN_HOCKEY_ID",
    "WIN_HOCKEY_TOKEN",
    "MACOS_CUSTOM_HOCKEY_ID",
    "MACOS_CUSTOM_HOCKEY_TOKEN",
    "WIN_S3_BUCKET",
    "WIN_S3_PATH",
];

fn clear_env() {
    for var in ENV_VARS {
        unsafe { std::env::remove_var(var) };
    }
}

#[test]
#[serial]
fn github_draft_flags_become_settings() {
    clear_env();
    let args = Args::parse_from([
        "desktop-release",
        "github-draft",
        "-w",
        "Linux#3.7.1",
        "-t",
        "ghp_token",
        "-p",
        "../../wrap",
        "--repo",
        "acme/desktop",
        "--commitish",
        "deadbeef",
    ]);
    let Command::GithubDraft(a) = args.command else {
        panic!("expected github-draft");
    };
    let s = a.settings().unwrap();
    assert_eq!(s.token, "ghp_token");
    assert_eq!(s.repo.to_string(), "acme/desktop");
    assert_eq!(s.build.platform().unwrap(), Platform::Linux);
    assert_eq!(s.build.version, "3.7.1");
    assert_eq!(s.search_path, PathBuf::from("../../wrap"));
    assert_eq!(s.changelog, "...");
    assert_eq!(s.commitish.as_deref(), Some("deadbeef"));
    assert_eq!(s.api_base, "https://api.github.com");
}

#[test]
#[serial]
fn s3_settings_come_from_environment() {
    clear_env();
    unsafe {
        std::env::set_var("WRAPPER_BUILD", "windows#3.8.0");
        std::env::set_var("BUCKET", "wire-taco");
        std::env::set_var("AWS_ACCESS_KEY_ID", "AKIA");
        std::env::set_var("AWS_SECRET_ACCESS_KEY", "shh");
    }
    let args = Args::parse_from(["desktop-release", "s3", "--s3path", "win/prod"]);
    clear_env();

    let Command::S3(a) = args.command else {
        panic!("expected s3");
    };
    let s = a.settings().unwrap();
    assert_eq!(s.s3.bucket, "wire-taco");
    assert_eq!(s.s3.region, "us-east-1");
    assert_eq!(s.s3.access_key_id, "AKIA");
    assert_eq!(s.s3_path, "win/prod");
    assert_eq!(s.search_path, PathBuf::from("."));
    assert_eq!(s.build.platform().unwrap(), Platform::Windows);
}

#[test]
#[serial]
fn missing_bucket_is_reported_by_flag_and_env() {
    clear_env();
    let args = Args::parse_from([
        "desktop-release",
        "s3-win-releases",
        "-w",
        "windows#3.8.0",
        "--aws-access-key-id",
        "AKIA",
        "--aws-secret-access-key",
        "shh",
    ]);
    let Command::S3WinReleases(a) = args.command else {
        panic!("expected s3-win-releases");
    };
    let err = a.settings().unwrap_err();
    assert!(matches!(err, ReleaseError::MissingSetting { flag: "--bucket", env: "BUCKET" }));
    assert!(err.is_usage());
}

#[test]
#[serial]
fn hockey_requires_id_and_token() {
    clear_env();
    let args = Args::parse_from(["desktop-release", "hockey", "-w", "macos#3.7.1", "-t", "tok"]);
    let Command::Hockey(a) = args.command else {
        panic!("expected hockey");
    };
    assert!(matches!(
        a.settings().unwrap_err(),
        ReleaseError::MissingSetting { flag: "--hockey-id", .. }
    ));
}

#[test]
#[serial]
fn malformed_wrapper_build_is_rejected() {
    clear_env();
    let args = Args::parse_from(["desktop-release", "hockey", "-w", "linux-3.7.1", "-i", "id", "-t", "tok"]);
    let Command::Hockey(a) = args.command else {
        panic!("expected hockey");
    };
    assert!(matches!(a.settings().unwrap_err(), ReleaseError::InvalidWrapperBuild(_)));
}

#[test]
fn bad_repo_slug_is_a_parse_error() {
    assert!(Args::try_parse_from(["desktop-release", "github-draft", "--repo", "no-slash"]).is_err());
}

#[test]
#[serial]
fn hockey_falls_back_to_platform_credentials() {
    clear_env();
    unsafe {
        std::env::set_var("WIN_HOCKEY_ID", "win-app");
        std::env::set_var("WIN_HOCKEY_TOKEN", "win-token");
        std::env::set_var("LINUX_HOCKEY_ID", "linux-app");
    }
    let args = Args::parse_from(["desktop-release", "hockey", "-w", "Windows#3.7.1"]);
    let Command::Hockey(a) = args.command else {
        panic!("expected hockey");
    };
    let s = a.settings();
    clear_env();

    let s = s.unwrap();
    assert_eq!(s.app_id, "win-app");
    assert_eq!(s.token, "win-token");
}

#[test]
#[serial]
fn generic_hockey_values_beat_platform_ones() {
    clear_env();
    unsafe {
        std::env::set_var("HOCKEY_ID", "generic-app");
        std::env::set_var("MACOS_CUSTOM_HOCKEY_ID", "mac-app");
        std::env::set_var("MACOS_CUSTOM_HOCKEY_TOKEN", "mac-token");
    }
    let args = Args::parse_from(["desktop-release", "hockey", "-w", "macos#3.7.1"]);
    let Command::Hockey(a) = args.command else {
        panic!("expected hockey");
    };
    let s = a.settings();
    clear_env();

    let s = s.unwrap();
    assert_eq!(s.app_id, "generic-app");
    assert_eq!(s.token, "mac-token");
}

#[test]
#[serial]
fn windows_s3_uses_win_bucket_and_path() {
    clear_env();
    unsafe {
        std::env::set_var("WIN_S3_BUCKET", "wire-win");
        std::env::set_var("WIN_S3_PATH", "win/custom");
    }
    let args = Args::parse_from([
        "desktop-release",
        "s3-win-releases",
        "-w",
        "windows-custom#3.8.0",
        "--aws-access-key-id",
        "AKIA",
        "--aws-secret-access-key",
        "shh",
    ]);
    let Command::S3WinReleases(a) = args.command else {
        panic!("expected s3-win-releases");
    };
    let s = a.settings();
    clear_env();

    let s = s.unwrap();
    assert_eq!(s.s3.bucket, "wire-win");
    assert_eq!(s.s3_path, "win/custom");
}

#[test]
#[serial]
fn win_s3_variables_do_not_apply_to_linux() {
    clear_env();
    unsafe {
        std::env::set_var("WIN_S3_BUCKET", "wire-win");
        std::env::set_var("WIN_S3_PATH", "win/custom");
    }
    let args = Args::parse_from([
        "desktop-release",
        "s3",
        "-w",
        "linux#3.8.0",
        "--aws-access-key-id",
        "AKIA",
        "--aws-secret-access-key",
        "shh",
    ]);
    let Command::S3(a) = args.command else {
        panic!("expected s3");
    };
    let err = a.settings();
    clear_env();

    assert!(matches!(err, Err(ReleaseError::MissingSetting { flag: "--bucket", .. })));
}

#[test]
#[serial]
fn explicit_s3path_beats_win_s3_path() {
    clear_env();
    unsafe {
        std::env::set_var("WIN_S3_PATH", "win/custom");
    }
    let args = Args::parse_from([
        "desktop-release",
        "s3",
        "-w",
        "windows#3.8.0",
        "-b",
        "bucket",
        "-s",
        "win/prod",
        "--aws-access-key-id",
        "AKIA",
        "--aws-secret-access-key",
        "shh",
    ]);
    let Command::S3(a) = args.command else {
        panic!("expected s3");
    };
    let s = a.settings();
    clear_env();

    assert_eq!(s.unwrap().s3_path, "win/prod");
}
