use assert_cmd::Command;

fn bin() -> Command {
    let mut cmd = Command::cargo_bin("desktop-release").expect("binary built");
    for var in [
        "WRAPPER_BUILD",
        "GITHUB_ACCESS_TOKEN",
        "HOCKEY_ID",
        "HOCKEY_TOKEN",
        "BUCKET",
        "AWS_ACCESS_KEY_ID",
        "AWS_SECRET_ACCESS_KEY",
        "LINUX_HOCKEY_ID",
        "LINUX_HOCKEY_TOKEN",
        "WIN_S3_BUCKET",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn help_succeeds() {
    bin().arg("--help").assert().success();
    bin().args(["s3-win-releases", "--help"]).assert().success();
}

#[test]
fn missing_subcommand_is_usage_error() {
    bin().assert().code(1);
}

#[test]
fn missing_wrapper_build_exits_one() {
    let temp = assert_fs::TempDir::new().unwrap();
    bin()
        .args(["hockey", "-i", "app", "-t", "tok", "-p"])
        .arg(temp.path())
        .assert()
        .code(1);
}

#[test]
fn missing_bucket_exits_one_before_any_request() {
    let temp = assert_fs::TempDir::new().unwrap();
    bin()
        .args(["s3", "-w", "linux#3.7.1", "-p"])
        .arg(temp.path())
        .assert()
        .code(1);
}
