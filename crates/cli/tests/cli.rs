use assert_cmd::Command;

fn dbseed() -> Command {
    let mut cmd = Command::cargo_bin("dbseed").unwrap();
    cmd.env_remove("DBSEED_ENV")
        .env_remove("DBSEED_CONFIG_DIR")
        .env_remove("DBSEED_BOOTSTRAP__PASSWORD")
        .env_remove("RUST_LOG")
        .args(["--config-dir", "/nonexistent/dbseed-config"]);
    cmd
}

#[test]
fn help_lists_subcommands() {
    let output = dbseed().arg("--help").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    for subcommand in ["run", "verify", "plan"] {
        assert!(stdout.contains(subcommand), "missing {subcommand}: {stdout}");
    }
}

#[test]
fn plan_prints_steps_without_connecting() {
    let output = dbseed().arg("plan").output().unwrap();
    assert!(output.status.success());

    let plan: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let steps: Vec<_> = plan
        .as_array()
        .unwrap()
        .iter()
        .map(|step| step["step"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(steps, ["select_database", "create_user", "create_collection"]);
    assert_eq!(plan[0]["params"]["database"], "graylog");
    assert_eq!(plan[2]["params"]["collection"], "dummy");
    assert_eq!(plan[1]["params"]["password"], "***");
}

#[test]
fn production_requires_a_password() {
    let output = dbseed()
        .args(["--env", "production", "plan"])
        .output()
        .unwrap();
    assert!(!output.status.success());

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("password must be supplied"), "{stderr}");
}

#[test]
fn unknown_environment_is_rejected() {
    let output = dbseed().args(["--env", "qa", "plan"]).output().unwrap();
    assert!(!output.status.success());
}

#[test]
fn local_default_password_is_logged() {
    let output = dbseed().arg("plan").output().unwrap();
    assert!(output.status.success());

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("using the local default"), "{stderr}");
}

#[test]
fn configured_password_suppresses_default_warning() {
    let output = dbseed()
        .env("DBSEED_BOOTSTRAP__PASSWORD", "from-env")
        .args(["--env", "production", "plan"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(!stderr.contains("using the local default"), "{stderr}");
}
