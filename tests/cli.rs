use assert_cmd::Command;
use predicates::prelude::*;

fn shell_mcp() -> Command {
    let mut cmd = Command::cargo_bin("shell-mcp").unwrap();
    cmd.env_remove("HOST")
        .env_remove("PORT")
        .env_remove("UI_RESOURCES_DIR")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_mentions_stdio_flag() {
    shell_mcp()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--stdio"));
}

#[test]
fn config_shows_defaults() {
    shell_mcp()
        .args(["config", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""host": "0.0.0.0""#))
        .stdout(predicate::str::contains(r#""port": 3001"#));
}

#[test]
fn config_reads_environment() {
    shell_mcp()
        .env("HOST", "127.0.0.1")
        .env("PORT", "4242")
        .env("UI_RESOURCES_DIR", "/srv/ui")
        .args(["config", "--format", "toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"host = "127.0.0.1""#))
        .stdout(predicate::str::contains("port = 4242"))
        .stdout(predicate::str::contains(r#"ui_resources_dir = "/srv/ui""#));
}

#[test]
fn flags_beat_environment() {
    shell_mcp()
        .env("PORT", "4242")
        .args(["--port", "5000", "config", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""port": 5000"#));
}

#[test]
fn invalid_port_fails_before_serving() {
    shell_mcp()
        .env("PORT", "not-a-port")
        .arg("config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("PORT"));
}

#[test]
fn config_writes_nothing_to_stderr_by_default() {
    shell_mcp()
        .arg("config")
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}
