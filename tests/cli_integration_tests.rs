use std::io::Write;
use std::net::TcpListener;
use std::process::Command;

/// Test helper to run CLI commands and capture output
fn run_cli_command(args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_kc"))
        .args(args)
        .env("NO_COLOR", "1")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

/// Test helper to check if output contains expected text
fn assert_output_contains(output: &str, expected: &str) {
    assert!(
        output.contains(expected),
        "Output did not contain expected text.\nExpected: {}\nActual output:\n{}",
        expected,
        output
    );
}

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_cli_help_command() {
    let (stdout, _stderr, exit_code) = run_cli_command(&["--help"]);

    assert_eq!(exit_code, 0);
    assert_output_contains(&stdout, "Public ip lookup and a multi-timezone clock");
    assert_output_contains(&stdout, "Commands:");
    assert_output_contains(&stdout, "ip");
    assert_output_contains(&stdout, "now");
}

#[test]
fn test_cli_version_command() {
    let (stdout, _stderr, exit_code) = run_cli_command(&["--version"]);

    assert_eq!(exit_code, 0);
    assert_output_contains(&stdout, "0.1.0");
}

#[test]
fn test_cli_now_help_mentions_no_stop() {
    let (stdout, _stderr, exit_code) = run_cli_command(&["now", "--help"]);

    assert_eq!(exit_code, 0);
    assert_output_contains(&stdout, "--no-stop");
    assert_output_contains(&stdout, "Continuously print time until stopped");
}

#[test]
fn test_cli_now_prints_both_blocks() {
    let (stdout, _stderr, exit_code) = run_cli_command(&["now"]);

    assert_eq!(exit_code, 0);
    assert_output_contains(&stdout, "24-hour format:");
    assert_output_contains(&stdout, "12-hour format:");
    assert_eq!(stdout.matches("IST   : ").count(), 2);
    assert_eq!(stdout.matches("UTC   : ").count(), 2);
    assert!(!stdout.contains('\x1b'), "plain output expected when not a terminal");
}

#[test]
fn test_cli_unknown_command_fails() {
    let (_stdout, stderr, exit_code) = run_cli_command(&["weather"]);

    assert_ne!(exit_code, 0);
    assert_output_contains(&stderr, "unrecognized subcommand");
}

#[test]
fn test_cli_bad_config_exits_with_error() {
    let config = write_config(r#"{ "refresh_interval_ms": 0 }"#);
    let path = config.path().to_str().unwrap();

    let (stdout, stderr, exit_code) = run_cli_command(&["now", "--config", path]);

    assert_eq!(exit_code, 1);
    assert!(stdout.is_empty());
    assert_output_contains(&stderr, "Configuration error");
    assert_output_contains(&stderr, "refresh_interval_ms");
}

/// Config pointing the trace endpoint at a port nothing listens on
fn closed_port_config() -> tempfile::NamedTempFile {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    write_config(&format!(r#"{{ "trace_url": "http://{}/cdn-cgi/trace" }}"#, addr))
}

fn run_ip_command(extra: &[&str], config: &tempfile::NamedTempFile) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_kc"))
        .args(["ip", "--config", config.path().to_str().unwrap()])
        .args(extra)
        .env("NO_COLOR", "1")
        .env("NO_PROXY", "127.0.0.1")
        .env("no_proxy", "127.0.0.1")
        .output()
        .expect("Failed to execute CLI command")
}

#[test]
fn test_cli_ip_reports_fetch_failure_as_single_line() {
    let config = closed_port_config();

    let output = run_ip_command(&[], &config);

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout, "error fetching ip address.\n");
    assert!(stderr.is_empty(), "unexpected diagnostics on stderr:\n{}", stderr);
}

#[test]
fn test_cli_ip_verbose_explains_fetch_failure() {
    let config = closed_port_config();

    let output = run_ip_command(&["--verbose"], &config);

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stdout, "error fetching ip address.\n");
    assert_output_contains(&stderr, "Info: Using trace endpoint");
    assert_output_contains(&stderr, "trace lookup failed");
}
