use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Isolated session file inside a test directory.
pub fn session_file(dir: &Path) -> PathBuf {
    dir.join("session.json")
}

/// Run the CLI against the demo backend with its own session file.
pub fn run_cli(args: &[&str], dir: &Path) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_armory"));
    cmd.args(args);
    cmd.env("ARMORY_SESSION_FILE", session_file(dir));
    cmd.env("ARMORY_BACKEND", "demo");
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("RUST_LOG");
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI and expect success.
pub fn run_cli_success(args: &[&str], dir: &Path) -> String {
    let output = run_cli(args, dir);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Run the CLI and expect failure.
pub fn run_cli_failure(args: &[&str], dir: &Path) -> String {
    let output = run_cli(args, dir);
    if output.status.success() {
        panic!("CLI command should have failed: {:?}", args);
    }
    String::from_utf8_lossy(&output.stderr).to_string()
}
