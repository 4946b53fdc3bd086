//! CLI tests for the ansible-navigator binary.
//!
//! Spawns the binary with a scrubbed environment and verifies the exit code,
//! the reported problems, and the resolved configuration it prints.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use navigator::exit_codes;
use tempfile::TempDir;

struct Sandbox {
    temp: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let temp = tempfile::tempdir().expect("tempdir");
        for dir in ["bin", "home", "work"] {
            fs::create_dir_all(temp.path().join(dir)).expect("create sandbox dir");
        }
        Self { temp }
    }

    fn path(&self, relative: &str) -> PathBuf {
        self.temp.path().join(relative)
    }

    /// Place an executable stub on the sandbox `PATH`. It is looked up, never run.
    #[cfg(unix)]
    fn install(&self, program: &str) {
        use std::os::unix::fs::PermissionsExt;

        let path = self.path("bin").join(program);
        fs::write(&path, "#!/bin/sh\nexit 0\n").expect("write stub");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("chmod stub");
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_ansible-navigator"));
        cmd.env_clear()
            .env("PATH", self.path("bin"))
            .env("HOME", self.path("home"))
            .current_dir(self.path("work"));
        cmd
    }

    fn run(&self, args: &[&str]) -> Output {
        self.command().args(args).output().expect("spawn ansible-navigator")
    }
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn resolved_value<'a>(report: &'a serde_json::Value, name: &str) -> &'a serde_json::Value {
    report
        .as_array()
        .expect("report is a list")
        .iter()
        .find(|item| item["name"] == name)
        .unwrap_or_else(|| panic!("{name} missing from report"))
}

#[test]
fn run_without_playbook_reports_every_problem() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["run"]);

    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
    let stderr = stderr(&output);
    assert!(
        stderr.contains("[ERROR]: A playbook is required when using the run subcommand"),
        "{stderr}"
    );
    assert!(stderr.contains("[HINT]: Try again with 'run <playbook name>'"), "{stderr}");
    assert!(
        stderr.contains("The specified container engine could not be found: 'podman'"),
        "{stderr}"
    );
}

#[cfg(unix)]
#[test]
fn valid_configuration_is_printed_as_json() {
    let sandbox = Sandbox::new();
    sandbox.install("podman");
    let log_file = sandbox.path("logs").join("navigator.log");
    let log_arg = log_file.to_string_lossy().into_owned();

    let output = sandbox.run(&["config", "-m", "stdout", "--lf", &log_arg, "--osc4", "no"]);

    assert_eq!(output.status.code(), Some(exit_codes::OK), "{}", stderr(&output));
    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is json");
    let mode = resolved_value(&report, "mode");
    assert_eq!(mode["value"], "stdout");
    assert_eq!(mode["source"], "user_cli");
    assert_eq!(resolved_value(&report, "osc4")["value"], false);
    assert_eq!(resolved_value(&report, "app")["value"], "config");
    assert_eq!(resolved_value(&report, "playbook")["value"], serde_json::Value::Null);
    assert!(log_file.is_file());
}

#[cfg(unix)]
#[test]
fn settings_file_values_are_post_processed() {
    let sandbox = Sandbox::new();
    sandbox.install("podman");
    fs::write(
        sandbox.path("work").join("ansible-navigator.toml"),
        "[ansible-navigator]\nmode = \"stdout\"\nexecution_environment = \"maybe\"\n",
    )
    .expect("write settings");

    let output = sandbox.run(&["config"]);

    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
    let stderr = stderr(&output);
    assert!(
        stderr.contains(
            "execution_environment could not be converted to a boolean value, value was 'maybe' (string)"
        ),
        "{stderr}"
    );
}

#[cfg(unix)]
#[test]
fn environment_mode_is_checked_against_subcommand() {
    let sandbox = Sandbox::new();
    sandbox.install("podman");
    let output = sandbox
        .command()
        .env("ANSIBLE_NAVIGATOR_MODE", "interactive")
        .arg("ee-details")
        .output()
        .expect("spawn ansible-navigator");

    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
    let stderr = stderr(&output);
    assert!(
        stderr.contains(
            "Subcommand 'ee-details' does not support mode 'interactive'. Supported modes: 'stdout'."
        ),
        "{stderr}"
    );
    assert!(stderr.contains("[HINT]: Try again with '-m stdout'"), "{stderr}");
}

#[test]
fn off_schema_settings_file_is_an_error() {
    let sandbox = Sandbox::new();
    let settings = sandbox.path("custom.toml");
    fs::write(&settings, "[ansible-navigator]\nnot_an_entry = true\n").expect("write settings");

    let output = sandbox.run(&["--settings", path_arg(&settings).as_str(), "welcome"]);

    assert_eq!(output.status.code(), Some(exit_codes::ERROR));
    assert!(stderr(&output).contains("schema validation failed"));
}

#[test]
fn missing_settings_file_is_an_error() {
    let sandbox = Sandbox::new();
    let output = sandbox
        .command()
        .env("ANSIBLE_NAVIGATOR_CONFIG", sandbox.path("nope.toml"))
        .arg("welcome")
        .output()
        .expect("spawn ansible-navigator");

    assert_eq!(output.status.code(), Some(exit_codes::ERROR));
    assert!(stderr(&output).contains("does not exist"));
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
