use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{anyhow, bail, ensure, Context, Result};
use tracing::{debug, info, warn};

use crate::config::InstallerConfig;

/// Exit codes shells use for "command not found" (sh, cmd.exe).
const NOT_FOUND_CODES: &[i32] = &[127, 9009];

/// One stage of the installer build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildStep<'a> {
    pub label: &'a str,
    pub command: &'a str,
}

pub fn steps(config: &InstallerConfig) -> [BuildStep<'_>; 2] {
    [
        BuildStep {
            label: "Compiling desktop app",
            command: &config.build_command,
        },
        BuildStep {
            label: "Building Windows installer",
            command: &config.package_command,
        },
    ]
}

/// Run every build step in order inside the project directory. Stops at
/// the first failure. Returns the release directory.
pub fn run_pipeline(config: &InstallerConfig) -> Result<PathBuf> {
    let project = &config.project_dir;
    ensure!(
        project.is_dir(),
        "Project directory {} not found",
        project.display()
    );

    let steps = steps(config);
    let total = steps.len();
    for (i, step) in steps.iter().enumerate() {
        println!("\n[{}/{}] {}...", i + 1, total, step.label);
        if i + 1 == total {
            println!("(this can take 3-5 minutes)\n");
        }
        run_command(step.command, project).with_context(|| format!("{} failed", step.label))?;
    }

    info!("Installer build finished");
    Ok(config.release_dir.clone())
}

/// Run `command` through the platform shell with inherited stdio.
pub fn run_command(command: &str, cwd: &Path) -> Result<()> {
    debug!("Running `{}` in {}", command, cwd.display());
    let status = shell(command)
        .current_dir(cwd)
        .status()
        .map_err(|e| {
            anyhow!(
                "Could not start `{}`: {}. Install it and make sure it is on PATH, then run again.",
                command,
                e
            )
        })?;

    if status.success() {
        return Ok(());
    }
    if let Some(code) = status.code().filter(|c| NOT_FOUND_CODES.contains(c)) {
        let program = command.split_whitespace().next().unwrap_or(command);
        bail!(
            "`{}` not found (exit code {}). Install it and make sure it is on PATH, then run again.",
            program,
            code
        );
    }
    bail!("Command `{}` failed: {}", command, status)
}

#[cfg(windows)]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", command]);
    cmd
}

#[cfg(not(windows))]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.args(["-c", command]);
    cmd
}

/// Show the release directory in the system file manager, if it exists.
pub fn reveal(release_dir: &Path) {
    if !release_dir.is_dir() {
        debug!("Release directory {} does not exist", release_dir.display());
        return;
    }
    if let Err(e) = open::that(release_dir) {
        warn!("Failed to open {}: {}", release_dir.display(), e);
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn config_in(dir: &Path) -> InstallerConfig {
        InstallerConfig {
            product_name: "Test App".into(),
            project_dir: dir.to_path_buf(),
            build_command: "echo compiled > build.log".into(),
            package_command: "mkdir -p release && touch release/setup.exe".into(),
            release_dir: dir.join("release"),
            open_release_dir: false,
        }
    }

    #[test]
    fn test_run_command_status() {
        let dir = tempfile::tempdir().unwrap();
        assert!(run_command("true", dir.path()).is_ok());

        let err = run_command("exit 3", dir.path()).unwrap_err();
        assert!(err.to_string().contains("exit 3"));
    }

    #[test]
    fn test_missing_tool_is_named() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_command("iconsmith-no-such-tool --win", dir.path()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("iconsmith-no-such-tool"), "{}", msg);
        assert!(msg.contains("not found"), "{}", msg);
    }

    #[test]
    fn test_spawn_failure_says_how_to_fix() {
        let dir = tempfile::tempdir().unwrap();
        // A vanished working directory makes the spawn itself fail.
        let err = run_command("npm run build", &dir.path().join("gone")).unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("Could not start `npm run build`"), "{}", msg);
        assert!(msg.contains("Install it and make sure it is on PATH"), "{}", msg);
    }

    #[test]
    fn test_pipeline_runs_steps_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        let release = run_pipeline(&config).unwrap();

        assert_eq!(release, dir.path().join("release"));
        assert!(dir.path().join("build.log").is_file());
        assert!(release.join("setup.exe").is_file());
    }

    #[test]
    fn test_pipeline_stops_at_first_failure() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.build_command = "false".into();

        let err = run_pipeline(&config).unwrap_err();

        assert!(format!("{:#}", err).contains("Compiling desktop app failed"));
        assert!(!dir.path().join("release").exists());
    }

    #[test]
    fn test_missing_project_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir.path().join("desktop"));
        let err = run_pipeline(&config).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_steps_follow_config() {
        let config = InstallerConfig::default();
        let steps = steps(&config);
        assert_eq!(steps[0].command, "npm run build");
        assert!(steps[1].command.starts_with("npx electron-builder --win"));
    }

    #[test]
    fn test_reveal_ignores_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        reveal(&dir.path().join("release"));
    }
}
