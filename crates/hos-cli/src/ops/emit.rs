//! Runner emission boundary.
//!
//! The pipeline accumulates exports in a `ProvisioningState`; this
//! adapter is the only place that state touches the outside world. On a
//! GitHub-style runner it appends to the files named by `GITHUB_ENV`,
//! `GITHUB_PATH`, and `GITHUB_OUTPUT`; sibling steps in the same job
//! pick the values up from there. When a file variable is unset (local
//! runs), the assignment is logged instead so nothing is silently
//! dropped.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use hos_core::{ProvisioningState, Reporter};

/// Destination files for provisioning state, as the runner names them.
#[derive(Debug, Clone, Default)]
pub struct RunnerSink {
    env_file: Option<PathBuf>,
    path_file: Option<PathBuf>,
    output_file: Option<PathBuf>,
}

impl RunnerSink {
    /// Build a sink from explicit file paths (tests, custom runners).
    pub fn new(
        env_file: Option<PathBuf>,
        path_file: Option<PathBuf>,
        output_file: Option<PathBuf>,
    ) -> Self {
        Self {
            env_file,
            path_file,
            output_file,
        }
    }

    /// Build a sink from the runner's `GITHUB_ENV` / `GITHUB_PATH` /
    /// `GITHUB_OUTPUT` variables.
    pub fn from_env() -> Self {
        let file_var = |name: &str| std::env::var_os(name).map(PathBuf::from);
        Self {
            env_file: file_var("GITHUB_ENV"),
            path_file: file_var("GITHUB_PATH"),
            output_file: file_var("GITHUB_OUTPUT"),
        }
    }

    /// Apply a provisioning state to the runner.
    ///
    /// Appends `NAME=VALUE` lines for env vars and outputs, one path per
    /// line for PATH entries. Appending (not truncating) matters: other
    /// steps share the same files.
    ///
    /// # Errors
    ///
    /// Fails on the first file that cannot be appended to.
    pub fn emit<R: Reporter>(
        &self,
        state: &ProvisioningState,
        reporter: &R,
    ) -> std::io::Result<()> {
        let env_lines: Vec<String> = state.env().map(|(k, v)| format!("{k}={v}")).collect();
        write_or_log(self.env_file.as_deref(), &env_lines, "export", reporter)?;

        let path_lines: Vec<String> = state
            .path_entries()
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect();
        write_or_log(self.path_file.as_deref(), &path_lines, "path", reporter)?;

        let output_lines: Vec<String> = state.outputs().map(|(k, v)| format!("{k}={v}")).collect();
        write_or_log(self.output_file.as_deref(), &output_lines, "output", reporter)?;

        Ok(())
    }
}

fn write_or_log<R: Reporter>(
    file: Option<&Path>,
    lines: &[String],
    kind: &str,
    reporter: &R,
) -> std::io::Result<()> {
    if lines.is_empty() {
        return Ok(());
    }

    match file {
        Some(path) => append_lines(path, lines),
        None => {
            for line in lines {
                reporter.info(&format!("{kind}: {line}"));
            }
            Ok(())
        }
    }
}

fn append_lines(path: &Path, lines: &[String]) -> std::io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    for line in lines {
        writeln!(file, "{line}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hos_core::NullReporter;

    fn sample_state() -> ProvisioningState {
        let mut state = ProvisioningState::new();
        state.set_output("sdk-path", "/opt/hos/command-line-tools");
        state.set_env("HOS_SDK_HOME", "/opt/hos/command-line-tools");
        state.set_env("NODE_HOME", "/opt/hos/command-line-tools/tool/node");
        state.add_path("/opt/hos/command-line-tools/bin");
        state
    }

    #[test]
    fn test_emit_writes_documented_line_formats() {
        let dir = tempfile::tempdir().unwrap();
        let env_file = dir.path().join("env");
        let path_file = dir.path().join("path");
        let output_file = dir.path().join("output");

        let sink = RunnerSink::new(
            Some(env_file.clone()),
            Some(path_file.clone()),
            Some(output_file.clone()),
        );
        sink.emit(&sample_state(), &NullReporter).unwrap();

        assert_eq!(
            std::fs::read_to_string(&env_file).unwrap(),
            "HOS_SDK_HOME=/opt/hos/command-line-tools\n\
             NODE_HOME=/opt/hos/command-line-tools/tool/node\n"
        );
        assert_eq!(
            std::fs::read_to_string(&path_file).unwrap(),
            "/opt/hos/command-line-tools/bin\n"
        );
        assert_eq!(
            std::fs::read_to_string(&output_file).unwrap(),
            "sdk-path=/opt/hos/command-line-tools\n"
        );
    }

    #[test]
    fn test_emit_appends_to_existing_runner_files() {
        let dir = tempfile::tempdir().unwrap();
        let env_file = dir.path().join("env");
        std::fs::write(&env_file, "PRIOR_STEP=1\n").unwrap();

        let sink = RunnerSink::new(Some(env_file.clone()), None, None);
        sink.emit(&sample_state(), &NullReporter).unwrap();

        let content = std::fs::read_to_string(&env_file).unwrap();
        assert!(content.starts_with("PRIOR_STEP=1\n"));
        assert!(content.contains("HOS_SDK_HOME="));
    }

    #[test]
    fn test_empty_state_touches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let env_file = dir.path().join("env");

        let sink = RunnerSink::new(Some(env_file.clone()), None, None);
        sink.emit(&ProvisioningState::new(), &NullReporter).unwrap();

        assert!(!env_file.exists());
    }

    #[test]
    fn test_missing_files_fall_back_to_logging() {
        let sink = RunnerSink::new(None, None, None);
        sink.emit(&sample_state(), &NullReporter).unwrap();
    }
}
