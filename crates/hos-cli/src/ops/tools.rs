//! External tool configuration.
//!
//! Runs the fixed, ordered command sequence that points the surrounding
//! toolchain at the provisioned SDK: npm registries, ohpm registry and
//! SSL strictness, the ArkUI-X CLI install, its configuration, and the
//! final environment check. Every invocation is synchronous from the
//! pipeline's perspective; the first non-zero exit aborts the run.
//!
//! The command *plan* is computed separately from execution so tests can
//! assert the exact sequence without shelling out.

use std::path::{Path, PathBuf};

use hos_core::{ProvisioningState, SdkLayout};

use crate::ops::{Context, ProvisionError};

/// Default npm registry (Huawei mirror; the public registry throttles
/// the SDK's transitive downloads from CI).
pub const NPM_REGISTRY: &str = "https://repo.huaweicloud.com/repository/npm/";

/// Scoped registry for `@ohos` packages.
pub const OHOS_NPM_REGISTRY: &str = "https://repo.harmonyos.com/npm/";

/// ohpm registry.
pub const OHPM_REGISTRY: &str = "https://ohpm.openharmony.cn/ohpm/";

/// One planned external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    /// Program to run; absolute when the layout provides it, bare name
    /// (resolved via the overlaid PATH) otherwise.
    pub program: PathBuf,
    /// Arguments, in order.
    pub args: Vec<String>,
}

impl ToolInvocation {
    fn new(program: impl Into<PathBuf>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

impl std::fmt::Display for ToolInvocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Prefer a binary bundled in `dir` over the same name from PATH.
fn resolve_bundled(dir: &Path, name: &str) -> PathBuf {
    let candidate = dir.join(name);
    if candidate.exists() {
        candidate
    } else {
        PathBuf::from(name)
    }
}

/// The fixed command sequence for a provisioned layout.
pub fn command_plan(layout: &SdkLayout) -> Vec<ToolInvocation> {
    let npm = resolve_bundled(&layout.node_bin(), "npm");
    let ace = resolve_bundled(&layout.node_bin(), "ace");
    let ohpm = layout.ohpm_exe();

    let arkui = layout.arkui_root();
    let ohos = layout.ohos_sdk();
    let home = layout.home();
    let node = layout.node_home();
    let ohpm_home = layout.ohpm_home();

    vec![
        ToolInvocation::new(&npm, &["config", "set", "registry", NPM_REGISTRY]),
        ToolInvocation::new(
            &npm,
            &["config", "set", "@ohos:registry", OHOS_NPM_REGISTRY],
        ),
        ToolInvocation::new(&ohpm, &["config", "set", "registry", OHPM_REGISTRY]),
        ToolInvocation::new(&ohpm, &["config", "set", "strict_ssl", "false"]),
        ToolInvocation::new(&npm, &["install", "-g", "@arkui-x/cli"]),
        ToolInvocation::new(
            &ace,
            &[
                "config",
                "--arkui-x-sdk",
                &arkui.to_string_lossy(),
                "--ohos-sdk",
                &ohos.to_string_lossy(),
                "--harmonyos-sdk",
                &home.to_string_lossy(),
                "--nodejs-dir",
                &node.to_string_lossy(),
                "--ohpm-dir",
                &ohpm_home.to_string_lossy(),
            ],
        ),
        ToolInvocation::new(&ace, &["check"]),
    ]
}

/// Run the full configuration sequence for a provisioned layout.
///
/// # Errors
///
/// [`ProvisionError::ToolMissing`] when a command cannot be resolved,
/// [`ProvisionError::NonZeroExit`] when one exits unsuccessfully.
pub async fn run(
    ctx: &Context,
    layout: &SdkLayout,
    state: &ProvisioningState,
) -> Result<(), ProvisionError> {
    run_plan(ctx, &command_plan(layout), state).await
}

/// Run an explicit command plan with the provisioning state's env
/// overlay applied to each child process.
pub async fn run_plan(
    ctx: &Context,
    plan: &[ToolInvocation],
    state: &ProvisioningState,
) -> Result<(), ProvisionError> {
    ctx.reporter.section("Configuring tools");

    let path_overlay = state.overlay_path(std::env::var("PATH").ok().as_deref());

    for invocation in plan {
        ensure_available(invocation, &path_overlay)?;
        ctx.reporter.info(&format!("running {invocation}"));

        let status = tokio::process::Command::new(&invocation.program)
            .args(&invocation.args)
            .envs(state.env())
            .env("PATH", &path_overlay)
            .status()
            .await?;

        if !status.success() {
            return Err(ProvisionError::NonZeroExit {
                command: invocation.to_string(),
                status,
            });
        }
    }

    Ok(())
}

/// Fail with a named diagnostic instead of an opaque spawn error when a
/// command is not there. Checked per invocation, right before running,
/// because earlier plan entries install later ones (`ace` arrives via
/// `npm install -g`).
fn ensure_available(
    invocation: &ToolInvocation,
    path_overlay: &str,
) -> Result<(), ProvisionError> {
    let missing = || ProvisionError::ToolMissing(invocation.program.display().to_string());

    if invocation.program.is_absolute() {
        if !invocation.program.exists() {
            return Err(missing());
        }
        return Ok(());
    }

    let cwd = std::env::current_dir()?;
    which::which_in(&invocation.program, Some(path_overlay), cwd)
        .map(|_| ())
        .map_err(|_| missing())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::ConsoleReporter;
    use std::sync::Arc;

    fn ctx() -> Context {
        Context::new(
            reqwest::Client::new(),
            Arc::new(ConsoleReporter::new(true)),
            false,
        )
    }

    #[test]
    fn test_plan_sequence_and_order() {
        let layout = SdkLayout::new("/opt/hos");
        let plan = command_plan(&layout);

        assert_eq!(plan.len(), 7);
        // Registry configuration first, then the dependency install,
        // then ace config, then the final check.
        assert_eq!(plan[0].args[..3], ["config", "set", "registry"]);
        assert_eq!(plan[1].args[2], "@ohos:registry");
        assert_eq!(plan[2].program, layout.ohpm_exe());
        assert_eq!(plan[3].args[..], ["config", "set", "strict_ssl", "false"]);
        assert_eq!(plan[4].args[..], ["install", "-g", "@arkui-x/cli"]);
        assert_eq!(plan[5].args[0], "config");
        assert_eq!(plan[6].args[..], ["check"]);
    }

    #[test]
    fn test_ace_config_takes_five_named_paths() {
        let layout = SdkLayout::new("/opt/hos");
        let plan = command_plan(&layout);
        let ace_config = &plan[5];

        let flags: Vec<&str> = ace_config
            .args
            .iter()
            .filter(|a| a.starts_with("--"))
            .map(String::as_str)
            .collect();
        assert_eq!(
            flags,
            [
                "--arkui-x-sdk",
                "--ohos-sdk",
                "--harmonyos-sdk",
                "--nodejs-dir",
                "--ohpm-dir",
            ]
        );
        // Flag plus value for each.
        assert_eq!(ace_config.args.len(), 1 + flags.len() * 2);
        assert_eq!(ace_config.args[2], "/opt/hos/command-line-tools/arkui-x-sdk");
    }

    #[test]
    fn test_unbundled_tools_fall_back_to_path_names() {
        // Nothing exists under this root, so npm/ace stay bare names
        // while ohpm is always addressed inside the layout.
        let layout = SdkLayout::new("/nonexistent/hos");
        let plan = command_plan(&layout);

        assert_eq!(plan[0].program, PathBuf::from("npm"));
        assert_eq!(plan[6].program, PathBuf::from("ace"));
        assert!(plan[2].program.is_absolute());
    }

    #[tokio::test]
    async fn test_non_zero_exit_aborts_with_command_context() {
        let plan = vec![ToolInvocation::new("sh", &["-c", "exit 3"])];
        let state = ProvisioningState::new();

        let err = run_plan(&ctx(), &plan, &state).await.unwrap_err();
        match err {
            ProvisionError::NonZeroExit { command, status } => {
                assert!(command.starts_with("sh"));
                assert_eq!(status.code(), Some(3));
            }
            other => panic!("expected NonZeroExit, got {other}"),
        }
    }

    #[tokio::test]
    async fn test_missing_absolute_tool_is_a_named_failure() {
        let plan = vec![ToolInvocation::new("/nonexistent/hos/ohpm", &["config"])];
        let state = ProvisioningState::new();

        let err = run_plan(&ctx(), &plan, &state).await.unwrap_err();
        assert!(matches!(err, ProvisionError::ToolMissing(p) if p.contains("ohpm")));
    }

    #[tokio::test]
    async fn test_first_failure_stops_the_sequence() {
        let dir = tempfile::tempdir().unwrap();
        let witness = dir.path().join("ran");
        let touch = format!("touch {}", witness.display());

        let plan = vec![
            ToolInvocation::new("sh", &["-c", "exit 1"]),
            ToolInvocation::new("sh", &["-c", touch.as_str()]),
        ];
        let state = ProvisioningState::new();

        assert!(run_plan(&ctx(), &plan, &state).await.is_err());
        assert!(!witness.exists(), "second command must not run");
    }
}
