//! Setup command: the full provisioning pipeline.

use std::sync::Arc;

use anyhow::{Context as _, Result};

use hos_core::layout::try_default_root;
use hos_core::{Reporter, SdkLayout};
use hos_schema::Platform;

use crate::SetupArgs;
use crate::ops::emit::RunnerSink;
use crate::ops::flow::SetupRequest;
use crate::ops::{Context, tools};
use crate::ui::ConsoleReporter;

/// Run the provisioning pipeline end to end.
///
/// Stages run strictly in sequence; the first failure aborts the run and
/// leaves the filesystem as the failing stage found it.
pub async fn setup(args: SetupArgs, dry_run: bool, quiet: bool) -> Result<()> {
    let reporter: Arc<dyn Reporter> = Arc::new(ConsoleReporter::new(quiet));
    let client = reqwest::Client::new();
    let ctx = Context::new(client, reporter, dry_run);

    let root = args
        .root
        .or_else(try_default_root)
        .context("Could not determine home directory. Set HOS_SDK_ROOT to override.")?;
    let layout = SdkLayout::new(root);

    let raw_platform = args
        .platform
        .unwrap_or_else(|| Platform::current_raw().to_string());

    let request = SetupRequest {
        raw_platform,
        repo: args.repo,
        api_base: args.api_base,
        layout,
    };

    // Resolve fails before any network call for unsupported runners.
    let resolved = request.resolve()?;
    let located = resolved.locate(&ctx).await?;

    if ctx.dry_run {
        ctx.reporter.section("Plan (dry run)");
        ctx.reporter
            .info(&format!("release: {}", located.tag));
        ctx.reporter
            .info(&format!("base bundle: {}", located.base.name));
        ctx.reporter
            .info(&format!("extension bundle: {}", located.extension.name));
        ctx.reporter
            .info(&format!("sdk home: {}", located.layout.home().display()));
        return Ok(());
    }

    let extracted = located.fetch(&ctx).await?;
    let provisioned = extracted.normalize(&ctx.reporter)?.configure();

    RunnerSink::from_env().emit(&provisioned.state, &ctx.reporter)?;

    if args.skip_tool_config {
        ctx.reporter
            .info("skipping external tool configuration (--skip-tool-config)");
    } else {
        tools::run(&ctx, &provisioned.layout, &provisioned.state).await?;
    }

    ctx.reporter.done(
        "hos-setup",
        &format!(
            "SDK provisioned at {} (api {})",
            provisioned.layout.home().display(),
            provisioned.api_version
        ),
    );

    Ok(())
}
