//! Layout command: print the derived SDK layout.

use std::path::PathBuf;

use anyhow::{Context as _, Result};

use hos_core::SdkLayout;
use hos_core::layout::try_default_root;

/// Print every derived path for a root (and optionally a version).
///
/// Layout derivation is pure, so the output is stable across runs and
/// safe for sibling jobs to parse.
pub fn layout(root: Option<PathBuf>, version: Option<&str>) -> Result<()> {
    let root = root
        .or_else(try_default_root)
        .context("Could not determine home directory. Set HOS_SDK_ROOT to override.")?;
    let layout = SdkLayout::new(root);

    println!("root           {}", layout.root().display());
    println!("home           {}", layout.home().display());
    println!("bin            {}", layout.bin().display());
    println!("node-home      {}", layout.node_home().display());
    println!("node-bin       {}", layout.node_bin().display());
    println!("ohpm-bin       {}", layout.ohpm_bin().display());
    println!("ohos-sdk       {}", layout.ohos_sdk().display());
    println!("ohos-licenses  {}", layout.ohos_license_marker().display());
    println!("arkui-root     {}", layout.arkui_root().display());
    println!("arkui-licenses {}", layout.arkui_license_marker().display());
    println!("sdk-mirror     {}", layout.sdk_mirror().display());
    println!("previewer      {}", layout.previewer_stub().display());

    if let Some(version) = version {
        println!("arkui-sdk      {}", layout.arkui_versioned(version).display());
        println!(
            "arkui-bin      {}",
            layout.arkui_toolchains_bin(version).display()
        );
    }

    Ok(())
}
