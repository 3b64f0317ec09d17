//! Environment configuration.
//!
//! Derives everything the run exports -- the `sdk-path` output, the SDK
//! home variables, and the PATH prefix entries -- from the normalized
//! layout. Pure function of `(layout, api_version)`; emission order does
//! not matter because the state sink overwrites per variable name and
//! PATH entries are additive.

use hos_core::provision::path_value;
use hos_core::{ProvisioningState, SdkLayout};

/// Name of the published output carrying the SDK home path.
pub const OUTPUT_SDK_PATH: &str = "sdk-path";

/// Derive the provisioning state for a normalized layout.
pub fn derive_state(layout: &SdkLayout, api_version: &str) -> ProvisioningState {
    let mut state = ProvisioningState::new();

    state.set_output(OUTPUT_SDK_PATH, path_value(&layout.home()));

    state.set_env("HOS_SDK_HOME", path_value(&layout.home()));
    state.set_env("OHOS_SDK_HOME", path_value(&layout.ohos_sdk()));
    state.set_env("ARKUI_X_HOME", path_value(&layout.arkui_root()));
    state.set_env("NODE_HOME", path_value(&layout.node_home()));

    state.add_path(layout.bin());
    state.add_path(layout.node_bin());
    state.add_path(layout.ohpm_bin());
    state.add_path(layout.arkui_toolchains_bin(api_version));

    state
}
