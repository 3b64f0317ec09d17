//! Shared types for the HarmonyOS SDK provisioning pipeline.
//!
//! This crate is the pure data model: platform keys, release metadata as
//! returned by the metadata API, and the asset selection predicate. It
//! performs no I/O; everything here is deterministic and unit-testable
//! without a network or filesystem.

pub mod platform;
pub mod release;

// Re-exports
pub use platform::{Platform, PlatformError};
pub use release::{AssetSelector, Bundle, LocateError, Release, ReleaseAsset, locate};
