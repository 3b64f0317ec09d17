//! Provisioning state accumulated across pipeline stages.
//!
//! The pipeline never touches the process environment directly. Each
//! stage records what it wants exported into a [`ProvisioningState`],
//! which is applied at the boundary by the runner emission adapter (and
//! as an env overlay on external tool invocations). State grows
//! monotonically: values are set, never rolled back.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Environment variables, PATH entries, and pipeline outputs produced by
/// a provisioning run.
///
/// Maps are ordered so emission is deterministic. Setting the same name
/// twice overwrites (the sink has overwrite-safe semantics per variable);
/// PATH entries are additive and de-duplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProvisioningState {
    outputs: BTreeMap<String, String>,
    env: BTreeMap<String, String>,
    path: Vec<PathBuf>,
}

impl ProvisioningState {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pipeline output value.
    pub fn set_output(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.outputs.insert(name.into(), value.into());
    }

    /// Record an exported environment variable.
    pub fn set_env(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.env.insert(name.into(), value.into());
    }

    /// Record a PATH prefix entry. Duplicate entries collapse to the
    /// first occurrence.
    pub fn add_path(&mut self, entry: impl Into<PathBuf>) {
        let entry = entry.into();
        if !self.path.contains(&entry) {
            self.path.push(entry);
        }
    }

    /// Recorded outputs, in name order.
    pub fn outputs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.outputs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Recorded environment variables, in name order.
    pub fn env(&self) -> impl Iterator<Item = (&str, &str)> {
        self.env.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Recorded PATH entries, in insertion order.
    pub fn path_entries(&self) -> &[PathBuf] {
        &self.path
    }

    /// Look up a recorded environment variable.
    pub fn env_var(&self, name: &str) -> Option<&str> {
        self.env.get(name).map(String::as_str)
    }

    /// Look up a recorded output.
    pub fn output(&self, name: &str) -> Option<&str> {
        self.outputs.get(name).map(String::as_str)
    }

    /// True when nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty() && self.env.is_empty() && self.path.is_empty()
    }

    /// The PATH value child processes should see: recorded entries
    /// prefixed onto `current`, joined with the platform separator.
    pub fn overlay_path(&self, current: Option<&str>) -> String {
        let sep = if cfg!(windows) { ';' } else { ':' };
        let mut parts: Vec<String> = self
            .path
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect();
        if let Some(current) = current {
            if !current.is_empty() {
                parts.push(current.to_string());
            }
        }
        parts.join(&sep.to_string())
    }
}

/// Convenience for recording a path-valued environment variable.
pub fn path_value(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
