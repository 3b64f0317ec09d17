//! Shared pipeline context.
//!
//! Groups the state references threaded through every stage to reduce
//! argument fatigue.

use std::fmt;
use std::sync::Arc;

use hos_core::Reporter;

/// Groups common state used during a provisioning run.
#[derive(Clone)]
pub struct Context {
    /// HTTP client shared by metadata fetch and downloads.
    pub client: reqwest::Client,
    /// Progress sink.
    pub reporter: Arc<dyn Reporter>,
    /// When set, no filesystem or process mutation happens.
    pub dry_run: bool,
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("dry_run", &self.dry_run)
            .finish_non_exhaustive()
    }
}

impl Context {
    /// Create a context.
    pub fn new(client: reqwest::Client, reporter: Arc<dyn Reporter>, dry_run: bool) -> Self {
        Self {
            client,
            reporter,
            dry_run,
        }
    }
}
