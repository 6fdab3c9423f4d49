//! Build service trait.
//!
//! The launcher and the poller only talk to the build service through this
//! trait, scoped to one application.

use async_trait::async_trait;

use crate::{BranchConfiguration, Build, BuildId, Result};

/// Remote operations against one application on the build service.
///
/// Implementations do not retry; every failure is returned to the caller as is.
#[async_trait]
pub trait BuildService: Send + Sync {
    /// Fetch a fresh snapshot of a build.
    async fn fetch_build(&self, id: BuildId) -> Result<Build>;

    /// Fetch all branches with their configuration flags.
    ///
    /// An empty or absent list yields an empty vector.
    async fn fetch_branches(&self) -> Result<Vec<BranchConfiguration>>;

    /// Start a build of `branch` at `source_version`.
    async fn create_build(&self, branch: &str, source_version: &str) -> Result<Build>;
}
