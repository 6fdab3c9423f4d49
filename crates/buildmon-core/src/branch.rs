//! Branch snapshots.

use serde::{Deserialize, Serialize};

use crate::Build;

/// A commit at the tip of a branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub sha: String,
}

/// A source-control branch known to the build service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    /// Unique within an application.
    pub name: String,
    pub commit: Commit,
}

/// A branch plus whether CI builds are enabled for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchConfiguration {
    pub branch: Branch,
    #[serde(default)]
    pub configured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_build: Option<Build>,
}

impl BranchConfiguration {
    pub fn name(&self) -> &str {
        &self.branch.name
    }

    /// Revision currently at the tip of the branch.
    pub fn tip(&self) -> &str {
        &self.branch.commit.sha
    }
}
