//! Build launcher - picks target branches and starts one build per branch.

use buildmon_core::{BranchConfiguration, Build, BuildService, Error, Result};
use futures::future::try_join_all;
use std::sync::Arc;
use tracing::info;

/// Which branches get a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BranchSelection {
    /// Every branch the service knows about.
    All,
    /// Only branches with CI enabled.
    #[default]
    Configured,
}

/// Apply a selection policy to a fetched branch list.
///
/// `Configured` fails with `NoBranches` on an empty list and with
/// `NoConfiguredBranches` when no branch has CI enabled. `All` never fails.
pub fn select_branches(
    app_name: &str,
    branches: Vec<BranchConfiguration>,
    selection: BranchSelection,
) -> Result<Vec<BranchConfiguration>> {
    match selection {
        BranchSelection::All => Ok(branches),
        BranchSelection::Configured => {
            if branches.is_empty() {
                return Err(Error::NoBranches(app_name.to_string()));
            }
            let configured: Vec<_> = branches.into_iter().filter(|b| b.configured).collect();
            if configured.is_empty() {
                return Err(Error::NoConfiguredBranches(app_name.to_string()));
            }
            Ok(configured)
        }
    }
}

/// Starts builds on an application's branches.
pub struct BuildLauncher {
    service: Arc<dyn BuildService>,
    app_name: String,
}

impl BuildLauncher {
    pub fn new(service: Arc<dyn BuildService>, app_name: impl Into<String>) -> Self {
        Self {
            service,
            app_name: app_name.into(),
        }
    }

    /// Start one build per selected branch at its tip commit.
    ///
    /// All create requests are in flight at once. The first failure aborts the
    /// whole batch and is returned; builds already created by sibling requests
    /// are not reported.
    pub async fn start(&self, selection: BranchSelection) -> Result<Vec<Build>> {
        let branches = self.service.fetch_branches().await?;
        let targets = select_branches(&self.app_name, branches, selection)?;

        info!(
            app = %self.app_name,
            ?selection,
            count = targets.len(),
            "Starting builds"
        );

        let requests = targets.iter().map(|target| async move {
            let mut build = self
                .service
                .create_build(target.name(), target.tip())
                .await?;
            // The service normally echoes these back; fill them in if it did not.
            if build.source_branch.is_empty() {
                build.source_branch = target.name().to_string();
            }
            if build.source_version.is_empty() {
                build.source_version = target.tip().to_string();
            }
            Ok::<_, Error>(build)
        });

        try_join_all(requests).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockService, branch, build};

    #[test]
    fn test_configured_selection_filters() {
        let branches = vec![
            branch("main", "abc", true),
            branch("dev", "def", false),
            branch("release", "123", true),
        ];

        let selected = select_branches("my-app", branches, BranchSelection::Configured).unwrap();
        let names: Vec<_> = selected.iter().map(|b| b.name()).collect();
        assert_eq!(names, vec!["main", "release"]);
    }

    #[test]
    fn test_configured_selection_no_branches() {
        let result = select_branches("my-app", vec![], BranchSelection::Configured);
        assert!(matches!(result.unwrap_err(), Error::NoBranches(app) if app == "my-app"));
    }

    #[test]
    fn test_configured_selection_nothing_configured() {
        let branches = vec![branch("main", "abc", false), branch("dev", "def", false)];
        let result = select_branches("my-app", branches, BranchSelection::Configured);
        assert!(matches!(
            result.unwrap_err(),
            Error::NoConfiguredBranches(_)
        ));
    }

    #[test]
    fn test_all_selection_keeps_unconfigured() {
        let branches = vec![branch("main", "abc", true), branch("dev", "def", false)];
        let selected = select_branches("my-app", branches, BranchSelection::All).unwrap();
        assert_eq!(selected.len(), 2);
    }

    #[tokio::test]
    async fn test_start_all_branches_at_tip() {
        let service = Arc::new(
            MockService::new()
                .with_branches(vec![branch("main", "abc", true), branch("dev", "def", false)])
                .with_created("main", build(1, "main", "queued"))
                .with_created("dev", build(2, "dev", "queued")),
        );
        let launcher = BuildLauncher::new(service.clone(), "my-app");

        let builds = launcher.start(BranchSelection::All).await.unwrap();
        assert_eq!(builds.len(), 2);

        let mut calls = service.create_calls.lock().unwrap().clone();
        calls.sort();
        assert_eq!(
            calls,
            vec![
                ("dev".to_string(), "def".to_string()),
                ("main".to_string(), "abc".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn test_start_all_with_no_branches_creates_nothing() {
        let service = Arc::new(MockService::new());
        let launcher = BuildLauncher::new(service.clone(), "my-app");

        let builds = launcher.start(BranchSelection::All).await.unwrap();
        assert!(builds.is_empty());
        assert!(service.create_calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_start_configured_only() {
        let service = Arc::new(
            MockService::new()
                .with_branches(vec![branch("main", "abc", true), branch("dev", "def", false)])
                .with_created("main", build(1, "main", "queued")),
        );
        let launcher = BuildLauncher::new(service.clone(), "my-app");

        let builds = launcher.start(BranchSelection::Configured).await.unwrap();
        assert_eq!(builds.len(), 1);
        assert_eq!(builds[0].source_branch, "main");
        assert_eq!(service.create_calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_start_configured_without_branches_fails_before_creating() {
        let service = Arc::new(MockService::new());
        let launcher = BuildLauncher::new(service.clone(), "my-app");

        let err = launcher.start(BranchSelection::Configured).await.unwrap_err();
        assert!(matches!(err, Error::NoBranches(_)));
        assert!(service.create_calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_one_failing_branch_aborts_batch() {
        let service = Arc::new(
            MockService::new()
                .with_branches(vec![branch("main", "abc", true), branch("dev", "def", true)])
                .with_created("main", build(1, "main", "queued"))
                .with_failing_branch("dev"),
        );
        let launcher = BuildLauncher::new(service, "my-app");

        let err = launcher.start(BranchSelection::Configured).await.unwrap_err();
        assert!(matches!(err, Error::InvalidBranch(b) if b == "dev"));
    }

    #[tokio::test]
    async fn test_missing_branch_echo_is_filled_in() {
        let service = Arc::new(
            MockService::new()
                .with_branches(vec![branch("main", "abc", true)])
                .with_created("main", build(1, "", "queued")),
        );
        let launcher = BuildLauncher::new(service, "my-app");

        let builds = launcher.start(BranchSelection::Configured).await.unwrap();
        assert_eq!(builds[0].source_branch, "main");
        assert_eq!(builds[0].source_version, "abc");
    }
}
