//! Build monitor - launches builds and hands them to a background poller.

use buildmon_config::MonitorConfig;
use buildmon_core::{BuildId, BuildService, Result};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::info;

use crate::launcher::{BranchSelection, BuildLauncher};
use crate::poller::{PollSummary, StatusPoller};
use crate::report::BuildReport;

/// Event emitted while builds are being monitored.
#[derive(Debug, Clone)]
pub enum MonitorEvent {
    BuildStarted { id: BuildId, branch: String },
    PollCycle { cycle: usize, in_flight: usize },
    BuildCompleted(BuildReport),
    MonitorCompleted { completed: usize },
}

/// Starts builds for one application and tracks them to completion.
pub struct BuildMonitor {
    service: Arc<dyn BuildService>,
    config: Arc<MonitorConfig>,
}

impl BuildMonitor {
    pub fn new(service: Arc<dyn BuildService>, config: MonitorConfig) -> Self {
        Self {
            service,
            config: Arc::new(config),
        }
    }

    /// Start builds on the selected branches and spawn the poller.
    ///
    /// Returns as soon as the builds are created, with a channel of events and
    /// a handle resolving to the poll summary. Branch selection and creation
    /// errors are returned directly; re-fetch errors come out of the handle.
    pub async fn launch(
        &self,
        selection: BranchSelection,
    ) -> Result<(
        mpsc::Receiver<MonitorEvent>,
        JoinHandle<Result<PollSummary>>,
    )> {
        let launcher = BuildLauncher::new(self.service.clone(), self.config.app_name());
        let builds = launcher.start(selection).await?;

        let (tx, rx) = mpsc::channel(100);
        let poller = StatusPoller::new(self.service.clone(), self.config.clone());

        let handle = tokio::spawn(async move {
            for build in &builds {
                info!(build_id = %build.id, branch = %build.source_branch, "Build started");
                let _ = tx
                    .send(MonitorEvent::BuildStarted {
                        id: build.id,
                        branch: build.source_branch.clone(),
                    })
                    .await;
            }

            poller.run(builds, &tx).await
        });

        Ok((rx, handle))
    }
}
