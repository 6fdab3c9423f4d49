//! Status poller - tracks in-flight builds until the service reports them completed.
//!
//! One poll cycle:
//! 1. Split the tracked builds into settled and in-flight.
//! 2. Report every settled build and stop tracking it.
//! 3. Exit if nothing is in flight.
//! 4. Re-fetch all in-flight builds concurrently.
//! 5. Wait for the update interval, then start the next cycle with the fresh
//!    snapshots.
//!
//! Settled builds are never re-fetched, so each build is reported exactly once.
//! There is no cycle limit: a build that never settles is polled until the
//! process stops.

use buildmon_config::MonitorConfig;
use buildmon_core::{Build, BuildService, Result};
use futures::future::try_join_all;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::sleep;
use tracing::{debug, info};

use crate::monitor::MonitorEvent;
use crate::report::BuildReport;

/// Outcome of a finished poll loop.
#[derive(Debug, Default)]
pub struct PollSummary {
    /// Number of re-fetch cycles performed.
    pub cycles: usize,
    /// Settled builds in the order they were reported.
    pub completed: Vec<Build>,
}

/// Polls the build service until every tracked build has completed.
pub struct StatusPoller {
    service: Arc<dyn BuildService>,
    config: Arc<MonitorConfig>,
}

impl StatusPoller {
    pub fn new(service: Arc<dyn BuildService>, config: Arc<MonitorConfig>) -> Self {
        Self { service, config }
    }

    fn interval(&self) -> Duration {
        self.config.update_status_interval()
    }

    /// Run poll cycles until no build is in flight.
    ///
    /// A failed re-fetch ends the loop with that error; builds still in flight
    /// at that point are dropped.
    pub async fn run(
        &self,
        builds: Vec<Build>,
        tx: &mpsc::Sender<MonitorEvent>,
    ) -> Result<PollSummary> {
        let mut summary = PollSummary::default();
        let mut tracked = builds;

        loop {
            let (settled, in_flight): (Vec<Build>, Vec<Build>) =
                tracked.into_iter().partition(Build::is_settled);

            for build in settled {
                let report = BuildReport::new(&build, &self.config);
                info!(
                    build_id = %build.id,
                    branch = %build.source_branch,
                    result = %report.result,
                    "Build completed"
                );
                let _ = tx.send(MonitorEvent::BuildCompleted(report)).await;
                summary.completed.push(build);
            }

            if in_flight.is_empty() {
                break;
            }

            summary.cycles += 1;
            debug!(
                cycle = summary.cycles,
                in_flight = in_flight.len(),
                "Refreshing in-flight builds"
            );
            let _ = tx
                .send(MonitorEvent::PollCycle {
                    cycle: summary.cycles,
                    in_flight: in_flight.len(),
                })
                .await;

            tracked = try_join_all(in_flight.iter().map(|build| self.refresh(build))).await?;

            sleep(self.interval()).await;
        }

        info!(
            completed = summary.completed.len(),
            cycles = summary.cycles,
            "All tracked builds completed"
        );
        let _ = tx
            .send(MonitorEvent::MonitorCompleted {
                completed: summary.completed.len(),
            })
            .await;

        Ok(summary)
    }

    /// Fetch a fresh snapshot, keeping the branch name if the service left it out.
    async fn refresh(&self, build: &Build) -> Result<Build> {
        let mut fresh = self.service.fetch_build(build.id).await?;
        if fresh.source_branch.is_empty() {
            fresh.source_branch = build.source_branch.clone();
        }
        debug!(build_id = %fresh.id, status = %fresh.status, "Fetched build status");
        Ok(fresh)
    }
}
