//! Start builds and follow them to completion.

use anyhow::{Context, Result};
use buildmon_config::MonitorConfig;
use buildmon_scheduler::{BranchSelection, BuildMonitor, MonitorEvent};

pub async fn run(config: MonitorConfig, all: bool) -> Result<()> {
    let selection = if all {
        BranchSelection::All
    } else {
        BranchSelection::Configured
    };

    let client = super::client(&config)?;
    let monitor = BuildMonitor::new(client, config);

    let (mut rx, handle) = monitor
        .launch(selection)
        .await
        .context("Failed to start builds")?;

    while let Some(event) = rx.recv().await {
        match event {
            MonitorEvent::BuildStarted { id, branch } => {
                println!("Build {} was started for {}", id, branch);
            }
            MonitorEvent::BuildCompleted(report) => {
                println!("{}", report);
            }
            MonitorEvent::PollCycle { .. } | MonitorEvent::MonitorCompleted { .. } => {}
        }
    }

    let summary = handle
        .await
        .context("Build monitor task failed")?
        .context("Failed to check build status")?;

    if summary.completed.is_empty() {
        println!("No builds were started.");
        return Ok(());
    }

    let succeeded = summary
        .completed
        .iter()
        .filter(|b| b.result.as_deref() == Some("succeeded"))
        .count();
    println!(
        "\n{} build(s) completed: {} succeeded, {} did not",
        summary.completed.len(),
        succeeded,
        summary.completed.len() - succeeded
    );

    Ok(())
}
