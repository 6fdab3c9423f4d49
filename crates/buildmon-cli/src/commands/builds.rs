//! Build commands.

use anyhow::{Context, Result};
use buildmon_config::MonitorConfig;
use buildmon_core::{BuildId, BuildService};

pub async fn show(config: &MonitorConfig, id: u64) -> Result<()> {
    let id = BuildId::new(id);
    let build = super::client(config)?
        .fetch_build(id)
        .await
        .with_context(|| format!("Failed to fetch build {}", id))?;

    println!("Build Details:");
    println!("  ID:       {}", build.id);
    if let Some(number) = &build.build_number {
        println!("  Number:   {}", number);
    }
    println!("  Branch:   {}", build.source_branch);
    println!("  Version:  {}", build.source_version);
    println!("  Status:   {}", build.status);
    if let Some(result) = &build.result {
        println!("  Result:   {}", result);
    }
    if let Some(start) = build.start_time {
        println!("  Started:  {}", start.to_rfc3339());
    }
    if let Some(finish) = build.finish_time {
        println!("  Finished: {}", finish.to_rfc3339());
    }
    println!("  Logs:     {}", config.logs_url(&build.source_branch, build.id));

    Ok(())
}
