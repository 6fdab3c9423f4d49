//! Branch commands.

use anyhow::{Context, Result};
use buildmon_config::MonitorConfig;
use buildmon_core::BuildService;

pub async fn list(config: &MonitorConfig) -> Result<()> {
    let branches = super::client(config)?
        .fetch_branches()
        .await
        .context("Failed to fetch branches")?;

    if branches.is_empty() {
        println!("No branches found in {}.", config.app_name());
        return Ok(());
    }

    println!(
        "{:<40} {:<10} {:<12} {:<20}",
        "BRANCH", "CI", "COMMIT", "LAST BUILD"
    );
    println!("{}", "-".repeat(84));

    for branch in branches {
        let last_build = match &branch.last_build {
            Some(build) => match &build.result {
                Some(result) => format!("{} ({} {})", build.id, build.status, result),
                None => format!("{} ({})", build.id, build.status),
            },
            None => "-".to_string(),
        };
        println!(
            "{:<40} {:<10} {:<12} {:<20}",
            branch.name(),
            if branch.configured { "yes" } else { "no" },
            branch.tip().chars().take(10).collect::<String>(),
            last_build
        );
    }

    Ok(())
}
