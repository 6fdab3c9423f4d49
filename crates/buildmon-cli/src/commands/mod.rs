//! CLI command implementations.

pub mod branches;
pub mod builds;
pub mod start;

use anyhow::{Context, Result};
use buildmon_client::AppCenterClient;
use buildmon_config::MonitorConfig;
use std::sync::Arc;

fn client(config: &MonitorConfig) -> Result<Arc<AppCenterClient>> {
    let client = AppCenterClient::new(config).context("Failed to create build service client")?;
    Ok(Arc::new(client))
}
