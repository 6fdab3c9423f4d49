//! Completion reports.

use buildmon_config::MonitorConfig;
use buildmon_core::{Build, BuildId};
use std::fmt;

/// Human-readable summary of a completed build.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildReport {
    pub build_id: BuildId,
    pub branch: String,
    pub result: String,
    /// Seconds between start and finish, absent if either timestamp is missing.
    pub duration_secs: Option<f64>,
    pub logs_url: String,
}

impl BuildReport {
    pub fn new(build: &Build, config: &MonitorConfig) -> Self {
        Self {
            build_id: build.id,
            branch: build.source_branch.clone(),
            result: build
                .result
                .clone()
                .unwrap_or_else(|| "unknown".to_string()),
            duration_secs: build
                .duration()
                .map(|d| d.num_milliseconds() as f64 / 1000.0),
            logs_url: config.logs_url(&build.source_branch, build.id),
        }
    }
}

impl fmt::Display for BuildReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} build {} {} in ", self.branch, self.build_id, self.result)?;
        match self.duration_secs {
            Some(secs) => write!(f, "{} sec.", secs)?,
            None => write!(f, "unknown time.")?,
        }
        write!(f, " Link to build logs {}", self.logs_url)
    }
}
