//! Build launching and status polling.
//!
//! Starts builds on the selected branches, then tracks every started build
//! until the service reports it completed.

pub mod launcher;
pub mod monitor;
pub mod poller;
pub mod report;

#[cfg(test)]
mod testing;

pub use launcher::{BranchSelection, BuildLauncher, select_branches};
pub use monitor::{BuildMonitor, MonitorEvent};
pub use poller::{PollSummary, StatusPoller};
pub use report::BuildReport;
