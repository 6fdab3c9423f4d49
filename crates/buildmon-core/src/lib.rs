//! Core domain types and traits for the build monitor.
//!
//! This crate contains:
//! - Build and branch snapshots as returned by the build service
//! - Build identifiers and status tags
//! - The `BuildService` trait the launcher and poller are written against

pub mod branch;
pub mod build;
pub mod error;
pub mod id;
pub mod service;

pub use branch::{Branch, BranchConfiguration, Commit};
pub use build::{Build, BuildStatus};
pub use error::{Error, Result};
pub use id::BuildId;
pub use service::BuildService;
