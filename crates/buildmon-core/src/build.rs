//! Build snapshots.
//!
//! A `Build` is a read-only snapshot of a build as the service reported it at
//! fetch time. Snapshots go stale immediately; only a fresh fetch can move a
//! build to a settled status.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::BuildId;

/// Status tag reported by the build service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BuildStatus {
    NotStarted,
    Queued,
    InProgress,
    Cancelling,
    Completed,
    /// Any status the service reports that is not listed above.
    Other(String),
}

impl BuildStatus {
    pub fn as_str(&self) -> &str {
        match self {
            BuildStatus::NotStarted => "notStarted",
            BuildStatus::Queued => "queued",
            BuildStatus::InProgress => "inProgress",
            BuildStatus::Cancelling => "cancelling",
            BuildStatus::Completed => "completed",
            BuildStatus::Other(s) => s,
        }
    }

    /// Whether the build will not change any further.
    ///
    /// Only the literal `completed` marker settles a build. The service reports
    /// failed and canceled builds as `completed` with a matching `result`, so
    /// `Cancelling` and unknown tags are still polled.
    pub fn is_settled(&self) -> bool {
        matches!(self, BuildStatus::Completed)
    }
}

impl From<String> for BuildStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "notStarted" => BuildStatus::NotStarted,
            "queued" => BuildStatus::Queued,
            "inProgress" => BuildStatus::InProgress,
            "cancelling" => BuildStatus::Cancelling,
            "completed" => BuildStatus::Completed,
            _ => BuildStatus::Other(s),
        }
    }
}

impl From<&str> for BuildStatus {
    fn from(s: &str) -> Self {
        BuildStatus::from(s.to_string())
    }
}

impl From<BuildStatus> for String {
    fn from(status: BuildStatus) -> Self {
        match status {
            BuildStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One CI execution triggered against a branch at a source revision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Build {
    /// Identifier assigned by the service.
    pub id: BuildId,
    /// Human-facing build number (e.g. "42").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queue_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    /// Absent until the build completes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_time: Option<DateTime<Utc>>,
    pub status: BuildStatus,
    /// Meaningful only once the status is settled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(default)]
    pub source_branch: String,
    #[serde(default)]
    pub source_version: String,
}

impl Build {
    pub fn is_settled(&self) -> bool {
        self.status.is_settled()
    }

    /// Time between start and finish, if the service reported both.
    pub fn duration(&self) -> Option<Duration> {
        match (self.start_time, self.finish_time) {
            (Some(start), Some(finish)) => Some(finish - start),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_service_tags() {
        assert_eq!(BuildStatus::from("completed"), BuildStatus::Completed);
        assert_eq!(BuildStatus::from("inProgress"), BuildStatus::InProgress);
        assert_eq!(BuildStatus::from("notStarted"), BuildStatus::NotStarted);
        assert_eq!(
            BuildStatus::from("canceled"),
            BuildStatus::Other("canceled".to_string())
        );
    }

    #[test]
    fn test_only_completed_is_settled() {
        assert!(BuildStatus::Completed.is_settled());
        assert!(!BuildStatus::Queued.is_settled());
        assert!(!BuildStatus::Cancelling.is_settled());
        assert!(!BuildStatus::Other("failed".to_string()).is_settled());
    }

    #[test]
    fn test_decode_completed_build() {
        let json = r#"{
            "id": 1,
            "buildNumber": "1",
            "startTime": "2024-01-01T00:00:00Z",
            "finishTime": "2024-01-01T00:05:00Z",
            "status": "completed",
            "result": "succeeded",
            "sourceBranch": "main",
            "sourceVersion": "abc"
        }"#;

        let build: Build = serde_json::from_str(json).unwrap();
        assert_eq!(build.id, BuildId::new(1));
        assert!(build.is_settled());
        assert_eq!(build.result.as_deref(), Some("succeeded"));
        assert_eq!(build.source_branch, "main");
        assert_eq!(build.duration(), Some(Duration::seconds(300)));
    }

    #[test]
    fn test_decode_fresh_build_without_timestamps() {
        let build: Build = serde_json::from_str(r#"{"id": 7, "status": "queued"}"#).unwrap();
        assert_eq!(build.status, BuildStatus::Queued);
        assert!(build.finish_time.is_none());
        assert!(build.duration().is_none());
        assert!(build.source_branch.is_empty());
    }

    #[test]
    fn test_unknown_status_survives_round_trip() {
        let build: Build =
            serde_json::from_str(r#"{"id": 3, "status": "postponed"}"#).unwrap();
        let encoded = serde_json::to_value(&build).unwrap();
        assert_eq!(encoded["status"], "postponed");
    }
}
