//! In-memory build service for launcher and poller tests.

use async_trait::async_trait;
use buildmon_config::MonitorConfig;
use buildmon_core::{
    Branch, BranchConfiguration, Build, BuildId, BuildService, BuildStatus, Commit, Error, Result,
};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;

pub fn config() -> MonitorConfig {
    MonitorConfig::builder()
        .with_app_name("my-app")
        .with_owner_name("my-org")
        .with_token("secret")
        .with_update_status_interval_ms(1)
        .build()
        .unwrap()
}

pub fn branch(name: &str, sha: &str, configured: bool) -> BranchConfiguration {
    BranchConfiguration {
        branch: Branch {
            name: name.to_string(),
            commit: Commit {
                sha: sha.to_string(),
            },
        },
        configured,
        last_build: None,
    }
}

pub fn build(id: u64, branch: &str, status: &str) -> Build {
    Build {
        id: BuildId::new(id),
        build_number: None,
        queue_time: None,
        start_time: None,
        finish_time: None,
        status: BuildStatus::from(status),
        result: None,
        source_branch: branch.to_string(),
        source_version: String::new(),
    }
}

pub fn completed(id: u64, branch: &str, result: &str, start: &str, finish: &str) -> Build {
    Build {
        start_time: Some(start.parse().unwrap()),
        finish_time: Some(finish.parse().unwrap()),
        result: Some(result.to_string()),
        ..build(id, branch, "completed")
    }
}

/// Scripted build service.
///
/// Each fetch of a build pops the next scripted snapshot; the last snapshot
/// is returned for every fetch after that.
#[derive(Default)]
pub struct MockService {
    branches: Vec<BranchConfiguration>,
    created: HashMap<String, Build>,
    failing_branches: HashSet<String>,
    snapshots: Mutex<HashMap<BuildId, VecDeque<Build>>>,
    failing_fetches: HashSet<BuildId>,
    pub create_calls: Mutex<Vec<(String, String)>>,
    pub fetch_calls: Mutex<Vec<BuildId>>,
}

impl MockService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_branches(mut self, branches: Vec<BranchConfiguration>) -> Self {
        self.branches = branches;
        self
    }

    pub fn with_created(mut self, branch: &str, build: Build) -> Self {
        self.created.insert(branch.to_string(), build);
        self
    }

    pub fn with_failing_branch(mut self, branch: &str) -> Self {
        self.failing_branches.insert(branch.to_string());
        self
    }

    pub fn with_snapshots(self, id: u64, builds: Vec<Build>) -> Self {
        self.snapshots
            .lock()
            .unwrap()
            .insert(BuildId::new(id), builds.into());
        self
    }

    pub fn with_failing_fetch(mut self, id: u64) -> Self {
        self.failing_fetches.insert(BuildId::new(id));
        self
    }

    pub fn fetch_count(&self, id: u64) -> usize {
        self.fetch_calls
            .lock()
            .unwrap()
            .iter()
            .filter(|f| **f == BuildId::new(id))
            .count()
    }
}

#[async_trait]
impl BuildService for MockService {
    async fn fetch_build(&self, id: BuildId) -> Result<Build> {
        self.fetch_calls.lock().unwrap().push(id);
        if self.failing_fetches.contains(&id) {
            return Err(Error::Network(format!("connection reset fetching {}", id)));
        }

        let mut snapshots = self.snapshots.lock().unwrap();
        let queue = snapshots
            .get_mut(&id)
            .ok_or_else(|| Error::NotFound(format!("build {}", id)))?;
        if queue.len() > 1 {
            Ok(queue.pop_front().unwrap())
        } else {
            queue
                .front()
                .cloned()
                .ok_or_else(|| Error::NotFound(format!("build {}", id)))
        }
    }

    async fn fetch_branches(&self) -> Result<Vec<BranchConfiguration>> {
        Ok(self.branches.clone())
    }

    async fn create_build(&self, branch: &str, source_version: &str) -> Result<Build> {
        self.create_calls
            .lock()
            .unwrap()
            .push((branch.to_string(), source_version.to_string()));
        if self.failing_branches.contains(branch) {
            return Err(Error::InvalidBranch(branch.to_string()));
        }
        self.created
            .get(branch)
            .cloned()
            .ok_or_else(|| Error::InvalidBranch(branch.to_string()))
    }
}
