//! The structs
//!
use std::time::Duration;
use thiserror::Error;
use crate::node_status::{NodeAddress, NodeStatus};
use crate::verdict::Verdict;

/// The validated input of a check, see [CheckConfig::new].
#[derive(Debug, Clone)]
pub struct CheckConfig {
    pub(crate) hosts: Vec<NodeAddress>,
    pub(crate) timeout: Duration,
    pub(crate) parallel: usize,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no hosts configured")]
    NoHosts,
    #[error("the timeout must be larger than zero")]
    ZeroTimeout,
    #[error("the parallelism must be at least 1")]
    ZeroParallel,
}

/// The status of every configured node, in configured order, gathered during a single check.
///
/// Every configured node is present exactly once.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ClusterSnapshot {
    pub statuses: Vec<NodeStatus>,
}

/// The complete outcome of a check, for the reporting layer.
#[derive(Serialize, Debug)]
pub struct ClusterCheck {
    pub snapshot: ClusterSnapshot,
    pub quorum: Verdict,
    pub leader: Verdict,
}
