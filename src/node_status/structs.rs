//! The structs
//!
use chrono::{DateTime, Local};
use thiserror::Error;

/// The host and port of a node, the identity of a node during a check.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeAddress {
    pub host: String,
    pub port: u16,
}
/// The result of probing a single node.
///
/// `is_leader` and `mode` are only set when the node is reachable.
/// ```text
/// reachable: false -> is_leader: None
/// reachable: true  -> is_leader: Some(true) only if stat reports `Mode: leader`
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NodeStatus {
    pub address: NodeAddress,
    pub reachable: bool,
    pub is_leader: Option<bool>,
    /// zk_check added to show the role as reported, for example `follower` or `standalone`.
    pub mode: Option<String>,
    /// zk_check added to allow understanding the timestamp.
    pub timestamp: DateTime<Local>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("empty host in '{0}'")]
    EmptyHost(String),
    #[error("invalid host '{0}': only letters, digits, '.' and '-' are allowed")]
    InvalidHost(String),
    #[error("invalid port in '{0}'")]
    InvalidPort(String),
}
