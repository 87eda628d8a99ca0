//! The impls and functions
//!
use std::{fmt, str::FromStr, sync::OnceLock, time::Duration};
use chrono::Local;
use regex::Regex;
use log::*;
use crate::node_status::{AddressError, NodeAddress, NodeStatus};
use crate::prober::Probe;
use crate::{DEFAULT_PORT, LIVENESS_ACK, LIVENESS_COMMAND, STATUS_COMMAND};

impl NodeAddress {
    pub fn new(host: &str, port: u16) -> Self {
        NodeAddress { host: host.to_string(), port }
    }
}

impl fmt::Display for NodeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

impl FromStr for NodeAddress {
    type Err = AddressError;
    /// Parse `host` or `host:port`; without a port the zookeeper client port 2181 is used.
    fn from_str(hostname_port: &str) -> Result<Self, Self::Err> {
        let hostname_port = hostname_port.trim();
        let (host, port) = match hostname_port.rsplit_once(':') {
            Some((host, port)) => {
                let port = port
                    .parse::<u16>()
                    .map_err(|_| AddressError::InvalidPort(hostname_port.to_string()))?;
                (host, port)
            }
            None => (hostname_port, DEFAULT_PORT),
        };
        if host.is_empty() {
            return Err(AddressError::EmptyHost(hostname_port.to_string()));
        }
        if !valid_host().is_match(host) {
            return Err(AddressError::InvalidHost(host.to_string()));
        }
        Ok(NodeAddress::new(host, port))
    }
}

/// The characters allowed in a hostname, compiled once.
fn valid_host() -> &'static Regex {
    static VALID_HOST: OnceLock<Regex> = OnceLock::new();
    VALID_HOST.get_or_init(|| Regex::new(r"^[a-zA-Z0-9.\-]+$").expect("host regex should compile"))
}

impl NodeStatus {
    fn unreachable(address: &NodeAddress) -> Self {
        NodeStatus {
            address: address.clone(),
            reachable: false,
            is_leader: None,
            mode: None,
            timestamp: Local::now(),
        }
    }
    /// Determine the status of a single node with `ruok` and, if that succeeds, `stat`.
    ///
    /// This function never fails: any problem results in a node that is not reachable,
    /// or a reachable node that is not the leader.
    pub fn evaluate<P: Probe + ?Sized>(
        prober: &P,
        address: &NodeAddress,
        timeout: Duration,
    ) -> NodeStatus
    {
        match prober.probe(address, LIVENESS_COMMAND, timeout) {
            Ok(answer) if answer == LIVENESS_ACK => {}
            Ok(answer) => {
                warn!("({}) {} returned {:?} instead of {:?}, node is not ok", address, LIVENESS_COMMAND, answer, LIVENESS_ACK);
                return NodeStatus::unreachable(address);
            }
            Err(error) => {
                warn!("({}) not reachable: {}", address, error);
                return NodeStatus::unreachable(address);
            }
        }

        let mode = match prober.probe(address, STATUS_COMMAND, timeout) {
            Ok(answer) => {
                let mode = parse_mode(&answer);
                if mode.is_none() {
                    debug!("({}) {} output has no Mode line", address, STATUS_COMMAND);
                }
                mode
            }
            Err(error) => {
                warn!("({}) {} failed, node is counted as not leader: {}", address, STATUS_COMMAND, error);
                None
            }
        };
        let is_leader = mode.as_deref() == Some("leader");

        NodeStatus {
            address: address.clone(),
            reachable: true,
            is_leader: Some(is_leader),
            mode,
            timestamp: Local::now(),
        }
    }
    /// True only for a reachable node that reported `Mode: leader`.
    pub fn is_reachable_leader(&self) -> bool {
        self.reachable && self.is_leader == Some(true)
    }
}

/// Find the role in the output of `stat`.
///
/// The role is taken from the first line that starts with `Mode: `, and consists of the
/// lowercase ascii letters following it:
/// ```text
/// Zxid: 0x100000002
/// Mode: follower
/// Node count: 5
/// ```
/// Returns None if no such line exists, which is interpreted as 'not leader'.
pub fn parse_mode(stat_output: &str) -> Option<String> {
    stat_output
        .lines()
        .filter_map(|line| line.strip_prefix("Mode: "))
        .map(|rest| rest.chars().take_while(|c| c.is_ascii_lowercase()).collect::<String>())
        .find(|role| !role.is_empty())
}
