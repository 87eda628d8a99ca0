//! The structs
//!
use std::{io, time::Duration};
use thiserror::Error;
use crate::node_status::NodeAddress;

/// A single attempt to send a command to a node and read the full answer.
///
/// Implementations must honour `timeout` for the complete exchange and must not retry.
pub trait Probe: Sync {
    fn probe(
        &self,
        address: &NodeAddress,
        command: &str,
        timeout: Duration,
    ) -> Result<String, ConnectionError>;
}

/// The prober that talks to a node over TCP.
#[derive(Debug, Default, Clone, Copy)]
pub struct TcpProber;

/// The reasons a probe did not produce an answer.
///
/// These are expected per node conditions, and are turned into an unreachable node status.
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("unable to resolve {address}: {source}")]
    Resolve {
        address: String,
        source: io::Error,
    },
    #[error("{address} resolved to no socket addresses")]
    NoAddresses { address: String },
    #[error("connection to {address} failed: {source}")]
    Connect {
        address: String,
        source: io::Error,
    },
    #[error("i/o error talking to {address}: {source}")]
    Io {
        address: String,
        source: io::Error,
    },
    #[error("{address} did not answer within {timeout:?}")]
    Timeout {
        address: String,
        timeout: Duration,
    },
}
