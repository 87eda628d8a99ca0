//! zk_check: quorum and leader assessment of a ZooKeeper ensemble.
//!
//! Every configured node is probed with the four letter words `ruok` and `stat`,
//! the per node results are gathered into a [cluster::ClusterSnapshot], and two
//! independent verdicts are derived from that snapshot:
//!  1. Quorum: [verdict::judge_quorum]
//!  2. Leader uniqueness (split brain): [verdict::judge_leader]
//!
//! The complete run is available as [cluster::perform_check].
#[macro_use]
extern crate serde_derive;

pub mod prober;
pub mod node_status;
pub mod cluster;
pub mod verdict;
pub mod utility;

/// The well-known client port of zookeeper.
pub const DEFAULT_PORT: u16 = 2181;
/// The timeout for a single probe (connect, write and read together), in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;
/// The liveness four letter word.
pub const LIVENESS_COMMAND: &str = "ruok";
/// The literal answer of a healthy server to [LIVENESS_COMMAND].
pub const LIVENESS_ACK: &str = "imok";
/// The status four letter word, which reports `Mode: <role>`.
pub const STATUS_COMMAND: &str = "stat";
