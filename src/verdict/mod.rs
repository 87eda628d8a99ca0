//! Module for judging a [crate::cluster::ClusterSnapshot].
//!
//! There are two independent judgements:
//! - [judge_quorum]: are enough nodes up for the ensemble to have quorum.
//!   Quorum is half the number of nodes, rounded half away from zero: 1 of 1, 2 of 3, 2 of 4, 3 of 5.
//! - [judge_leader]: is there exactly one leader. More than one leader is split brain.
//!
//! The quorum verdict carries performance data with thresholds depending on the size of the ensemble,
//! so graduated alerting is possible on the number of nodes that are up.
//!
mod structs;
mod functions;

pub use structs::*;
pub use functions::*;
