//! Module for the status of a single zookeeper node.
//!
//! The status of a node is determined in two steps:
//! 1. `ruok` must return exactly `imok`, otherwise the node is not reachable and step 2 is skipped.
//! 2. `stat` is parsed for the line `Mode: <role>`; the node is leader if the role is `leader`.
//!
//! A node that answers `ruok` but whose `stat` fails or lacks a `Mode:` line is reachable, but not leader.
//!
mod structs;
mod functions;

pub use structs::*;
pub use functions::*;
