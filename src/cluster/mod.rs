//! Module for probing all nodes of the ensemble and gathering the results.
//!
//! The functionality for cluster has the following public entries:
//!  1. Input validation: [CheckConfig::new]
//!  2. Snapshot creation: [ClusterSnapshot::aggregate]
//!  3. A complete check, snapshot and both verdicts: [perform_check]
//!
//! Every node is evaluated in its own task in a threadpool, so a node that hangs until the timeout
//! does not delay the evaluation of the others. The snapshot is only returned when all nodes are evaluated,
//! and is ordered as the configured hosts.
//!
mod structs;
mod functions;

pub use structs::*;
pub use functions::*;
