//! Module for sending a four letter word to a single zookeeper node.
//!
//! A four letter word is sent as-is over a fresh TCP connection, and the node answers with
//! plain text and closes the connection:
//! - `ruok` returns `imok` if the server is running in a non-error state.
//! - `stat` returns server details, including a line `Mode: <role>`.
//!
//! The prober does not interpret the answer, it only returns the raw text or a [ConnectionError].
//! The [Probe] trait is the seam that allows the node evaluation to be tested without a network.
//!
mod structs;
mod functions;

pub use structs::*;
pub use functions::*;
