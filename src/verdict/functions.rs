//! The impls and functions
//!
use log::*;
use crate::cluster::ClusterSnapshot;
use crate::verdict::{Performance, Severity, Thresholds, Verdict, WarningBand};

/// The label of the quorum performance data.
pub const QUORUM_PERFORMANCE_LABEL: &str = "OK ZK nodes";

impl Thresholds {
    /// The thresholds for an ensemble of `nodes` nodes:
    /// - a single node (development): critical below 0, no warning band.
    /// - 2 or 3 nodes: critical below 2, no warning band.
    /// - 4 or more nodes: critical below quorum, warning from quorum + 1 up to all but one node.
    pub fn for_cluster_size(nodes: usize) -> Self {
        match nodes {
            0 | 1 => Thresholds { critical: 0, warning: None },
            2 | 3 => Thresholds { critical: 2, warning: None },
            _ => {
                let quorum = quorum_size(nodes);
                Thresholds { critical: quorum, warning: Some(WarningBand { start: quorum + 1, end: nodes - 1 }) }
            }
        }
    }
    pub fn evaluate(&self, value: usize) -> Severity {
        if value < self.critical {
            Severity::Critical
        } else if self.warning.map_or(false, |band| band.contains(value)) {
            Severity::Warn
        } else {
            Severity::Ok
        }
    }
}

impl WarningBand {
    pub fn contains(&self, value: usize) -> bool {
        (self.start..=self.end).contains(&value)
    }
}

/// The number of nodes needed for quorum: half the nodes, rounded half away from zero.
pub fn quorum_size(nodes: usize) -> usize {
    (nodes + 1) / 2
}

/// Judge whether the ensemble has all nodes up (OK), has nodes down but keeps quorum (WARN),
/// or has lost quorum (CRITICAL).
pub fn judge_quorum(snapshot: &ClusterSnapshot) -> Verdict {
    let nodes = snapshot.len();
    let up = snapshot.reachable_count();
    let quorum = quorum_size(nodes);
    let description = format!("{}/{} nodes are OK", up, nodes);

    let (severity, message) = if up >= nodes {
        (Severity::Ok, description.clone())
    } else if up >= quorum {
        (Severity::Warn, "cluster has nodes down but retains quorum".to_string())
    } else {
        (Severity::Critical, "cluster does not have quorum".to_string())
    };
    debug!("quorum: nodes: {}, up: {}, quorum: {}, severity: {:?}", nodes, up, quorum, severity);

    Verdict {
        severity,
        message,
        description,
        performance: Some(Performance {
            label: QUORUM_PERFORMANCE_LABEL.to_string(),
            value: up,
            thresholds: Thresholds::for_cluster_size(nodes),
        }),
    }
}

/// Judge whether exactly one reachable node is leader.
/// No leader, or more than one leader (split brain), is CRITICAL.
pub fn judge_leader(snapshot: &ClusterSnapshot) -> Verdict {
    let leaders = snapshot.leaders();
    let leader_list = leaders.iter().map(|address| address.to_string()).collect::<Vec<String>>().join(", ");

    let (severity, message, description) = match leaders.len() {
        0 => (Severity::Critical, "cluster has no leader".to_string(), "no node is leader".to_string()),
        1 => (Severity::Ok, format!("{} is leader", leader_list), format!("{} is leader", leader_list)),
        _ => {
            warn!("split brain: {} are leaders", leader_list);
            (
                Severity::Critical,
                format!("more than one leader detected: {}", leader_list),
                format!("{} are leaders", leader_list),
            )
        }
    };

    Verdict { severity, message, description, performance: None }
}
