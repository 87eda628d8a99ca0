//! The impls and functions
//!
use std::{sync::mpsc::channel, time::{Duration, Instant}};
use log::*;
use anyhow::{Context, Result};
use crate::cluster::{CheckConfig, ClusterCheck, ClusterSnapshot, ConfigError};
use crate::node_status::{NodeAddress, NodeStatus};
use crate::prober::Probe;
use crate::verdict::{judge_leader, judge_quorum};

impl CheckConfig {
    /// Validate the input of a check.
    ///
    /// An empty host list, a zero timeout or a zero parallelism are rejected.
    /// A host that is configured more than once is only probed once, at its first position.
    /// When `parallel` is None, every node gets its own thread.
    pub fn new(
        hosts: Vec<NodeAddress>,
        timeout: Duration,
        parallel: Option<usize>,
    ) -> Result<CheckConfig, ConfigError>
    {
        if timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        let mut unique_hosts: Vec<NodeAddress> = Vec::with_capacity(hosts.len());
        for host in hosts {
            if unique_hosts.contains(&host) {
                warn!("host {} is configured more than once, probing it once", host);
            } else {
                unique_hosts.push(host);
            }
        }
        if unique_hosts.is_empty() {
            return Err(ConfigError::NoHosts);
        }
        let parallel = parallel.unwrap_or(unique_hosts.len());
        if parallel == 0 {
            return Err(ConfigError::ZeroParallel);
        }
        Ok(CheckConfig { hosts: unique_hosts, timeout, parallel })
    }
    pub fn hosts(&self) -> &[NodeAddress] {
        &self.hosts
    }
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
    pub fn parallel(&self) -> usize {
        self.parallel
    }
}

impl ClusterSnapshot {
    pub fn new() -> Self {
        Default::default()
    }
    /// This function takes the configured hosts, and evaluates every host in a threadpool sized by parallel.
    /// It spawns a task per host; every task sends its [NodeStatus] together with the position of the host.
    /// When all tasks are finished, the statuses are put in the configured order and returned.
    pub fn aggregate<P: Probe>(
        prober: &P,
        config: &CheckConfig,
    ) -> Result<ClusterSnapshot>
    {
        info!("begin parallel probe of {} nodes", config.hosts.len());
        let timer = Instant::now();

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.parallel)
            .build()
            .with_context(|| format!("Unable to create a threadpool of {} threads", config.parallel))?;
        let (tx, rx) = channel();
        let timeout = config.timeout;
        pool.scope(move |s| {
            for (position, address) in config.hosts.iter().enumerate() {
                let tx = tx.clone();
                s.spawn(move |_| {
                    let status = NodeStatus::evaluate(prober, address, timeout);
                    debug!("{:?}", &status);
                    // the receiver lives until after the scope, so sending cannot fail.
                    let _ = tx.send((position, status));
                });
            }
        });

        info!("end parallel probe {:?}", timer.elapsed());

        let mut positioned_statuses: Vec<(usize, NodeStatus)> = rx.iter().collect();
        positioned_statuses.sort_by_key(|(position, _)| *position);

        let mut clustersnapshot = ClusterSnapshot::new();
        clustersnapshot.statuses = positioned_statuses.into_iter().map(|(_, status)| status).collect();
        debug_assert_eq!(clustersnapshot.statuses.len(), config.hosts.len());
        Ok(clustersnapshot)
    }
    pub fn len(&self) -> usize {
        self.statuses.len()
    }
    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }
    pub fn get(&self, address: &NodeAddress) -> Option<&NodeStatus> {
        self.statuses.iter().find(|status| &status.address == address)
    }
    /// The number of nodes that answered `ruok` with `imok`.
    pub fn reachable_count(&self) -> usize {
        self.statuses.iter().filter(|status| status.reachable).count()
    }
    /// The addresses of the reachable nodes that report being leader, in configured order.
    pub fn leaders(&self) -> Vec<&NodeAddress> {
        self.statuses
            .iter()
            .filter(|status| status.is_reachable_leader())
            .map(|status| &status.address)
            .collect()
    }
}

/// Probe the ensemble and judge quorum and leadership.
///
/// Nodes that cannot be reached are not an error; they are reflected in the verdicts.
/// An error is only returned if the check itself cannot be performed.
pub async fn perform_check<P: Probe>(
    prober: &P,
    config: &CheckConfig,
) -> Result<ClusterCheck>
{
    info!("begin check");
    let timer = Instant::now();

    let snapshot = ClusterSnapshot::aggregate(prober, config)?;
    let quorum = judge_quorum(&snapshot);
    let leader = judge_leader(&snapshot);

    info!("end check: {:?}", timer.elapsed());
    Ok(ClusterCheck { snapshot, quorum, leader })
}
