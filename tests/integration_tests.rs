use std::{io::{Read, Write}, net::TcpListener, thread, time::Duration};
use zk_check::cluster::{perform_check, CheckConfig, ConfigError};
use zk_check::node_status::NodeAddress;
use zk_check::prober::TcpProber;
use zk_check::verdict::Severity;

/// Start a node on localhost that answers `ruok` with `imok` and `stat` with the given mode.
fn start_node(mode: &'static str) -> NodeAddress {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let address = NodeAddress::new("127.0.0.1", listener.local_addr().unwrap().port());
    thread::spawn(move || {
        for mut stream in listener.incoming().flatten() {
            let mut command = [0_u8; 4];
            if stream.read_exact(&mut command).is_err() {
                continue;
            }
            let answer = match &command {
                b"ruok" => "imok".to_string(),
                b"stat" => format!("Zookeeper version: 3.8.1\nClients:\n\nZxid: 0x100000000\nMode: {}\nNode count: 5\n", mode),
                _ => String::new(),
            };
            let _ = stream.write_all(answer.as_bytes());
        }
    });
    address
}

/// Distinct addresses on localhost where nothing listens.
/// All listeners are bound before any is closed, so the ports differ.
fn closed_nodes(count: usize) -> Vec<NodeAddress> {
    let listeners: Vec<TcpListener> = (0..count).map(|_| TcpListener::bind("127.0.0.1:0").unwrap()).collect();
    listeners
        .iter()
        .map(|listener| NodeAddress::new("127.0.0.1", listener.local_addr().unwrap().port()))
        .collect()
}

fn config(hosts: &[NodeAddress]) -> CheckConfig {
    CheckConfig::new(hosts.to_vec(), Duration::from_secs(2), None).unwrap()
}

#[tokio::test]
async fn healthy_ensemble_is_ok() {
    let hosts = vec![start_node("leader"), start_node("follower"), start_node("follower")];

    let check = perform_check(&TcpProber::new(), &config(&hosts)).await.unwrap();

    assert_eq!(check.snapshot.len(), 3);
    assert_eq!(check.quorum.severity, Severity::Ok);
    assert_eq!(check.quorum.message, "3/3 nodes are OK");
    assert_eq!(check.leader.severity, Severity::Ok);
    assert_eq!(check.snapshot.leaders(), vec![&hosts[0]]);
}

#[tokio::test]
async fn lost_quorum_with_reachable_leader() {
    let mut hosts = closed_nodes(2);
    hosts.push(start_node("leader"));

    let check = perform_check(&TcpProber::new(), &config(&hosts)).await.unwrap();

    assert_eq!(check.quorum.severity, Severity::Critical);
    assert_eq!(check.quorum.message, "cluster does not have quorum");
    assert_eq!(check.quorum.description, "1/3 nodes are OK");
    // the judges are independent: the one reachable leader is still a unique leader.
    assert_eq!(check.leader.severity, Severity::Ok);
    for address in &hosts[..2] {
        let status = check.snapshot.get(address).unwrap();
        assert!(!status.reachable);
        assert_eq!(status.is_leader, None);
    }
}

#[tokio::test]
async fn two_leaders_is_split_brain() {
    let hosts = vec![start_node("leader"), start_node("follower"), start_node("leader"), start_node("follower")];

    let check = perform_check(&TcpProber::new(), &config(&hosts)).await.unwrap();

    assert_eq!(check.quorum.severity, Severity::Ok);
    assert_eq!(check.leader.severity, Severity::Critical);
    assert!(check.leader.message.starts_with("more than one leader detected"));
    assert!(check.leader.message.contains(&hosts[0].to_string()));
    assert!(check.leader.message.contains(&hosts[2].to_string()));
}

#[tokio::test]
async fn one_node_down_keeps_quorum() {
    let mut hosts = vec![start_node("leader"), start_node("follower")];
    hosts.extend(closed_nodes(1));

    let check = perform_check(&TcpProber::new(), &config(&hosts)).await.unwrap();

    assert_eq!(check.quorum.severity, Severity::Warn);
    assert_eq!(check.quorum.performance.as_ref().unwrap().value, 2);
    assert_eq!(check.leader.severity, Severity::Ok);
}

#[test]
fn invalid_configuration_is_rejected_before_probing() {
    assert_eq!(CheckConfig::new(Vec::new(), Duration::from_secs(5), None).unwrap_err(), ConfigError::NoHosts);
    assert_eq!(CheckConfig::new(closed_nodes(1), Duration::ZERO, None).unwrap_err(), ConfigError::ZeroTimeout);
}

#[test]
fn check_serializes_for_reporting() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let hosts = vec![start_node("standalone")];

    let check = runtime.block_on(perform_check(&TcpProber::new(), &config(&hosts))).unwrap();
    let json = serde_json::to_value(&check).unwrap();

    assert_eq!(json["quorum"]["severity"], "OK");
    assert_eq!(json["leader"]["severity"], "CRITICAL");
    assert_eq!(json["snapshot"]["statuses"][0]["mode"], "standalone");
}
