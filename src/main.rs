//! zk_check: check quorum and leader uniqueness of a zookeeper ensemble.
//!
//! The check is printed as JSON, for a reporting layer to turn into output and an exit code.
use std::collections::HashMap;
use clap::Parser;
use dotenv::dotenv;
use log::*;
use anyhow::{Context, Result};
use zk_check::{cluster, prober::TcpProber, utility};

/// The command line options of zk_check.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Opts {
    /// hostnames, comma separated, optionally with port (default 2181)
    #[arg(short = 'H', long, value_name = "hostname:port,hostname:port")]
    hosts: Option<String>,
    /// timeout in seconds for every probe (default 5)
    #[arg(short, long, value_name = "seconds")]
    timeout: Option<String>,
    /// number of nodes probed in parallel (default all)
    #[arg(long, value_name = "nr")]
    parallel: Option<String>,
    /// write the hosts, timeout and parallel settings to .env
    #[arg(long)]
    write_dotenv: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    dotenv().ok();
    let options = Opts::parse();

    let mut changed_options = HashMap::new();
    let hosts = utility::set_hosts(&options.hosts, &mut changed_options)?;
    let timeout = utility::set_timeout(&options.timeout, &mut changed_options)?;
    let parallel = utility::set_parallel(&options.parallel, &mut changed_options)?;
    utility::dotenv_writer(options.write_dotenv, changed_options)?;

    let config = cluster::CheckConfig::new(hosts, timeout, parallel)
        .with_context(|| "Invalid configuration")?;
    info!("checking {} nodes, timeout: {:?}, parallel: {}", config.hosts().len(), config.timeout(), config.parallel());

    let check = cluster::perform_check(&TcpProber::new(), &config).await?;
    println!("{}", serde_json::to_string_pretty(&check)?);

    Ok(())
}
