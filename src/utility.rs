//! Utilities
//!
//! The settings of zk_check are resolved in the following order:
//! 1. The command line option.
//! 2. The environment variable, which can be set via `.env` (read with dotenv).
//! 3. The built-in default.
//!
//! Settings that are not the default are collected in `changed_options`, so they can be written to `.env`.
use std::{collections::HashMap, env, fs, path::Path, time::Duration};
use log::*;
use anyhow::{Context, Result};
use crate::node_status::NodeAddress;
use crate::DEFAULT_TIMEOUT_SECS;

/// The default hosts, the client port defaults to 2181.
pub const DEFAULT_HOSTS: &str = "localhost";

/// Take the option if set, else the environment variable; None means the caller uses its default.
/// A value taken from the option or the environment is recorded in `changed_options`.
fn resolve_setting(
    name: &str,
    option: &Option<String>,
    env_key: &'static str,
    changed_options: &mut HashMap<&'static str, String>,
) -> Option<String>
{
    if let Some(value) = option {
        info!("{} argument set: using: {}", name, value);
        changed_options.insert(env_key, value.to_string());
        return Some(value.to_string());
    }
    match env::var(env_key) {
        Ok(set_var) => {
            info!("{} not set: set via .env: {}: {}", name, env_key, set_var);
            changed_options.insert(env_key, set_var.to_owned());
            Some(set_var)
        }
        Err(_e) => {
            info!("{} not set: and not set via .env: using default", name);
            None
        }
    }
}

/// Split a comma separated list of `host[:port]` into addresses.
pub fn parse_hosts(hosts: &str) -> Result<Vec<NodeAddress>> {
    hosts
        .split(',')
        .map(|hostname_port| {
            hostname_port
                .parse::<NodeAddress>()
                .with_context(|| format!("Invalid host in hosts list: '{}'", hostname_port))
        })
        .collect()
}

pub fn set_hosts(
    option: &Option<String>,
    changed_options: &mut HashMap<&'static str, String>,
) -> Result<Vec<NodeAddress>>
{
    let hosts_string = resolve_setting("hosts", option, "ZKCHECK_HOSTS", changed_options)
        .unwrap_or_else(|| DEFAULT_HOSTS.to_string());
    parse_hosts(&hosts_string)
}

pub fn set_timeout(
    option: &Option<String>,
    changed_options: &mut HashMap<&'static str, String>,
) -> Result<Duration>
{
    let timeout_string = resolve_setting("timeout", option, "ZKCHECK_TIMEOUT", changed_options)
        .unwrap_or_else(|| DEFAULT_TIMEOUT_SECS.to_string());
    let seconds: u64 = timeout_string
        .parse()
        .with_context(|| format!("Invalid timeout: '{}', expected a number of seconds", timeout_string))?;
    Ok(Duration::from_secs(seconds))
}

/// The parallelism; None means one thread per host.
pub fn set_parallel(
    option: &Option<String>,
    changed_options: &mut HashMap<&'static str, String>,
) -> Result<Option<usize>>
{
    resolve_setting("parallel", option, "ZKCHECK_PARALLEL", changed_options)
        .map(|parallel_string| {
            parallel_string
                .parse::<usize>()
                .with_context(|| format!("Invalid parallel: '{}'", parallel_string))
        })
        .transpose()
}

/// Persist the settings that were set by option or environment to `.env`, when requested.
pub fn dotenv_writer(
    write_dotenv: bool,
    changed_options: HashMap<&str, String>,
) -> Result<()>
{
    if write_dotenv && !changed_options.is_empty() {
        write_settings(Path::new(".env"), &changed_options)?;
    }
    Ok(())
}

/// Write the settings as `KEY=value` lines, sorted by key, replacing the file.
fn write_settings(
    path: &Path,
    settings: &HashMap<&str, String>,
) -> Result<()>
{
    let mut keys: Vec<&&str> = settings.keys().collect();
    keys.sort();
    let contents: String = keys
        .into_iter()
        .map(|key| format!("{}={}\n", key, settings[*key]))
        .collect();
    fs::write(path, contents)
        .with_context(|| format!("Error writing settings file: {}", path.display()))?;
    info!("settings written to {}: {:?}", path.display(), settings);
    Ok(())
}
