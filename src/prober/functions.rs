//! The impls and functions
//!
use std::{io::{self, Read, Write}, net::{SocketAddr, TcpStream, ToSocketAddrs}, sync::mpsc::{channel, RecvTimeoutError}, thread, time::{Duration, Instant}};
use log::*;
use crate::node_status::NodeAddress;
use crate::prober::{ConnectionError, Probe, TcpProber};

impl TcpProber {
    pub fn new() -> Self {
        Default::default()
    }
    /// Resolve the address and connect to the first socket address that accepts the connection.
    /// Every connect attempt is limited to the time left until the deadline.
    fn connect(
        address: &NodeAddress,
        deadline: Instant,
        timeout: Duration,
    ) -> Result<TcpStream, ConnectionError>
    {
        let hostname_port = address.to_string();
        let (host, port) = (address.host.clone(), address.port);
        let socket_addresses = resolve_within(
            &hostname_port,
            deadline,
            timeout,
            move || (host.as_str(), port).to_socket_addrs().map(|addresses| addresses.collect()),
        )?;

        let mut last_error = None;
        for socket_address in socket_addresses {
            let remaining = time_left(deadline)
                .ok_or_else(|| ConnectionError::Timeout { address: hostname_port.clone(), timeout })?;
            match TcpStream::connect_timeout(&socket_address, remaining) {
                Ok(stream) => return Ok(stream),
                Err(error) if is_timeout(&error) => {
                    return Err(ConnectionError::Timeout { address: hostname_port, timeout })
                }
                Err(error) => {
                    debug!("({}) connect to {} failed: {}", hostname_port, socket_address, error);
                    last_error = Some(error);
                }
            }
        }
        match last_error {
            Some(source) => Err(ConnectionError::Connect { address: hostname_port, source }),
            None => Err(ConnectionError::NoAddresses { address: hostname_port }),
        }
    }
}

impl Probe for TcpProber {
    /// Send `command` to the node and read until the node closes the connection.
    ///
    /// The timeout is a single deadline for name resolution, connect, write and read together.
    /// The stream is owned by this function, so the connection is closed on every return path.
    fn probe(
        &self,
        address: &NodeAddress,
        command: &str,
        timeout: Duration,
    ) -> Result<String, ConnectionError>
    {
        let deadline = Instant::now() + timeout;
        let hostname_port = address.to_string();
        let timed_out = || ConnectionError::Timeout { address: hostname_port.clone(), timeout };
        let io_error = |source: io::Error| {
            if is_timeout(&source) {
                ConnectionError::Timeout { address: hostname_port.clone(), timeout }
            } else {
                ConnectionError::Io { address: hostname_port.clone(), source }
            }
        };

        let mut stream = TcpProber::connect(address, deadline, timeout)?;

        stream.set_write_timeout(Some(time_left(deadline).ok_or_else(timed_out)?)).map_err(io_error)?;
        stream.write_all(command.as_bytes()).map_err(io_error)?;

        let mut response = Vec::new();
        let mut buffer = [0_u8; 4096];
        loop {
            stream.set_read_timeout(Some(time_left(deadline).ok_or_else(timed_out)?)).map_err(io_error)?;
            match stream.read(&mut buffer) {
                Ok(0) => break,
                Ok(length) => response.extend_from_slice(&buffer[..length]),
                Err(error) if error.kind() == io::ErrorKind::Interrupted => continue,
                Err(error) => return Err(io_error(error)),
            }
        }

        debug!("({}) {}: {} bytes", hostname_port, command, response.len());
        Ok(String::from_utf8_lossy(&response).into_owned())
    }
}

/// Run the name resolution on its own thread and wait for it until the deadline.
/// The system resolver cannot be interrupted, so a resolution that passes the deadline
/// is left to finish on its own, and its result is discarded.
fn resolve_within<F>(
    hostname_port: &str,
    deadline: Instant,
    timeout: Duration,
    resolver: F,
) -> Result<Vec<SocketAddr>, ConnectionError>
where
    F: FnOnce() -> io::Result<Vec<SocketAddr>> + Send + 'static,
{
    let timed_out = || ConnectionError::Timeout { address: hostname_port.to_string(), timeout };
    let remaining = time_left(deadline).ok_or_else(timed_out)?;

    let (tx, rx) = channel();
    thread::spawn(move || {
        // the receiver is gone if the deadline passed.
        let _ = tx.send(resolver());
    });

    match rx.recv_timeout(remaining) {
        Ok(Ok(socket_addresses)) => Ok(socket_addresses),
        Ok(Err(source)) => Err(ConnectionError::Resolve { address: hostname_port.to_string(), source }),
        Err(RecvTimeoutError::Timeout) => {
            debug!("({}) name resolution did not finish within {:?}", hostname_port, timeout);
            Err(timed_out())
        }
        Err(RecvTimeoutError::Disconnected) => Err(ConnectionError::Resolve {
            address: hostname_port.to_string(),
            source: io::Error::new(io::ErrorKind::Other, "resolver thread ended without a result"),
        }),
    }
}

/// The time left until the deadline, or None if the deadline has passed.
/// A zero duration is not accepted as socket timeout, so it counts as passed.
fn time_left(deadline: Instant) -> Option<Duration> {
    deadline
        .checked_duration_since(Instant::now())
        .filter(|duration| !duration.is_zero())
}

fn is_timeout(error: &io::Error) -> bool {
    matches!(error.kind(), io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock)
}
