//! Pre-flight connectivity check.
//!
//! The search screen asks [`Connectivity::is_network_available`] synchronously
//! before every fetch. The default [`TcpProbe`] resolves the API host and tries
//! a TCP connect with a short timeout.

use std::net::{IpAddr, SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use pustaka_core::AppConfig;

/// Answers whether a fetch is worth attempting right now.
pub trait Connectivity: Send + Sync {
    fn is_network_available(&self) -> bool;
}

/// Check whether an address can only reach this machine.
///
/// A resolver that answers with loopback or unspecified addresses (captive
/// portals, hosts-file sinkholes) is treated as offline.
pub fn is_local_only(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => v4.is_loopback() || v4.is_unspecified() || v4.octets()[0] == 0,
        IpAddr::V6(v6) => v6.is_loopback() || v6.is_unspecified(),
    }
}

/// TCP reachability probe against a `host:port`.
#[derive(Debug, Clone)]
pub struct TcpProbe {
    target: String,
    timeout: Duration,
    allow_local: bool,
}

impl TcpProbe {
    pub fn new(target: impl Into<String>, timeout: Duration) -> Self {
        Self { target: target.into(), timeout, allow_local: false }
    }

    /// Accept loopback answers, for probing a local API stand-in.
    pub fn allow_local(mut self, allow: bool) -> Self {
        self.allow_local = allow;
        self
    }

    fn candidates(&self) -> Vec<SocketAddr> {
        match self.target.to_socket_addrs() {
            Ok(addrs) => addrs
                .filter(|addr| self.allow_local || !is_local_only(addr.ip()))
                .collect(),
            Err(e) => {
                tracing::debug!(probe = %self.target, "connectivity probe: resolve failed: {e}");
                Vec::new()
            }
        }
    }
}

impl From<&AppConfig> for TcpProbe {
    fn from(config: &AppConfig) -> Self {
        Self::new(config.probe_host.clone(), config.probe_timeout())
    }
}

impl Connectivity for TcpProbe {
    fn is_network_available(&self) -> bool {
        let available = self
            .candidates()
            .iter()
            .any(|addr| TcpStream::connect_timeout(addr, self.timeout).is_ok());

        tracing::debug!(probe = %self.target, available, "connectivity probe");
        available
    }
}
