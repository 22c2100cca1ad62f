use std::time::Duration;
use tc2ads_core::ams::{AddrError, AmsAddr};

/// The TCP port an ADS device listens on (48898).
pub const ADS_TCP_PORT: u16 = 0xBF02;

/// Where and as whom to talk: the device's IP plus the AMS addresses
/// stamped into every packet.
///
/// The AMS addresses are logical - the target's is configured on the device
/// (conventionally its IP with `.1.1` appended, port 851 for the PLC
/// runtime), the source's merely has to be consistent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdsConnection {
    target_ip: String,
    target: AmsAddr,
    source: AmsAddr,
    tcp_port: u16,
}

impl AdsConnection {
    pub fn new(target_ip: impl Into<String>, target: AmsAddr, source: AmsAddr) -> Self {
        Self {
            target_ip: target_ip.into(),
            target,
            source,
            tcp_port: ADS_TCP_PORT,
        }
    }

    /// Builds a connection from display-form AMS addresses, e.g.
    /// `AdsConnection::parse("10.0.0.1", "5.0.0.0.1.1:851", "10.33.0.1.1.1:32733")`.
    pub fn parse(target_ip: &str, target_ams: &str, source_ams: &str) -> Result<Self, AddrError> {
        Ok(Self::new(
            target_ip,
            target_ams.parse()?,
            source_ams.parse()?,
        ))
    }

    /// Overrides the TCP port, which is [`ADS_TCP_PORT`] unless the device
    /// sits behind a forwarder.
    pub fn with_tcp_port(mut self, port: u16) -> Self {
        self.tcp_port = port;
        self
    }

    pub fn target_ip(&self) -> &str {
        &self.target_ip
    }

    pub fn target(&self) -> AmsAddr {
        self.target
    }

    pub fn source(&self) -> AmsAddr {
        self.source
    }

    pub fn tcp_port(&self) -> u16 {
        self.tcp_port
    }
}

/// Time budgets for the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    /// TCP connect budget.
    pub connect: Duration,
    /// How long one request may wait for its response.
    pub response: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(2),
            response: Duration::from_secs(10),
        }
    }
}
