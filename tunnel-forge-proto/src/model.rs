//! Core model types
//!
//! - ProtocolKind: the tunnel protocol family a generated profile targets
//! - ServerEndpoint: where a client should connect
//! - UserContext: opaque caller identity, used only for display credentials
//! - ConfigDocument: the text artifact handed back to the client

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tunnel protocol family for a connection profile.
///
/// The set is closed; anything outside it resolves to [`ProtocolKind::Wireguard`]
/// via [`ProtocolKind::from_str_lossy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProtocolKind {
    Wireguard,
    Vmess,
    Vless,
    Trojan,
    Shadowsocks,
    HttpTunnel,
    SocksTunnel,
    Mixed,
}

impl ProtocolKind {
    /// Every supported protocol, in declaration order.
    pub const ALL: [ProtocolKind; 8] = [
        ProtocolKind::Wireguard,
        ProtocolKind::Vmess,
        ProtocolKind::Vless,
        ProtocolKind::Trojan,
        ProtocolKind::Shadowsocks,
        ProtocolKind::HttpTunnel,
        ProtocolKind::SocksTunnel,
        ProtocolKind::Mixed,
    ];

    /// Stable identifier used on the wire and in labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProtocolKind::Wireguard => "wireguard",
            ProtocolKind::Vmess => "vmess",
            ProtocolKind::Vless => "vless",
            ProtocolKind::Trojan => "trojan",
            ProtocolKind::Shadowsocks => "shadowsocks",
            ProtocolKind::HttpTunnel => "http-tunnel",
            ProtocolKind::SocksTunnel => "socks-tunnel",
            ProtocolKind::Mixed => "mixed",
        }
    }

    /// Parse a protocol selector, falling back to WireGuard for anything
    /// unrecognized. The fallback is policy, not an error: a client sending
    /// an unknown selector still gets a usable profile.
    pub fn from_str_lossy(s: &str) -> ProtocolKind {
        match s.trim().to_ascii_lowercase().as_str() {
            "wireguard" => ProtocolKind::Wireguard,
            "vmess" => ProtocolKind::Vmess,
            "vless" => ProtocolKind::Vless,
            "trojan" => ProtocolKind::Trojan,
            "shadowsocks" => ProtocolKind::Shadowsocks,
            "http-tunnel" => ProtocolKind::HttpTunnel,
            "socks-tunnel" => ProtocolKind::SocksTunnel,
            "mixed" => ProtocolKind::Mixed,
            _ => ProtocolKind::Wireguard,
        }
    }
}

impl fmt::Display for ProtocolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Server a generated profile points at. Immutable, supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerEndpoint {
    /// Domain name or IP address
    pub host: String,
    /// Port the tunnel listener is reachable on
    pub port: u16,
    /// TLS server name, when it differs from `host`
    pub tls_server_name: Option<String>,
}

impl ServerEndpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            tls_server_name: None,
        }
    }

    pub fn with_tls_server_name(mut self, sni: impl Into<String>) -> Self {
        self.tls_server_name = Some(sni.into());
        self
    }

    /// Server name to put in SNI fields: the explicit TLS name if set,
    /// otherwise the host itself.
    pub fn sni(&self) -> &str {
        self.tls_server_name.as_deref().unwrap_or(&self.host)
    }

    /// Parse a `host:port` string, as taken from flags or environment.
    pub fn from_host_port(s: &str) -> Result<Self, crate::ProtoError> {
        let (host, port_str) = s
            .rsplit_once(':')
            .ok_or_else(|| crate::ProtoError::InvalidEndpoint(s.to_string()))?;
        if host.is_empty() {
            return Err(crate::ProtoError::InvalidEndpoint(s.to_string()));
        }
        let port: u16 = port_str
            .parse()
            .map_err(|_| crate::ProtoError::InvalidPort(port_str.to_string()))?;
        Ok(Self::new(host, port))
    }
}

impl fmt::Display for ServerEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Opaque caller identity. Only ever used to derive display labels and
/// credentials in mock mode; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserContext {
    pub user_id: String,
}

impl UserContext {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}

/// Where a served config came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    /// Issued by the real provisioning backend, passed through verbatim
    Provider,
    /// Synthesized locally; structurally valid but non-functional demo data
    Mock,
}

impl ConfigSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigSource::Provider => "provider",
            ConfigSource::Mock => "mock",
        }
    }
}

/// A generated connection profile. Stateless output: nothing links it to
/// stored state, and secret material inside it is never reused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigDocument {
    pub protocol: ProtocolKind,
    pub source: ConfigSource,
    pub contents: String,
}
