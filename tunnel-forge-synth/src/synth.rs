//! Multi-protocol profile synthesis
//!
//! One entry point, one exit point: `synthesize` maps a protocol kind to a
//! text document in that protocol's native grammar (INI, JSON, or URI).
//! It is total over [`ProtocolKind`] and never fails; unknown protocol
//! strings are resolved to WireGuard *before* they get here, by
//! [`ProtocolKind::from_str_lossy`].

use crate::token::{alphabet_token, pseudo_key, uuid_v4};
use rand::rngs::OsRng;
use rand::{Rng, RngCore};
use serde_json::json;
use tunnel_forge_proto::{ConfigDocument, ConfigSource, ProtocolKind, ServerEndpoint, UserContext};

/// WebSocket path advertised in vmess/vless profiles.
const WS_PATH: &str = "/vpn";

/// Public resolvers handed to WireGuard clients.
const WIREGUARD_DNS: &str = "1.1.1.1, 8.8.8.8";

/// Seconds between WireGuard keepalive probes.
const WIREGUARD_KEEPALIVE: u32 = 25;

/// Fixed listen port advertised for plain HTTP tunnels.
const HTTP_TUNNEL_PORT: u16 = 8080;

/// Fixed listen port advertised for SOCKS tunnels.
const SOCKS_TUNNEL_PORT: u16 = 1080;

/// Shadowsocks AEAD method advertised in generated links.
const SS_METHOD: &str = "aes-256-gcm";

/// Synthesize a mock connection profile using the OS CSPRNG.
///
/// `label` is a human-readable tag (the requested country) woven into
/// profile names and URI fragments. The result is always tagged
/// [`ConfigSource::Mock`].
pub fn synthesize(
    protocol: ProtocolKind,
    endpoint: &ServerEndpoint,
    user: &UserContext,
    label: &str,
) -> ConfigDocument {
    synthesize_with_rng(&mut OsRng, protocol, endpoint, user, label)
}

/// Like [`synthesize`], with an injectable randomness source for tests.
pub fn synthesize_with_rng<R: RngCore>(
    rng: &mut R,
    protocol: ProtocolKind,
    endpoint: &ServerEndpoint,
    user: &UserContext,
    label: &str,
) -> ConfigDocument {
    let contents = match protocol {
        ProtocolKind::Wireguard => wireguard(rng, endpoint),
        ProtocolKind::Vmess => vmess(rng, endpoint, label),
        ProtocolKind::Vless => vless(rng, endpoint, label),
        ProtocolKind::Trojan => trojan(rng, endpoint, label),
        ProtocolKind::Shadowsocks => shadowsocks(rng, endpoint, label),
        ProtocolKind::HttpTunnel => {
            tunnel_block(rng, endpoint, user, "http-connect", HTTP_TUNNEL_PORT)
        }
        ProtocolKind::SocksTunnel => {
            tunnel_block(rng, endpoint, user, "socks5", SOCKS_TUNNEL_PORT)
        }
        ProtocolKind::Mixed => mixed(rng, endpoint, label),
    };
    ConfigDocument {
        protocol,
        source: ConfigSource::Mock,
        contents,
    }
}

/// INI-style WireGuard profile. The two keys are independent random tokens,
/// not a key pair; the address host octet is drawn uniformly from 1-254.
fn wireguard<R: RngCore>(rng: &mut R, endpoint: &ServerEndpoint) -> String {
    let private_key = pseudo_key(rng);
    let public_key = pseudo_key(rng);
    let host_octet: u8 = rng.gen_range(1..=254);
    format!(
        "[Interface]\n\
         PrivateKey = {private_key}\n\
         Address = 10.0.0.{host_octet}/24\n\
         DNS = {WIREGUARD_DNS}\n\
         \n\
         [Peer]\n\
         PublicKey = {public_key}\n\
         Endpoint = {endpoint}\n\
         AllowedIPs = 0.0.0.0/0\n\
         PersistentKeepalive = {WIREGUARD_KEEPALIVE}\n"
    )
}

/// VMess profile as a JSON object (schema version "2", ws transport, TLS).
fn vmess<R: RngCore>(rng: &mut R, endpoint: &ServerEndpoint, label: &str) -> String {
    let id = uuid_v4(rng);
    json!({
        "v": "2",
        "ps": format!("{label}-vmess"),
        "add": endpoint.host,
        "port": "443",
        "id": id.to_string(),
        "aid": "0",
        "net": "ws",
        "path": WS_PATH,
        "tls": "tls",
        "sni": endpoint.sni(),
    })
    .to_string()
}

/// `vless://` URI with TLS, ws transport, and a percent-encoded path.
fn vless<R: RngCore>(rng: &mut R, endpoint: &ServerEndpoint, label: &str) -> String {
    let id = uuid_v4(rng);
    let sni = endpoint.sni();
    let path = urlencoding::encode(WS_PATH);
    let tag = urlencoding::encode_binary(format!("{label}-vless").as_bytes()).into_owned();
    format!(
        "vless://{id}@{host}:{port}?encryption=none&security=tls&sni={sni}&type=ws&host={host}&path={path}#{tag}",
        host = endpoint.host,
        port = endpoint.port,
    )
}

/// `trojan://` URI. The password is the first 32 characters of a pseudo-key,
/// percent-encoded because the base64 alphabet collides with URI delimiters.
fn trojan<R: RngCore>(rng: &mut R, endpoint: &ServerEndpoint, label: &str) -> String {
    let key = pseudo_key(rng);
    let password = urlencoding::encode(&key[..32]).into_owned();
    let sni = endpoint.sni();
    let tag = urlencoding::encode_binary(format!("{label}-trojan").as_bytes()).into_owned();
    format!(
        "trojan://{password}@{host}:{port}?security=tls&sni={sni}#{tag}",
        host = endpoint.host,
        port = endpoint.port,
    )
}

/// `ss://` URI with `method:password` base64-encoded as userinfo (SIP002
/// style, URL-safe alphabet so the userinfo stays URI-clean).
fn shadowsocks<R: RngCore>(rng: &mut R, endpoint: &ServerEndpoint, label: &str) -> String {
    use base64::engine::general_purpose::URL_SAFE;
    use base64::Engine as _;

    let password = alphabet_token(rng, 32);
    let userinfo = URL_SAFE.encode(format!("{SS_METHOD}:{password}"));
    let tag = urlencoding::encode_binary(format!("{label}-ss").as_bytes()).into_owned();
    format!(
        "ss://{userinfo}@{host}:{port}#{tag}",
        host = endpoint.host,
        port = endpoint.port,
    )
}

/// Plain `key: value` block shared by the http-connect and socks5 shapes.
fn tunnel_block<R: RngCore>(
    rng: &mut R,
    endpoint: &ServerEndpoint,
    user: &UserContext,
    tunnel_type: &str,
    port: u16,
) -> String {
    let username = format!("tf-{}", user.user_id);
    let password = alphabet_token(rng, 16);
    format!(
        "host: {host}\n\
         port: {port}\n\
         username: {username}\n\
         password: {password}\n\
         type: {tunnel_type}\n",
        host = endpoint.host,
    )
}

/// Composite document: a primary VLESS link plus a commented Shadowsocks
/// fallback, each independently randomized.
fn mixed<R: RngCore>(rng: &mut R, endpoint: &ServerEndpoint, label: &str) -> String {
    let primary = vless(rng, endpoint, label);
    let fallback = shadowsocks(rng, endpoint, label);
    format!("{primary}\n# fallback:\n# {fallback}\n")
}
