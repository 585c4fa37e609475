//! End-to-end tests for the config handler: real sockets, a mock
//! provisioning backend, and the gateway router in front of it.

use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tunnel_forge_gateway::cli::Mode;
use tunnel_forge_gateway::config::{BackendConfig, GatewayConfig, VerifierConfig};
use tunnel_forge_gateway::routes::{self, AppState};
use tunnel_forge_proto::ServerEndpoint;

/// Mock HTTP peer serving a fixed JSON reply on one route.
async fn spawn_json_server(path: &str, status: u16, body: Value) -> SocketAddr {
    let app = Router::new().route(
        path,
        post(move || {
            let body = body.clone();
            async move {
                (
                    axum::http::StatusCode::from_u16(status).unwrap(),
                    Json(body),
                )
            }
        }),
    );
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Mock provisioning backend.
async fn spawn_backend(status: u16, body: Value) -> SocketAddr {
    spawn_json_server("/api/config", status, body).await
}

/// Mock identity verifier for the app id used by `verifying_gateway_config`.
async fn spawn_verifier(status: u16, body: Value) -> SocketAddr {
    spawn_json_server("/api/v2/verify/app_test", status, body).await
}

fn gateway_config(mode: Mode, backend_addr: Option<SocketAddr>) -> GatewayConfig {
    GatewayConfig {
        mode,
        backend: backend_addr.map(|addr| BackendConfig {
            url: format!("http://{addr}/api/config"),
            token: "test-token".to_string(),
        }),
        backend_timeout: Duration::from_secs(2),
        fallback_endpoint: ServerEndpoint::new("5.144.179.145", 51820),
        countries: vec!["Finland".to_string()],
        verifier: VerifierConfig {
            base_url: None,
            app_id: None,
        },
    }
}

fn verifying_gateway_config(verifier_addr: SocketAddr) -> GatewayConfig {
    let mut config = gateway_config(Mode::Mock, None);
    config.verifier = VerifierConfig {
        base_url: Some(format!("http://{verifier_addr}")),
        app_id: Some("app_test".to_string()),
    };
    config
}

async fn spawn_gateway(config: GatewayConfig) -> SocketAddr {
    let state = Arc::new(AppState::new(config).unwrap());
    let app = routes::router(state);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn request_config(gateway: SocketAddr, body: Value) -> (u16, Value) {
    let client = reqwest::Client::new();
    let response = client
        .post(format!("http://{gateway}/api/config"))
        .json(&body)
        .send()
        .await
        .unwrap();
    let status = response.status().as_u16();
    let body: Value = response.json().await.unwrap();
    (status, body)
}

#[tokio::test]
async fn test_provider_config_passes_through_verbatim() {
    let backend = spawn_backend(
        200,
        json!({ "status": 200, "config": "PROVIDER-CONFIG", "country": "Finland" }),
    )
    .await;
    let gateway = spawn_gateway(gateway_config(Mode::Proxy, Some(backend))).await;

    let (status, body) = request_config(
        gateway,
        json!({ "country": "Finland", "protocol": "wireguard", "userId": "u1" }),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["source"], "provider");
    assert_eq!(body["config"], "PROVIDER-CONFIG");
}

#[tokio::test]
async fn test_backend_error_falls_back_to_mock() {
    let backend = spawn_backend(500, json!({ "error": "boom" })).await;
    let gateway = spawn_gateway(gateway_config(Mode::Proxy, Some(backend))).await;

    let (status, body) = request_config(
        gateway,
        json!({ "country": "Finland", "protocol": "wireguard", "userId": "u1" }),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["source"], "mock");
    assert_eq!(body["protocol"], "wireguard");
    let config = body["config"].as_str().unwrap();
    assert!(config.contains("[Interface]"));
    assert!(config.contains("Endpoint = 5.144.179.145:51820"));
}

#[tokio::test]
async fn test_malformed_backend_body_falls_back_to_mock() {
    let backend = spawn_backend(200, json!({ "unexpected": true })).await;
    let gateway = spawn_gateway(gateway_config(Mode::Proxy, Some(backend))).await;

    let (status, body) = request_config(
        gateway,
        json!({ "country": "Finland", "protocol": "vless", "userId": "u1" }),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["source"], "mock");
    assert!(body["config"].as_str().unwrap().starts_with("vless://"));
}

#[tokio::test]
async fn test_unreachable_backend_falls_back_to_mock() {
    // Port from a listener we immediately drop: connection refused.
    let dead = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let dead_addr = dead.local_addr().unwrap();
    drop(dead);

    let gateway = spawn_gateway(gateway_config(Mode::Proxy, Some(dead_addr))).await;

    let (status, body) =
        request_config(gateway, json!({ "country": "Finland", "userId": "u1" })).await;

    assert_eq!(status, 200);
    assert_eq!(body["source"], "mock");
}

#[tokio::test]
async fn test_mock_mode_never_contacts_a_backend() {
    let gateway = spawn_gateway(gateway_config(Mode::Mock, None)).await;

    let (status, body) = request_config(
        gateway,
        json!({ "country": "Finland", "protocol": "shadowsocks", "userId": "u1" }),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["source"], "mock");
    assert!(body["config"].as_str().unwrap().starts_with("ss://"));
}

#[tokio::test]
async fn test_unsupported_country_is_rejected() {
    let gateway = spawn_gateway(gateway_config(Mode::Mock, None)).await;

    let (status, body) =
        request_config(gateway, json!({ "country": "Atlantis", "userId": "u1" })).await;

    assert_eq!(status, 400);
    assert_eq!(body["error"], "Country not supported");
}

#[tokio::test]
async fn test_unknown_protocol_selector_serves_wireguard() {
    let gateway = spawn_gateway(gateway_config(Mode::Mock, None)).await;

    let (status, body) = request_config(
        gateway,
        json!({ "country": "Finland", "protocol": "carrier-pigeon", "userId": "u1" }),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["protocol"], "wireguard");
    assert!(body["config"].as_str().unwrap().contains("[Peer]"));
}

async fn request_verify(gateway: SocketAddr, body: Value) -> (u16, Value) {
    let client = reqwest::Client::new();
    let response = client
        .post(format!("http://{gateway}/api/verify"))
        .json(&body)
        .send()
        .await
        .unwrap();
    let status = response.status().as_u16();
    let body: Value = response.json().await.unwrap();
    (status, body)
}

#[tokio::test]
async fn test_verify_refuses_without_app_id() {
    let gateway = spawn_gateway(gateway_config(Mode::Mock, None)).await;

    let (status, _) =
        request_verify(gateway, json!({ "payload": {}, "action": "claim-config" })).await;

    assert_eq!(status, 503);
}

#[tokio::test]
async fn test_verify_passes_accepted_verdict_through() {
    let verifier = spawn_verifier(200, json!({ "success": true, "nullifier_hash": "0xabc" })).await;
    let gateway = spawn_gateway(verifying_gateway_config(verifier)).await;

    let (status, body) = request_verify(
        gateway,
        json!({ "payload": { "proof": "0xdeadbeef" }, "action": "claim-config" }),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["status"], 200);
    assert_eq!(body["verifyRes"]["success"], true);
    assert_eq!(body["verifyRes"]["nullifier_hash"], "0xabc");
}

#[tokio::test]
async fn test_verify_maps_rejected_proof_to_400() {
    let verifier = spawn_verifier(400, json!({ "code": "invalid_proof" })).await;
    let gateway = spawn_gateway(verifying_gateway_config(verifier)).await;

    let (status, body) = request_verify(
        gateway,
        json!({ "payload": { "proof": "0xbad" }, "action": "claim-config" }),
    )
    .await;

    assert_eq!(status, 400);
    assert_eq!(body["verifyRes"]["code"], "invalid_proof");
}

#[tokio::test]
async fn test_verify_unreachable_verifier_is_a_bad_gateway() {
    // Port from a listener we immediately drop: connection refused.
    let dead = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let dead_addr = dead.local_addr().unwrap();
    drop(dead);

    let gateway = spawn_gateway(verifying_gateway_config(dead_addr)).await;

    let (status, body) = request_verify(
        gateway,
        json!({ "payload": { "proof": "0xdeadbeef" }, "action": "claim-config" }),
    )
    .await;

    assert_eq!(status, 502);
    assert_eq!(body["error"], "Verifier unreachable");
}

#[tokio::test]
async fn test_verify_rejects_non_object_payload() {
    let verifier = spawn_verifier(200, json!({ "success": true })).await;
    let gateway = spawn_gateway(verifying_gateway_config(verifier)).await;

    let (status, body) = request_verify(
        gateway,
        json!({ "payload": "not-a-proof", "action": "claim-config" }),
    )
    .await;

    assert_eq!(status, 400);
    assert_eq!(body["error"], "Proof payload must be a JSON object");
}

#[tokio::test]
async fn test_healthz_reports_mode() {
    let gateway = spawn_gateway(gateway_config(Mode::Mock, None)).await;

    let body: Value = reqwest::get(format!("http://{gateway}/healthz"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["mode"], "mock");
}
