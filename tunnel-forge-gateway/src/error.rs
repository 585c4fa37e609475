//! Gateway error responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use thiserror::Error;
use tunnel_forge_proto::ErrorResponse;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Country not supported")]
    UnsupportedCountry,

    #[error("Proof payload must be a JSON object")]
    InvalidProofPayload,

    #[error("Identity verification is not configured")]
    VerifierNotConfigured,

    #[error("Verifier unreachable")]
    VerifierUnreachable(#[source] reqwest::Error),
}

impl GatewayError {
    fn status(&self) -> StatusCode {
        match self {
            GatewayError::UnsupportedCountry => StatusCode::BAD_REQUEST,
            GatewayError::InvalidProofPayload => StatusCode::BAD_REQUEST,
            GatewayError::VerifierNotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            GatewayError::VerifierUnreachable(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            status: status.as_u16(),
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
