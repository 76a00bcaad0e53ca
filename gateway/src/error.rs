use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use gatehouse::FeatureFamily;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Wallet not connected")]
    NotConnected,

    #[error("Policy object not found: {0}")]
    PolicyNotFound(String),

    #[error("Policy object {id} does not belong to the {family} flow")]
    WrongFamily { id: String, family: FeatureFamily },

    #[error("No admin capability for policy object: {0}")]
    NoAdminCap(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Full node error: {0}")]
    Chain(String),

    #[error("Blob store error: {0}")]
    BlobStore(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            GatewayError::NotConnected => (StatusCode::UNAUTHORIZED, self.to_string()),
            GatewayError::PolicyNotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            GatewayError::WrongFamily { .. } => (StatusCode::NOT_FOUND, self.to_string()),
            GatewayError::NoAdminCap(_) => (StatusCode::FORBIDDEN, self.to_string()),
            GatewayError::InvalidInput(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            GatewayError::Network(_) => (StatusCode::SERVICE_UNAVAILABLE, self.to_string()),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
