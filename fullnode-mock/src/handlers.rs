/// Axum HTTP handlers for the mocked full-node and blob-store endpoints

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::state::{Ledger, LedgerError};
use crate::types::*;

/// Shared application state
pub type AppState = Arc<Ledger>;

/// Custom error type for handlers
pub enum ApiError {
    NotFound(String),
    Forbidden(String),
    BadRequest(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        (status, message).into_response()
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::NotFound(_) => ApiError::NotFound(err.to_string()),
            LedgerError::Forbidden(_) => ApiError::Forbidden(err.to_string()),
            LedgerError::Invalid(_) => ApiError::BadRequest(err.to_string()),
        }
    }
}

/// GET /objects/{id}
/// Returns a policy object
pub async fn get_object(
    State(ledger): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PolicyObject>, ApiError> {
    let object = ledger.get_object(&id)?;
    Ok(Json(object))
}

/// GET /owned/{address}/caps
/// Returns the admin capabilities owned by an address
pub async fn get_owned_caps(
    State(ledger): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<Vec<CapRecord>>, ApiError> {
    Ok(Json(ledger.owned_caps(&address)))
}

/// GET /owned/{address}/objects?kind=...
/// Returns the policy objects owned by an address
pub async fn get_owned_objects(
    State(ledger): State<AppState>,
    Path(address): Path<String>,
    Query(query): Query<OwnedObjectsQuery>,
) -> Result<Json<Vec<PolicyObject>>, ApiError> {
    Ok(Json(ledger.owned_objects(&address, query.kind)))
}

/// GET /owned/{address}/subscriptions
/// Returns the subscription tokens owned by an address
pub async fn get_owned_subscriptions(
    State(ledger): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<Vec<SubscriptionToken>>, ApiError> {
    Ok(Json(ledger.owned_subscriptions(&address)))
}

/// POST /tx/create-allowlist
pub async fn create_allowlist(
    State(ledger): State<AppState>,
    Json(req): Json<CreateAllowlistRequest>,
) -> Result<Json<CreatedPolicyResponse>, ApiError> {
    let (object_id, cap_id) = ledger.create_allowlist(&req.sender, &req.name)?;
    Ok(Json(CreatedPolicyResponse { object_id, cap_id }))
}

/// POST /tx/create-service
pub async fn create_service(
    State(ledger): State<AppState>,
    Json(req): Json<CreateServiceRequest>,
) -> Result<Json<CreatedPolicyResponse>, ApiError> {
    let (object_id, cap_id) =
        ledger.create_service(&req.sender, &req.name, req.fee, req.ttl_ms)?;
    Ok(Json(CreatedPolicyResponse { object_id, cap_id }))
}

/// POST /tx/add-member
pub async fn add_member(
    State(ledger): State<AppState>,
    Json(req): Json<MemberChangeRequest>,
) -> Result<Json<()>, ApiError> {
    ledger.add_member(&req.cap_id, &req.object_id, &req.member)?;
    Ok(Json(()))
}

/// POST /tx/remove-member
pub async fn remove_member(
    State(ledger): State<AppState>,
    Json(req): Json<MemberChangeRequest>,
) -> Result<Json<()>, ApiError> {
    ledger.remove_member(&req.cap_id, &req.object_id, &req.member)?;
    Ok(Json(()))
}

/// POST /tx/attach-blob
pub async fn attach_blob(
    State(ledger): State<AppState>,
    Json(req): Json<AttachBlobRequest>,
) -> Result<Json<()>, ApiError> {
    ledger.attach_blob(&req.cap_id, &req.object_id, &req.blob_id)?;
    Ok(Json(()))
}

/// POST /tx/subscribe
pub async fn subscribe(
    State(ledger): State<AppState>,
    Json(req): Json<SubscribeRequest>,
) -> Result<Json<SubscriptionToken>, ApiError> {
    let token = ledger.subscribe(&req.sender, &req.service_id)?;
    Ok(Json(token))
}

/// PUT /v1/blobs
/// Stores a blob (raw body), returns its id
pub async fn put_blob(
    State(ledger): State<AppState>,
    body: Bytes,
) -> Result<Json<StoredBlobResponse>, ApiError> {
    let blob_id = ledger.put_blob(body.to_vec())?;
    Ok(Json(StoredBlobResponse { blob_id }))
}

/// GET /v1/blobs/{id}
/// Returns the raw blob bytes
pub async fn get_blob(
    State(ledger): State<AppState>,
    Path(id): Path<String>,
) -> Result<Vec<u8>, ApiError> {
    Ok(ledger.blob(&id)?)
}

// ============================================================================
// TEST HELPER ENDPOINTS (not part of the emulated API surface)
// ============================================================================

/// GET /debug/requests
/// Number of ledger/blob operations served so far
pub async fn request_count(State(ledger): State<AppState>) -> Json<RequestCountResponse> {
    Json(RequestCountResponse {
        requests: ledger.request_count(),
    })
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> &'static str {
    "OK"
}
