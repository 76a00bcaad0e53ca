use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use gatehouse::{FeatureFamily, PageView, WalletSession};

use super::types::{
    AddMemberRequest, ConnectRequest, CreateAllowlistRequest, CreateServiceRequest,
    CreatedPolicyResponse, MemberChangeResponse, SubscribeResponse,
};
use crate::error::GatewayError;
use crate::manager::{AppManager, UploadOutcome};

// ============================================================================
// Session
// ============================================================================

pub async fn connect_handler(
    State(manager): State<Arc<AppManager>>,
    Json(req): Json<ConnectRequest>,
) -> Result<Json<WalletSession>, GatewayError> {
    let session = manager.connect(req.address)?;
    Ok(Json(session))
}

pub async fn disconnect_handler(
    State(manager): State<Arc<AppManager>>,
) -> Json<WalletSession> {
    Json(manager.disconnect())
}

pub async fn session_handler(State(manager): State<Arc<AppManager>>) -> Json<WalletSession> {
    Json(manager.session())
}

// ============================================================================
// Pages
// ============================================================================

pub async fn render_root_handler(
    State(manager): State<Arc<AppManager>>,
) -> Result<Json<PageView>, GatewayError> {
    let view = manager.render_page("/").await?;
    Ok(Json(view))
}

pub async fn render_page_handler(
    State(manager): State<Arc<AppManager>>,
    Path(path): Path<String>,
) -> Result<Json<PageView>, GatewayError> {
    let view = manager.render_page(&path).await?;
    Ok(Json(view))
}

// ============================================================================
// Feature operations
// ============================================================================

pub async fn create_allowlist_handler(
    State(manager): State<Arc<AppManager>>,
    Json(req): Json<CreateAllowlistRequest>,
) -> Result<Json<CreatedPolicyResponse>, GatewayError> {
    let created = manager.create_allowlist(&req.name).await?;
    Ok(Json(CreatedPolicyResponse {
        object_id: created.object_id,
        cap_id: created.cap_id,
    }))
}

pub async fn add_member_handler(
    State(manager): State<Arc<AppManager>>,
    Path(allowlist_id): Path<String>,
    Json(req): Json<AddMemberRequest>,
) -> Result<Json<MemberChangeResponse>, GatewayError> {
    manager.add_member(&allowlist_id, &req.address).await?;
    Ok(Json(MemberChangeResponse {
        allowlist_id,
        member: req.address,
        status: "added".to_string(),
    }))
}

pub async fn remove_member_handler(
    State(manager): State<Arc<AppManager>>,
    Path((allowlist_id, address)): Path<(String, String)>,
) -> Result<Json<MemberChangeResponse>, GatewayError> {
    manager.remove_member(&allowlist_id, &address).await?;
    Ok(Json(MemberChangeResponse {
        allowlist_id,
        member: address,
        status: "removed".to_string(),
    }))
}

pub async fn create_service_handler(
    State(manager): State<Arc<AppManager>>,
    Json(req): Json<CreateServiceRequest>,
) -> Result<Json<CreatedPolicyResponse>, GatewayError> {
    let created = manager
        .create_service(&req.name, req.fee, req.ttl_ms)
        .await?;
    Ok(Json(CreatedPolicyResponse {
        object_id: created.object_id,
        cap_id: created.cap_id,
    }))
}

pub async fn subscribe_handler(
    State(manager): State<Arc<AppManager>>,
    Path(service_id): Path<String>,
) -> Result<Json<SubscribeResponse>, GatewayError> {
    let token = manager.subscribe(&service_id).await?;
    Ok(Json(SubscribeResponse {
        expires_at_ms: token.expires_at_ms(),
        subscription_id: token.id,
        service_id: token.service_id,
    }))
}

/// Raw request body in, stored blob out. The feature family in the path
/// selects which hand-off slot feeds the upload.
pub async fn upload_handler(
    State(manager): State<Arc<AppManager>>,
    Path(family): Path<String>,
    body: Bytes,
) -> Result<Json<UploadOutcome>, GatewayError> {
    let family = family
        .parse::<FeatureFamily>()
        .map_err(|e| GatewayError::InvalidInput(e.to_string()))?;
    let outcome = manager.upload(family, body.to_vec()).await?;
    Ok(Json(outcome))
}
