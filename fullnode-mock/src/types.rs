/// Wire types for the mocked full-node and blob-store surfaces

use serde::{Deserialize, Serialize};

/// Kind discriminator for policy objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    Allowlist,
    Subscription,
}

/// A policy object as served by the full node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyObject {
    pub id: String,
    pub kind: PolicyKind,
    pub name: String,
    pub owner: String,
    #[serde(default)]
    pub members: Vec<String>,
    #[serde(default)]
    pub fee: u64,
    #[serde(default)]
    pub ttl_ms: u64,
    #[serde(default)]
    pub blobs: Vec<String>,
}

/// Admin capability owned by an address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapRecord {
    pub cap_id: String,
    pub policy_id: String,
    pub kind: PolicyKind,
    pub owner: String,
}

/// Subscription token owned by an address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionToken {
    pub id: String,
    pub service_id: String,
    pub owner: String,
    pub created_at_ms: i64,
    pub ttl_ms: u64,
}

// ============================================================================
// Request/response bodies
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateAllowlistRequest {
    pub sender: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateServiceRequest {
    pub sender: String,
    pub name: String,
    pub fee: u64,
    pub ttl_ms: u64,
}

#[derive(Debug, Serialize)]
pub struct CreatedPolicyResponse {
    pub object_id: String,
    pub cap_id: String,
}

#[derive(Debug, Deserialize)]
pub struct MemberChangeRequest {
    pub cap_id: String,
    pub object_id: String,
    pub member: String,
}

#[derive(Debug, Deserialize)]
pub struct AttachBlobRequest {
    pub cap_id: String,
    pub object_id: String,
    pub blob_id: String,
}

#[derive(Debug, Deserialize)]
pub struct SubscribeRequest {
    pub sender: String,
    pub service_id: String,
}

#[derive(Debug, Serialize)]
pub struct StoredBlobResponse {
    pub blob_id: String,
}

#[derive(Debug, Serialize)]
pub struct RequestCountResponse {
    pub requests: u64,
}

#[derive(Debug, Deserialize)]
pub struct OwnedObjectsQuery {
    #[serde(default)]
    pub kind: Option<PolicyKind>,
}
