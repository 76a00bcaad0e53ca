use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ConnectRequest {
    pub address: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateAllowlistRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateServiceRequest {
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
pub struct AddMemberRequest {
    pub address: String,
}

#[derive(Debug, Serialize)]
pub struct MemberChangeResponse {
    pub allowlist_id: String,
    pub member: String,
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct SubscribeResponse {
    pub subscription_id: String,
    pub service_id: String,
    pub expires_at_ms: i64,
}
