use gatehouse::FeatureFamily;
use serde::{Deserialize, Serialize};

/// A policy object as served by the full node.
///
/// One struct covers both kinds; the kind tag says which of the optional
/// field groups is meaningful (members for allowlists, fee/ttl for
/// subscription services).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyObject {
    pub id: String,
    pub kind: FeatureFamily,
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

/// Admin capability reference owned by an address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapRef {
    pub cap_id: String,
    pub policy_id: String,
    pub kind: FeatureFamily,
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

impl SubscriptionToken {
    pub fn expires_at_ms(&self) -> i64 {
        self.created_at_ms + self.ttl_ms as i64
    }

    pub fn is_active_at(&self, now_ms: i64) -> bool {
        now_ms < self.expires_at_ms()
    }
}

/// Result of a create transaction: the new policy object and the admin
/// capability minted for its creator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedPolicy {
    pub object_id: String,
    pub cap_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_expiry_boundary() {
        let token = SubscriptionToken {
            id: "0xSUB".to_string(),
            service_id: "0xSVC".to_string(),
            owner: "0xBOB".to_string(),
            created_at_ms: 1_000,
            ttl_ms: 500,
        };
        assert!(token.is_active_at(1_499));
        assert!(!token.is_active_at(1_500));
    }
}
