use gatehouse::FeatureFamily;
use serde_json::json;

use super::types::{CapRef, CreatedPolicy, PolicyObject, SubscriptionToken};
use crate::error::GatewayError;

/// Thin JSON client for the full-node REST surface.
///
/// No retries and no caching; collaborator failures map straight onto typed
/// gateway errors so they surface instead of being masked.
pub struct ChainClient {
    http: reqwest::Client,
    base_url: String,
}

impl ChainClient {
    pub fn new(base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub async fn get_policy(&self, id: &str) -> Result<PolicyObject, GatewayError> {
        let url = format!("{}/objects/{}", self.base_url, id);
        let resp = self.http.get(&url).send().await.map_err(transport)?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(GatewayError::PolicyNotFound(id.to_string()));
        }
        let resp = expect_success(resp).await?;
        resp.json().await.map_err(decode)
    }

    pub async fn owned_caps(&self, address: &str) -> Result<Vec<CapRef>, GatewayError> {
        let url = format!("{}/owned/{}/caps", self.base_url, address);
        let resp = self.http.get(&url).send().await.map_err(transport)?;
        let resp = expect_success(resp).await?;
        resp.json().await.map_err(decode)
    }

    pub async fn owned_policies(
        &self,
        address: &str,
        kind: FeatureFamily,
    ) -> Result<Vec<PolicyObject>, GatewayError> {
        let url = format!(
            "{}/owned/{}/objects?kind={}",
            self.base_url,
            address,
            kind.module_name()
        );
        let resp = self.http.get(&url).send().await.map_err(transport)?;
        let resp = expect_success(resp).await?;
        resp.json().await.map_err(decode)
    }

    pub async fn owned_subscriptions(
        &self,
        address: &str,
    ) -> Result<Vec<SubscriptionToken>, GatewayError> {
        let url = format!("{}/owned/{}/subscriptions", self.base_url, address);
        let resp = self.http.get(&url).send().await.map_err(transport)?;
        let resp = expect_success(resp).await?;
        resp.json().await.map_err(decode)
    }

    // ========================================================================
    // Transactions
    // ========================================================================

    pub async fn create_allowlist(
        &self,
        sender: &str,
        name: &str,
    ) -> Result<CreatedPolicy, GatewayError> {
        let url = format!("{}/tx/create-allowlist", self.base_url);
        let resp = self
            .http
            .post(&url)
            .json(&json!({ "sender": sender, "name": name }))
            .send()
            .await
            .map_err(transport)?;
        let resp = expect_success(resp).await?;
        resp.json().await.map_err(decode)
    }

    pub async fn create_service(
        &self,
        sender: &str,
        name: &str,
        fee: u64,
        ttl_ms: u64,
    ) -> Result<CreatedPolicy, GatewayError> {
        let url = format!("{}/tx/create-service", self.base_url);
        let resp = self
            .http
            .post(&url)
            .json(&json!({
                "sender": sender,
                "name": name,
                "fee": fee,
                "ttl_ms": ttl_ms,
            }))
            .send()
            .await
            .map_err(transport)?;
        let resp = expect_success(resp).await?;
        resp.json().await.map_err(decode)
    }

    pub async fn add_member(
        &self,
        cap_id: &str,
        object_id: &str,
        member: &str,
    ) -> Result<(), GatewayError> {
        self.member_change("add-member", cap_id, object_id, member)
            .await
    }

    pub async fn remove_member(
        &self,
        cap_id: &str,
        object_id: &str,
        member: &str,
    ) -> Result<(), GatewayError> {
        self.member_change("remove-member", cap_id, object_id, member)
            .await
    }

    async fn member_change(
        &self,
        action: &str,
        cap_id: &str,
        object_id: &str,
        member: &str,
    ) -> Result<(), GatewayError> {
        let url = format!("{}/tx/{}", self.base_url, action);
        let resp = self
            .http
            .post(&url)
            .json(&json!({
                "cap_id": cap_id,
                "object_id": object_id,
                "member": member,
            }))
            .send()
            .await
            .map_err(transport)?;
        expect_success(resp).await?;
        Ok(())
    }

    pub async fn attach_blob(
        &self,
        cap_id: &str,
        object_id: &str,
        blob_id: &str,
    ) -> Result<(), GatewayError> {
        let url = format!("{}/tx/attach-blob", self.base_url);
        let resp = self
            .http
            .post(&url)
            .json(&json!({
                "cap_id": cap_id,
                "object_id": object_id,
                "blob_id": blob_id,
            }))
            .send()
            .await
            .map_err(transport)?;
        expect_success(resp).await?;
        Ok(())
    }

    pub async fn subscribe(
        &self,
        sender: &str,
        service_id: &str,
    ) -> Result<SubscriptionToken, GatewayError> {
        let url = format!("{}/tx/subscribe", self.base_url);
        let resp = self
            .http
            .post(&url)
            .json(&json!({ "sender": sender, "service_id": service_id }))
            .send()
            .await
            .map_err(transport)?;
        let resp = expect_success(resp).await?;
        resp.json().await.map_err(decode)
    }
}

fn transport(err: reqwest::Error) -> GatewayError {
    GatewayError::Network(err.to_string())
}

fn decode(err: reqwest::Error) -> GatewayError {
    GatewayError::Chain(format!("malformed response: {err}"))
}

/// Map non-success statuses onto the gateway error taxonomy, carrying the
/// collaborator's message text through.
async fn expect_success(resp: reqwest::Response) -> Result<reqwest::Response, GatewayError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(match status {
        reqwest::StatusCode::NOT_FOUND => GatewayError::PolicyNotFound(body),
        reqwest::StatusCode::FORBIDDEN => GatewayError::NoAdminCap(body),
        reqwest::StatusCode::BAD_REQUEST => GatewayError::InvalidInput(body),
        _ => GatewayError::Chain(format!("{status}: {body}")),
    })
}
