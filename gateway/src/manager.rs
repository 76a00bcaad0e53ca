use gatehouse::{
    gate, AppRouter, FeatureFamily, GateOutcome, AuthenticatedSession, HandoffStore, PageView,
    PolicyHandoff, SessionProvider, WalletSession,
};
use serde::Serialize;

use crate::blobstore::PublisherClient;
use crate::chain::{ChainClient, CreatedPolicy, SubscriptionToken};
use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::pages::{self, PageContext};

/// Blobs are stored for a single epoch in this demo.
pub const DEFAULT_STORE_EPOCHS: u64 = 1;

/// Result of an upload request.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UploadOutcome {
    /// The family's hand-off slot is empty: nothing is selected yet, so no
    /// upload was attempted.
    NothingSelected,
    Stored {
        blob_id: String,
        blob_url: String,
        policy_object: String,
    },
}

/// Application orchestrator.
///
/// Owns the session provider, the hand-off store, the page router and the
/// collaborator clients; the HTTP layer delegates everything here. The gate
/// is evaluated at the top of every operation; pages and feature calls only
/// exist behind it.
pub struct AppManager {
    pub config: GatewayConfig,
    sessions: SessionProvider,
    handoff: HandoffStore,
    router: AppRouter,
    chain: ChainClient,
    blobs: PublisherClient,
}

impl AppManager {
    pub fn new(config: GatewayConfig) -> Self {
        let endpoints = &config.network.endpoints;
        let chain = ChainClient::new(endpoints.fullnode_url.clone());
        let blobs = PublisherClient::new(
            endpoints.publisher_url.clone(),
            endpoints.aggregator_url.clone(),
        );

        Self {
            config,
            sessions: SessionProvider::new(),
            handoff: HandoffStore::new(),
            router: AppRouter::new(),
            chain,
            blobs,
        }
    }

    // ========================================================================
    // Session surface
    // ========================================================================

    pub fn connect(&self, address: String) -> Result<WalletSession, GatewayError> {
        if address.trim().is_empty() {
            return Err(GatewayError::InvalidInput("empty wallet address".into()));
        }
        let session = self.sessions.connect(address);
        log::info!("Wallet connected: {:?}", session.address);
        Ok(session)
    }

    pub fn disconnect(&self) -> WalletSession {
        log::info!("Wallet disconnected");
        self.sessions.disconnect()
    }

    pub fn session(&self) -> WalletSession {
        self.sessions.snapshot()
    }

    /// Current hand-off slot for a family. The upload panel and tests read
    /// through this; only the admin pages write.
    pub fn handoff(&self, family: FeatureFamily) -> PolicyHandoff {
        self.handoff.snapshot(family)
    }

    fn require_session(&self) -> Result<AuthenticatedSession, GatewayError> {
        match gate::evaluate(&self.sessions.snapshot()) {
            GateOutcome::Authenticated(session) => Ok(session),
            GateOutcome::Unauthenticated => Err(GatewayError::NotConnected),
        }
    }

    // ========================================================================
    // Page rendering
    // ========================================================================

    /// Render the page for an in-app path.
    ///
    /// The gate runs before dispatch: while disconnected the placeholder
    /// comes back and neither the router nor any page code executes, so no
    /// collaborator call can fire.
    pub async fn render_page(&self, path: &str) -> Result<PageView, GatewayError> {
        let session = match gate::evaluate(&self.sessions.snapshot()) {
            GateOutcome::Unauthenticated => {
                return Ok(PageView::Placeholder {
                    message: "Connect your wallet to access the demo applications.".to_string(),
                });
            }
            GateOutcome::Authenticated(session) => session,
        };

        let outcome = self.router.dispatch(path);
        let ctx = PageContext {
            chain: &self.chain,
            blobs: &self.blobs,
            handoff: &self.handoff,
        };
        pages::render(&ctx, &session, outcome).await
    }

    // ========================================================================
    // Feature operations
    // ========================================================================

    pub async fn create_allowlist(&self, name: &str) -> Result<CreatedPolicy, GatewayError> {
        let session = self.require_session()?;
        if name.trim().is_empty() {
            return Err(GatewayError::InvalidInput("empty allowlist name".into()));
        }
        let created = self.chain.create_allowlist(&session.address, name).await?;
        log::info!("Allowlist created: {}", created.object_id);
        Ok(created)
    }

    pub async fn create_service(
        &self,
        name: &str,
        fee: u64,
        ttl_ms: u64,
    ) -> Result<CreatedPolicy, GatewayError> {
        let session = self.require_session()?;
        if name.trim().is_empty() {
            return Err(GatewayError::InvalidInput("empty service name".into()));
        }
        if ttl_ms == 0 {
            return Err(GatewayError::InvalidInput(
                "subscription lifetime must be positive".into(),
            ));
        }
        let created = self
            .chain
            .create_service(&session.address, name, fee, ttl_ms)
            .await?;
        log::info!("Subscription service created: {}", created.object_id);
        Ok(created)
    }

    pub async fn add_member(&self, allowlist_id: &str, member: &str) -> Result<(), GatewayError> {
        self.require_session()?;
        let cap_id = self.held_cap(FeatureFamily::Allowlist, allowlist_id)?;
        self.chain.add_member(&cap_id, allowlist_id, member).await
    }

    pub async fn remove_member(
        &self,
        allowlist_id: &str,
        member: &str,
    ) -> Result<(), GatewayError> {
        self.require_session()?;
        let cap_id = self.held_cap(FeatureFamily::Allowlist, allowlist_id)?;
        self.chain
            .remove_member(&cap_id, allowlist_id, member)
            .await
    }

    pub async fn subscribe(&self, service_id: &str) -> Result<SubscriptionToken, GatewayError> {
        let session = self.require_session()?;
        self.chain.subscribe(&session.address, service_id).await
    }

    /// Store an upload and attach it to the policy the family's admin page
    /// selected. With an empty slot this is a no-op by contract: the panel
    /// has nothing selected, so no collaborator is contacted.
    pub async fn upload(
        &self,
        family: FeatureFamily,
        bytes: Vec<u8>,
    ) -> Result<UploadOutcome, GatewayError> {
        self.require_session()?;

        let slot = self.handoff.snapshot(family);
        if !slot.is_set() {
            return Ok(UploadOutcome::NothingSelected);
        }
        if bytes.is_empty() {
            return Err(GatewayError::InvalidInput("empty upload body".into()));
        }

        let stored = self.blobs.put_blob(bytes, DEFAULT_STORE_EPOCHS).await?;
        self.chain
            .attach_blob(&slot.cap_id, &slot.policy_object_id, &stored.blob_id)
            .await?;
        log::info!(
            "Blob {} attached to {} ({})",
            stored.blob_id,
            slot.policy_object_id,
            family.module_name()
        );

        Ok(UploadOutcome::Stored {
            blob_url: self.blobs.blob_url(&stored.blob_id),
            blob_id: stored.blob_id,
            policy_object: slot.policy_object_id,
        })
    }

    /// The capability for mutating a policy comes from the hand-off slot the
    /// admin page filled; operations on a policy the admin page has not
    /// loaded are refused.
    fn held_cap(&self, family: FeatureFamily, policy_id: &str) -> Result<String, GatewayError> {
        let slot = self.handoff.snapshot(family);
        if !slot.is_set() || slot.policy_object_id != policy_id {
            return Err(GatewayError::NoAdminCap(policy_id.to_string()));
        }
        Ok(slot.cap_id)
    }
}
