//! Page components
//!
//! One function per mounted destination. All of them take an
//! `AuthenticatedSession`, so nothing here can run while the wallet is
//! disconnected; the gate has already decided by the time a page renders.

pub mod allowlist;
pub mod subscription;

use gatehouse::{
    AuthenticatedSession, FeatureCard, FeatureFamily, HandoffStore, OwnedPolicy, PageView,
    RouteOutcome, UploadPanel,
};

use crate::blobstore::PublisherClient;
use crate::chain::ChainClient;
use crate::error::GatewayError;

/// Shared resources the pages borrow from the manager.
pub struct PageContext<'a> {
    pub chain: &'a ChainClient,
    pub blobs: &'a PublisherClient,
    pub handoff: &'a HandoffStore,
}

/// Render a dispatched route outcome into a page view.
pub async fn render(
    ctx: &PageContext<'_>,
    session: &AuthenticatedSession,
    outcome: RouteOutcome,
) -> Result<PageView, GatewayError> {
    match outcome {
        RouteOutcome::Landing => Ok(landing()),
        RouteOutcome::Create(family) => Ok(PageView::Create { family }),
        RouteOutcome::Admin { family, id } => admin(ctx, session, family, &id).await,
        RouteOutcome::AdminList(family) => admin_list(ctx, session, family).await,
        RouteOutcome::View { family, id } => match family {
            FeatureFamily::Allowlist => allowlist::feed(ctx, session, &id).await,
            FeatureFamily::Subscription => subscription::feed(ctx, session, &id).await,
        },
        RouteOutcome::NotFound => Ok(PageView::Empty),
    }
}

fn landing() -> PageView {
    let features = FeatureFamily::ALL
        .into_iter()
        .map(|family| FeatureCard {
            family,
            title: match family {
                FeatureFamily::Allowlist => "Allowlist-gated content",
                FeatureFamily::Subscription => "Subscription-gated content",
            },
            path: format!("/{}", family.route_prefix()),
        })
        .collect();
    PageView::Landing { features }
}

/// Administration page: load the policy object, check the caller holds its
/// admin capability, then refresh the family's hand-off slot so the sibling
/// upload panel has something to work with.
async fn admin(
    ctx: &PageContext<'_>,
    session: &AuthenticatedSession,
    family: FeatureFamily,
    id: &str,
) -> Result<PageView, GatewayError> {
    let policy = ctx.chain.get_policy(id).await?;
    if policy.kind != family {
        return Err(GatewayError::WrongFamily {
            id: id.to_string(),
            family,
        });
    }

    let caps = ctx.chain.owned_caps(&session.address).await?;
    let cap = caps
        .into_iter()
        .find(|cap| cap.policy_id == policy.id)
        .ok_or_else(|| GatewayError::NoAdminCap(policy.id.clone()))?;

    // Overwrite both fields of this family's slot on every successful load.
    ctx.handoff.set_policy_object_id(family, policy.id.clone());
    ctx.handoff.set_cap_id(family, cap.cap_id);
    let slot = ctx.handoff.snapshot(family);

    let upload = UploadPanel {
        policy_object: slot.policy_object_id,
        cap_id: slot.cap_id,
        module_name: family.module_name(),
    };
    let panel = match family {
        FeatureFamily::Allowlist => allowlist::panel(policy),
        FeatureFamily::Subscription => subscription::panel(policy),
    };

    Ok(PageView::Admin {
        family,
        panel,
        upload,
    })
}

async fn admin_list(
    ctx: &PageContext<'_>,
    session: &AuthenticatedSession,
    family: FeatureFamily,
) -> Result<PageView, GatewayError> {
    let owned = ctx
        .chain
        .owned_policies(&session.address, family)
        .await?
        .into_iter()
        .map(|policy| OwnedPolicy {
            id: policy.id,
            name: policy.name,
        })
        .collect();
    Ok(PageView::AdminList { family, owned })
}
