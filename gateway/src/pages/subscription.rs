//! Subscription-family pages.

use chrono::Utc;
use gatehouse::{
    AccessStatus, AuthenticatedSession, FeatureFamily, FeedEntry, FeedView, PageView, PolicyPanel,
};

use super::PageContext;
use crate::chain::PolicyObject;
use crate::error::GatewayError;

pub(crate) fn panel(policy: PolicyObject) -> PolicyPanel {
    PolicyPanel::Subscription {
        id: policy.id,
        name: policy.name,
        fee: policy.fee,
        ttl_ms: policy.ttl_ms,
    }
}

/// Consumer feed: access requires an unexpired subscription token for this
/// service, checked against wall-clock time at render.
pub async fn feed(
    ctx: &PageContext<'_>,
    session: &AuthenticatedSession,
    id: &str,
) -> Result<PageView, GatewayError> {
    let policy = ctx.chain.get_policy(id).await?;
    if policy.kind != FeatureFamily::Subscription {
        return Err(GatewayError::WrongFamily {
            id: id.to_string(),
            family: FeatureFamily::Subscription,
        });
    }

    let tokens = ctx.chain.owned_subscriptions(&session.address).await?;
    let now_ms = Utc::now().timestamp_millis();
    let mut held = tokens.iter().filter(|t| t.service_id == policy.id).peekable();

    let access = if held.peek().is_none() {
        AccessStatus::NoSubscription
    } else if held.any(|t| t.is_active_at(now_ms)) {
        AccessStatus::Granted
    } else {
        AccessStatus::Expired
    };

    let entries = match access {
        AccessStatus::Granted => policy
            .blobs
            .iter()
            .map(|blob_id| FeedEntry {
                blob_id: blob_id.clone(),
                blob_url: ctx.blobs.blob_url(blob_id),
            })
            .collect(),
        _ => Vec::new(),
    };

    Ok(PageView::Feed {
        family: FeatureFamily::Subscription,
        feed: FeedView {
            policy_id: policy.id,
            name: policy.name,
            viewer: session.address.clone(),
            access,
            entries,
        },
    })
}
