//! Allowlist-family pages.

use gatehouse::{
    AccessStatus, AuthenticatedSession, FeatureFamily, FeedEntry, FeedView, PageView, PolicyPanel,
};

use super::PageContext;
use crate::chain::PolicyObject;
use crate::error::GatewayError;

pub(crate) fn panel(policy: PolicyObject) -> PolicyPanel {
    PolicyPanel::Allowlist {
        id: policy.id,
        name: policy.name,
        members: policy.members,
    }
}

/// Consumer feed: membership decides access; entries are listed only for
/// members.
pub async fn feed(
    ctx: &PageContext<'_>,
    session: &AuthenticatedSession,
    id: &str,
) -> Result<PageView, GatewayError> {
    let policy = ctx.chain.get_policy(id).await?;
    if policy.kind != FeatureFamily::Allowlist {
        return Err(GatewayError::WrongFamily {
            id: id.to_string(),
            family: FeatureFamily::Allowlist,
        });
    }

    let access = if policy.members.iter().any(|m| m == &session.address) {
        AccessStatus::Granted
    } else {
        AccessStatus::NotListed
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
        family: FeatureFamily::Allowlist,
        feed: FeedView {
            policy_id: policy.id,
            name: policy.name,
            viewer: session.address.clone(),
            access,
            entries,
        },
    })
}
