//! Serialized page views.
//!
//! What one render of the application shows for a given session and path.
//! These are plain data: the gateway's page modules fill them in from the
//! external collaborators.

use serde::Serialize;

use crate::family::FeatureFamily;

/// Props handed to the upload panel mounted next to an administration page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadPanel {
    pub policy_object: String,
    pub cap_id: String,
    pub module_name: &'static str,
}

/// One of the two cards on the landing page.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureCard {
    pub family: FeatureFamily,
    pub title: &'static str,
    pub path: String,
}

/// Administration panel contents for one policy object.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PolicyPanel {
    Allowlist {
        id: String,
        name: String,
        members: Vec<String>,
    },
    Subscription {
        id: String,
        name: String,
        fee: u64,
        ttl_ms: u64,
    },
}

/// Summary row in an owned-policies list.
#[derive(Debug, Clone, Serialize)]
pub struct OwnedPolicy {
    pub id: String,
    pub name: String,
}

/// Whether the viewer may read a feed, and if not, why.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessStatus {
    Granted,
    /// Allowlist flow: the viewer is not on the list.
    NotListed,
    /// Subscription flow: the viewer holds no token for this service.
    NoSubscription,
    /// Subscription flow: the viewer's token is past its lifetime.
    Expired,
}

/// Entry in a consumer feed.
#[derive(Debug, Clone, Serialize)]
pub struct FeedEntry {
    pub blob_id: String,
    pub blob_url: String,
}

/// Consumer-facing feed for a policy object.
#[derive(Debug, Clone, Serialize)]
pub struct FeedView {
    pub policy_id: String,
    pub name: String,
    pub viewer: String,
    pub access: AccessStatus,
    /// Populated only when access is granted.
    pub entries: Vec<FeedEntry>,
}

/// What one render of the application shows.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum PageView {
    /// Wallet not connected: prompt only, nothing else is mounted.
    Placeholder { message: String },
    Landing { features: Vec<FeatureCard> },
    Create { family: FeatureFamily },
    Admin {
        family: FeatureFamily,
        panel: PolicyPanel,
        upload: UploadPanel,
    },
    AdminList {
        family: FeatureFamily,
        owned: Vec<OwnedPolicy>,
    },
    Feed {
        family: FeatureFamily,
        feed: FeedView,
    },
    /// Unmatched path under a mounted router: render nothing.
    Empty,
}
