use serde::Serialize;
use std::sync::RwLock;

use crate::family::FeatureFamily;

/// The policy object and capability selected by an administration page, to
/// be consumed by the upload panel. Empty strings mean nothing is selected
/// yet; the upload panel must treat that as "waiting", not as an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PolicyHandoff {
    pub policy_object_id: String,
    pub cap_id: String,
}

impl PolicyHandoff {
    pub fn is_set(&self) -> bool {
        !self.policy_object_id.is_empty() && !self.cap_id.is_empty()
    }
}

/// Hand-off state between an administration page and its sibling upload
/// panel.
///
/// One slot per feature family: an administration page writes only its own
/// family's slot and an upload for family F reads only slot F, so values
/// selected under one family can never flow into the other family's upload,
/// regardless of navigation order. Setters replace the whole string; there
/// are no partial updates and no validation at this layer.
pub struct HandoffStore {
    allowlist: RwLock<PolicyHandoff>,
    subscription: RwLock<PolicyHandoff>,
}

impl HandoffStore {
    pub fn new() -> Self {
        Self {
            allowlist: RwLock::new(PolicyHandoff::default()),
            subscription: RwLock::new(PolicyHandoff::default()),
        }
    }

    fn slot(&self, family: FeatureFamily) -> &RwLock<PolicyHandoff> {
        match family {
            FeatureFamily::Allowlist => &self.allowlist,
            FeatureFamily::Subscription => &self.subscription,
        }
    }

    pub fn set_policy_object_id(&self, family: FeatureFamily, id: impl Into<String>) {
        self.slot(family)
            .write()
            .expect("handoff lock poisoned")
            .policy_object_id = id.into();
    }

    pub fn set_cap_id(&self, family: FeatureFamily, id: impl Into<String>) {
        self.slot(family)
            .write()
            .expect("handoff lock poisoned")
            .cap_id = id.into();
    }

    pub fn snapshot(&self, family: FeatureFamily) -> PolicyHandoff {
        self.slot(family)
            .read()
            .expect("handoff lock poisoned")
            .clone()
    }

    pub fn clear(&self, family: FeatureFamily) {
        *self.slot(family).write().expect("handoff lock poisoned") = PolicyHandoff::default();
    }
}

impl Default for HandoffStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_unset() {
        let store = HandoffStore::new();
        for family in FeatureFamily::ALL {
            assert!(!store.snapshot(family).is_set());
        }
    }

    #[test]
    fn test_setters_replace_whole_value() {
        let store = HandoffStore::new();
        store.set_policy_object_id(FeatureFamily::Allowlist, "0x123");
        store.set_cap_id(FeatureFamily::Allowlist, "0xCAP1");
        store.set_cap_id(FeatureFamily::Allowlist, "0xCAP2");

        let slot = store.snapshot(FeatureFamily::Allowlist);
        assert_eq!(slot.policy_object_id, "0x123");
        assert_eq!(slot.cap_id, "0xCAP2");
        assert!(slot.is_set());
    }

    #[test]
    fn test_families_are_isolated() {
        let store = HandoffStore::new();
        store.set_policy_object_id(FeatureFamily::Allowlist, "0x123");
        store.set_cap_id(FeatureFamily::Allowlist, "0xCAP1");

        assert!(!store.snapshot(FeatureFamily::Subscription).is_set());

        store.set_policy_object_id(FeatureFamily::Subscription, "0xSVC");
        store.set_cap_id(FeatureFamily::Subscription, "0xCAP9");
        let allowlist = store.snapshot(FeatureFamily::Allowlist);
        assert_eq!(allowlist.policy_object_id, "0x123");
        assert_eq!(allowlist.cap_id, "0xCAP1");
    }

    #[test]
    fn test_half_set_slot_is_not_set() {
        let store = HandoffStore::new();
        store.set_policy_object_id(FeatureFamily::Subscription, "0xSVC");
        assert!(!store.snapshot(FeatureFamily::Subscription).is_set());
    }

    #[test]
    fn test_clear_resets_to_sentinel() {
        let store = HandoffStore::new();
        store.set_policy_object_id(FeatureFamily::Allowlist, "0x123");
        store.set_cap_id(FeatureFamily::Allowlist, "0xCAP1");
        store.clear(FeatureFamily::Allowlist);
        assert_eq!(
            store.snapshot(FeatureFamily::Allowlist),
            PolicyHandoff::default()
        );
    }
}
