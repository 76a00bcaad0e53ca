/// In-memory ledger backing the mock
///
/// Holds policy objects, admin capabilities, subscription tokens and stored
/// blobs behind a single lock. Every operation increments a request counter
/// so tests can assert that nothing touched the collaborators.

use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use thiserror::Error;
use uuid::Uuid;

use crate::types::{CapRecord, PolicyKind, PolicyObject, SubscriptionToken};

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Capability check failed: {0}")]
    Forbidden(String),

    #[error("Invalid request: {0}")]
    Invalid(String),
}

#[derive(Default)]
struct LedgerState {
    objects: HashMap<String, PolicyObject>,
    caps: HashMap<String, CapRecord>,
    subscriptions: Vec<SubscriptionToken>,
    blobs: HashMap<String, Vec<u8>>,
}

pub struct Ledger {
    inner: RwLock<LedgerState>,
    requests: AtomicU64,
}

fn mint_id() -> String {
    format!("0x{}", Uuid::new_v4().simple())
}

impl Ledger {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(LedgerState::default()),
            requests: AtomicU64::new(0),
        }
    }

    /// Number of ledger/blob operations served so far. Not itself counted.
    pub fn request_count(&self) -> u64 {
        self.requests.load(Ordering::SeqCst)
    }

    fn note_request(&self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
    }

    // ========================================================================
    // Object creation
    // ========================================================================

    pub fn create_allowlist(
        &self,
        sender: &str,
        name: &str,
    ) -> Result<(String, String), LedgerError> {
        self.note_request();
        if sender.is_empty() || name.is_empty() {
            return Err(LedgerError::Invalid("sender and name are required".into()));
        }

        let mut state = self.inner.write().expect("ledger lock poisoned");
        let object_id = mint_id();
        let cap_id = mint_id();
        state.objects.insert(
            object_id.clone(),
            PolicyObject {
                id: object_id.clone(),
                kind: PolicyKind::Allowlist,
                name: name.to_string(),
                owner: sender.to_string(),
                members: Vec::new(),
                fee: 0,
                ttl_ms: 0,
                blobs: Vec::new(),
            },
        );
        state.caps.insert(
            cap_id.clone(),
            CapRecord {
                cap_id: cap_id.clone(),
                policy_id: object_id.clone(),
                kind: PolicyKind::Allowlist,
                owner: sender.to_string(),
            },
        );
        log::info!("Allowlist created: {} (cap {})", object_id, cap_id);
        Ok((object_id, cap_id))
    }

    pub fn create_service(
        &self,
        sender: &str,
        name: &str,
        fee: u64,
        ttl_ms: u64,
    ) -> Result<(String, String), LedgerError> {
        self.note_request();
        if sender.is_empty() || name.is_empty() {
            return Err(LedgerError::Invalid("sender and name are required".into()));
        }
        if ttl_ms == 0 {
            return Err(LedgerError::Invalid("ttl_ms must be positive".into()));
        }

        let mut state = self.inner.write().expect("ledger lock poisoned");
        let object_id = mint_id();
        let cap_id = mint_id();
        state.objects.insert(
            object_id.clone(),
            PolicyObject {
                id: object_id.clone(),
                kind: PolicyKind::Subscription,
                name: name.to_string(),
                owner: sender.to_string(),
                members: Vec::new(),
                fee,
                ttl_ms,
                blobs: Vec::new(),
            },
        );
        state.caps.insert(
            cap_id.clone(),
            CapRecord {
                cap_id: cap_id.clone(),
                policy_id: object_id.clone(),
                kind: PolicyKind::Subscription,
                owner: sender.to_string(),
            },
        );
        log::info!("Service created: {} (cap {})", object_id, cap_id);
        Ok((object_id, cap_id))
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn get_object(&self, id: &str) -> Result<PolicyObject, LedgerError> {
        self.note_request();
        let state = self.inner.read().expect("ledger lock poisoned");
        state
            .objects
            .get(id)
            .cloned()
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))
    }

    pub fn owned_caps(&self, address: &str) -> Vec<CapRecord> {
        self.note_request();
        let state = self.inner.read().expect("ledger lock poisoned");
        state
            .caps
            .values()
            .filter(|cap| cap.owner == address)
            .cloned()
            .collect()
    }

    pub fn owned_objects(&self, address: &str, kind: Option<PolicyKind>) -> Vec<PolicyObject> {
        self.note_request();
        let state = self.inner.read().expect("ledger lock poisoned");
        state
            .objects
            .values()
            .filter(|obj| obj.owner == address)
            .filter(|obj| kind.map_or(true, |k| obj.kind == k))
            .cloned()
            .collect()
    }

    pub fn owned_subscriptions(&self, address: &str) -> Vec<SubscriptionToken> {
        self.note_request();
        let state = self.inner.read().expect("ledger lock poisoned");
        state
            .subscriptions
            .iter()
            .filter(|sub| sub.owner == address)
            .cloned()
            .collect()
    }

    // ========================================================================
    // Capability-checked mutations
    // ========================================================================

    fn check_cap(
        state: &LedgerState,
        cap_id: &str,
        object_id: &str,
    ) -> Result<(), LedgerError> {
        let cap = state
            .caps
            .get(cap_id)
            .ok_or_else(|| LedgerError::Forbidden(format!("unknown capability {cap_id}")))?;
        if cap.policy_id != object_id {
            return Err(LedgerError::Forbidden(format!(
                "capability {cap_id} does not govern {object_id}"
            )));
        }
        Ok(())
    }

    pub fn add_member(
        &self,
        cap_id: &str,
        object_id: &str,
        member: &str,
    ) -> Result<(), LedgerError> {
        self.note_request();
        let mut state = self.inner.write().expect("ledger lock poisoned");
        Self::check_cap(&state, cap_id, object_id)?;
        let object = state
            .objects
            .get_mut(object_id)
            .ok_or_else(|| LedgerError::NotFound(object_id.to_string()))?;
        if object.kind != PolicyKind::Allowlist {
            return Err(LedgerError::Invalid(format!(
                "{object_id} is not an allowlist"
            )));
        }
        if !object.members.iter().any(|m| m == member) {
            object.members.push(member.to_string());
        }
        Ok(())
    }

    pub fn remove_member(
        &self,
        cap_id: &str,
        object_id: &str,
        member: &str,
    ) -> Result<(), LedgerError> {
        self.note_request();
        let mut state = self.inner.write().expect("ledger lock poisoned");
        Self::check_cap(&state, cap_id, object_id)?;
        let object = state
            .objects
            .get_mut(object_id)
            .ok_or_else(|| LedgerError::NotFound(object_id.to_string()))?;
        if object.kind != PolicyKind::Allowlist {
            return Err(LedgerError::Invalid(format!(
                "{object_id} is not an allowlist"
            )));
        }
        object.members.retain(|m| m != member);
        Ok(())
    }

    pub fn attach_blob(
        &self,
        cap_id: &str,
        object_id: &str,
        blob_id: &str,
    ) -> Result<(), LedgerError> {
        self.note_request();
        let mut state = self.inner.write().expect("ledger lock poisoned");
        Self::check_cap(&state, cap_id, object_id)?;
        if !state.blobs.contains_key(blob_id) {
            return Err(LedgerError::Invalid(format!("unknown blob {blob_id}")));
        }
        let object = state
            .objects
            .get_mut(object_id)
            .ok_or_else(|| LedgerError::NotFound(object_id.to_string()))?;
        if !object.blobs.iter().any(|b| b == blob_id) {
            object.blobs.push(blob_id.to_string());
        }
        Ok(())
    }

    pub fn subscribe(
        &self,
        sender: &str,
        service_id: &str,
    ) -> Result<SubscriptionToken, LedgerError> {
        self.note_request();
        let mut state = self.inner.write().expect("ledger lock poisoned");
        let service = state
            .objects
            .get(service_id)
            .ok_or_else(|| LedgerError::NotFound(service_id.to_string()))?;
        if service.kind != PolicyKind::Subscription {
            return Err(LedgerError::Invalid(format!(
                "{service_id} is not a subscription service"
            )));
        }
        let token = SubscriptionToken {
            id: mint_id(),
            service_id: service_id.to_string(),
            owner: sender.to_string(),
            created_at_ms: Utc::now().timestamp_millis(),
            ttl_ms: service.ttl_ms,
        };
        state.subscriptions.push(token.clone());
        log::info!("Subscription {} issued for {}", token.id, service_id);
        Ok(token)
    }

    // ========================================================================
    // Blob store
    // ========================================================================

    pub fn put_blob(&self, bytes: Vec<u8>) -> Result<String, LedgerError> {
        self.note_request();
        if bytes.is_empty() {
            return Err(LedgerError::Invalid("empty blob".into()));
        }
        let blob_id = mint_id();
        let mut state = self.inner.write().expect("ledger lock poisoned");
        state.blobs.insert(blob_id.clone(), bytes);
        Ok(blob_id)
    }

    pub fn blob(&self, id: &str) -> Result<Vec<u8>, LedgerError> {
        self.note_request();
        let state = self.inner.read().expect("ledger lock poisoned");
        state
            .blobs
            .get(id)
            .cloned()
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_must_govern_the_object() {
        let ledger = Ledger::new();
        let (list_a, _cap_a) = ledger.create_allowlist("0xALICE", "a").unwrap();
        let (_list_b, cap_b) = ledger.create_allowlist("0xALICE", "b").unwrap();

        let err = ledger.add_member(&cap_b, &list_a, "0xBOB").unwrap_err();
        assert!(matches!(err, LedgerError::Forbidden(_)));
    }

    #[test]
    fn test_attach_requires_stored_blob() {
        let ledger = Ledger::new();
        let (list, cap) = ledger.create_allowlist("0xALICE", "a").unwrap();
        let err = ledger.attach_blob(&cap, &list, "0xMISSING").unwrap_err();
        assert!(matches!(err, LedgerError::Invalid(_)));

        let blob_id = ledger.put_blob(b"data".to_vec()).unwrap();
        ledger.attach_blob(&cap, &list, &blob_id).unwrap();
        assert_eq!(ledger.get_object(&list).unwrap().blobs, vec![blob_id]);
    }

    #[test]
    fn test_operations_are_counted() {
        let ledger = Ledger::new();
        assert_eq!(ledger.request_count(), 0);
        ledger.create_allowlist("0xALICE", "a").unwrap();
        let _ = ledger.owned_caps("0xALICE");
        assert_eq!(ledger.request_count(), 2);
    }
}
