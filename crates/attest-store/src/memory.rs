//! In-memory credential store backed by DashMap.

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use uuid::Uuid;

use attest_core::{Credential, IdentityKey};

use crate::{CredentialStore, StoreError};

/// DashMap-backed store. Identity-key uniqueness is enforced at insert time
/// through the key index's entry API, so concurrent duplicate inserts
/// resolve to exactly one winner.
#[derive(Default)]
pub struct MemoryStore {
    /// Credential id → record.
    by_id: DashMap<Uuid, Credential>,
    /// Identity key → credential id.
    by_key: DashMap<IdentityKey, Uuid>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn count(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn find_by_key(&self, key: &IdentityKey) -> Result<Option<Credential>, StoreError> {
        let Some(id) = self.by_key.get(key).map(|e| *e.value()) else {
            return Ok(None);
        };
        Ok(self.by_id.get(&id).map(|e| e.value().clone()))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Credential>, StoreError> {
        Ok(self.by_id.get(&id).map(|e| e.value().clone()))
    }

    async fn insert(&self, credential: Credential) -> Result<(), StoreError> {
        let key = credential.identity_key();
        match self.by_key.entry(key) {
            Entry::Occupied(slot) => {
                let existing_id = *slot.get();
                let existing = self
                    .by_id
                    .get(&existing_id)
                    .map(|e| e.value().clone())
                    .ok_or_else(|| {
                        StoreError::Backend(format!(
                            "identity index references missing record {existing_id}"
                        ))
                    })?;
                Err(StoreError::Duplicate(existing))
            }
            Entry::Vacant(slot) => {
                self.by_id.insert(credential.id, credential.clone());
                slot.insert(credential.id);
                Ok(())
            }
        }
    }
}
