//! Attest Store — the persistence boundary for credential records.
//!
//! Operations consume the [`CredentialStore`] trait only; the shipped
//! backend is the DashMap-based [`MemoryStore`].

pub mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use uuid::Uuid;

use attest_core::{Credential, IdentityKey};

/// Storage errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The uniqueness constraint on (name, email, credentialType) was hit.
    /// Carries the record already stored under that key so callers can
    /// report the conflict without a second lookup.
    #[error("credential already exists for identity key {key}", key = .0.identity_key())]
    Duplicate(Credential),

    /// Any other backend failure.
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Persistence contract for credential records.
///
/// `insert` is the source of truth for the uniqueness invariant: two
/// concurrent inserts of the same identity key must yield exactly one
/// success and one [`StoreError::Duplicate`].
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Look up a record by its (name, email, credentialType) triple.
    async fn find_by_key(&self, key: &IdentityKey) -> Result<Option<Credential>, StoreError>;

    /// Look up a record by id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Credential>, StoreError>;

    /// Insert a new record, enforcing identity-key uniqueness.
    async fn insert(&self, credential: Credential) -> Result<(), StoreError>;
}
