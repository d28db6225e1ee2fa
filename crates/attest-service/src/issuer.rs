use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use attest_core::{Credential, IdentityKey};
use attest_store::{CredentialStore, StoreError};

use crate::error::ServiceError;
use crate::validate::ValidIssueRequest;

/// Summary of an already-issued record, returned on conflict.
#[derive(Debug, Clone, PartialEq)]
pub struct ExistingCredential {
    pub id: Uuid,
    pub issued_by: String,
    pub issued_at: DateTime<Utc>,
}

impl From<&Credential> for ExistingCredential {
    fn from(credential: &Credential) -> Self {
        Self {
            id: credential.id,
            issued_by: credential.issued_by.clone(),
            issued_at: credential.issued_at,
        }
    }
}

/// Outcome of an issuance attempt. Conflict is domain-expected, not a
/// failure.
#[derive(Debug, Clone)]
pub enum IssueOutcome {
    /// A new record was persisted.
    Issued(Credential),
    /// A record with the same identity key already exists; nothing was
    /// written and no id was generated for the request.
    Conflict(ExistingCredential),
}

/// Issues credential records against a store.
pub struct IssuanceService {
    store: Arc<dyn CredentialStore>,
    /// Identity of this worker, stamped on every issued record. Injected at
    /// construction so the operation carries no environment coupling.
    worker_id: String,
}

impl IssuanceService {
    pub fn new(store: Arc<dyn CredentialStore>, worker_id: impl Into<String>) -> Self {
        Self {
            store,
            worker_id: worker_id.into(),
        }
    }

    pub fn worker_id(&self) -> &str {
        &self.worker_id
    }

    /// Issue a credential for a validated request.
    ///
    /// The lookup ahead of the insert is a fast path; the store's uniqueness
    /// constraint is the source of truth. A duplicate reported by the insert
    /// itself (a concurrent issuance won the race) yields the same conflict
    /// outcome as a pre-check hit.
    pub async fn issue(&self, request: ValidIssueRequest) -> Result<IssueOutcome, ServiceError> {
        let key = IdentityKey::new(&request.name, &request.email, &request.credential_type);

        if let Some(existing) = self.store.find_by_key(&key).await? {
            tracing::info!(
                existing_id = %existing.id,
                worker = %self.worker_id,
                "duplicate credential found"
            );
            return Ok(IssueOutcome::Conflict(ExistingCredential::from(&existing)));
        }

        let now = Utc::now();
        let credential = Credential {
            id: Uuid::new_v4(),
            name: request.name,
            email: request.email,
            credential_type: request.credential_type,
            metadata: request.metadata,
            issued_by: self.worker_id.clone(),
            issued_at: now,
            created_at: now,
            updated_at: now,
        };

        match self.store.insert(credential.clone()).await {
            Ok(()) => {
                tracing::info!(
                    credential_id = %credential.id,
                    worker = %self.worker_id,
                    "credential issued"
                );
                Ok(IssueOutcome::Issued(credential))
            }
            Err(StoreError::Duplicate(existing)) => {
                tracing::info!(
                    existing_id = %existing.id,
                    worker = %self.worker_id,
                    "concurrent issuance won the identity key"
                );
                Ok(IssueOutcome::Conflict(ExistingCredential::from(&existing)))
            }
            Err(e) => Err(ServiceError::Store(e)),
        }
    }
}
