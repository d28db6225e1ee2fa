use chrono::{DateTime, Utc};
use std::sync::Arc;

use attest_core::Credential;
use attest_store::CredentialStore;

use crate::error::ServiceError;
use crate::validate::ValidVerifyRequest;

/// Outcome of a verification call.
///
/// A missing id and a name/email mismatch produce the same `Invalid` value:
/// callers must not be able to probe whether an id exists by supplying wrong
/// details.
#[derive(Debug, Clone)]
pub enum VerifyOutcome {
    Verified {
        credential: Credential,
        verified_by: String,
        verified_at: DateTime<Utc>,
    },
    Invalid {
        verified_by: String,
        verified_at: DateTime<Utc>,
    },
}

impl VerifyOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Verified { .. })
    }

    /// Human-readable outcome message for the response body.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Verified { .. } => "Credential verified successfully",
            Self::Invalid { .. } => "Credential not found or invalid",
        }
    }
}

/// Verifies issued credentials against a store. Read-only; verification
/// leaves no trace in the store.
pub struct VerificationService {
    store: Arc<dyn CredentialStore>,
    worker_id: String,
}

impl VerificationService {
    pub fn new(store: Arc<dyn CredentialStore>, worker_id: impl Into<String>) -> Self {
        Self {
            store,
            worker_id: worker_id.into(),
        }
    }

    pub fn worker_id(&self) -> &str {
        &self.worker_id
    }

    /// Verify that the supplied name and email match the record stored under
    /// the supplied id. Idempotent modulo the verification timestamp.
    pub async fn verify(&self, request: ValidVerifyRequest) -> Result<VerifyOutcome, ServiceError> {
        let verified_at = Utc::now();

        let Some(credential) = self.store.find_by_id(request.id).await? else {
            tracing::info!(
                credential_id = %request.id,
                worker = %self.worker_id,
                "credential not found"
            );
            return Ok(self.invalid(verified_at));
        };

        if credential.name != request.name || credential.email != request.email {
            tracing::info!(
                credential_id = %request.id,
                worker = %self.worker_id,
                "credential details mismatch"
            );
            return Ok(self.invalid(verified_at));
        }

        tracing::info!(
            credential_id = %credential.id,
            worker = %self.worker_id,
            "credential verified"
        );
        Ok(VerifyOutcome::Verified {
            credential,
            verified_by: self.worker_id.clone(),
            verified_at,
        })
    }

    fn invalid(&self, verified_at: DateTime<Utc>) -> VerifyOutcome {
        VerifyOutcome::Invalid {
            verified_by: self.worker_id.clone(),
            verified_at,
        }
    }
}
