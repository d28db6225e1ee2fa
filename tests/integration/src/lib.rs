//! Shared fixtures for the Attest integration tests.

use std::sync::Arc;
use uuid::Uuid;

use attest_service::{IssuanceService, ValidIssueRequest, ValidVerifyRequest, VerificationService};
use attest_store::MemoryStore;

pub const WORKER_ID: &str = "worker-integration";

/// A memory store with both services wired to it.
pub fn services() -> (Arc<MemoryStore>, IssuanceService, VerificationService) {
    let store = Arc::new(MemoryStore::new());
    let issuer = IssuanceService::new(store.clone(), WORKER_ID);
    let verifier = VerificationService::new(store.clone(), WORKER_ID);
    (store, issuer, verifier)
}

pub fn issue_request(name: &str, email: &str, credential_type: &str) -> ValidIssueRequest {
    ValidIssueRequest {
        name: name.into(),
        email: email.into(),
        credential_type: credential_type.into(),
        metadata: None,
    }
}

pub fn verify_request(id: Uuid, name: &str, email: &str) -> ValidVerifyRequest {
    ValidVerifyRequest {
        id,
        name: name.into(),
        email: email.into(),
    }
}
