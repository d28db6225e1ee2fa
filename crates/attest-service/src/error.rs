use attest_store::StoreError;

/// Operation errors.
///
/// Validation failures and domain-expected outcomes (conflict, not-valid)
/// are not errors; only unexpected persistence failures land here. The
/// transport surfaces these as a generic internal failure and must not leak
/// detail to the caller.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
