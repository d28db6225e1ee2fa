//! Attest Service — validation, issuance, and verification of credential
//! records.

pub mod error;
pub mod issuer;
pub mod validate;
pub mod verifier;

pub use error::ServiceError;
pub use issuer::{ExistingCredential, IssuanceService, IssueOutcome};
pub use validate::{
    IssueRequest, ValidIssueRequest, ValidVerifyRequest, VerifyRequest,
};
pub use verifier::{VerificationService, VerifyOutcome};
