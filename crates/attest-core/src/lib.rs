//! Attest Core — shared types for the credential issuance and verification
//! services.

pub mod error;
pub mod types;

pub use error::FieldError;
pub use types::{Credential, IdentityKey};
