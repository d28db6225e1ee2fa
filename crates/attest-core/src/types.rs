use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use uuid::Uuid;

/// An issued credential record.
///
/// Not a cryptographic artifact — an administrative record binding a
/// (name, email, credentialType) triple to an issuance event. JSON field
/// names are camelCase to match the wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    /// Globally unique, immutable once assigned.
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub credential_type: String,
    /// Opaque caller-supplied key/value data; never interpreted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
    /// Worker that performed issuance, for auditability.
    pub issued_by: String,
    pub issued_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Credential {
    /// The uniqueness key for duplicate detection.
    pub fn identity_key(&self) -> IdentityKey {
        IdentityKey::new(&self.name, &self.email, &self.credential_type)
    }

    /// Metadata with absence normalized to an empty map — responses never
    /// carry a null metadata field.
    pub fn metadata_or_empty(&self) -> Map<String, Value> {
        self.metadata.clone().unwrap_or_default()
    }
}

/// The (name, email, credentialType) triple used for uniqueness and
/// duplicate detection. The store must never hold two records sharing all
/// three values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdentityKey {
    pub name: String,
    pub email: String,
    pub credential_type: String,
}

impl IdentityKey {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        credential_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            credential_type: credential_type.into(),
        }
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.name, self.email, self.credential_type)
    }
}
