//! Request validation.
//!
//! Two independent schemas, one per operation, evaluated synchronously and
//! without side effects: a raw payload either becomes a typed record or a
//! non-empty, ordered list of field errors. Field order in the error list
//! follows schema declaration order so clients see stable output.
//!
//! Requests are built from raw JSON via [`IssueRequest::from_value`] /
//! [`VerifyRequest::from_value`]; a wrong-typed field is treated like a
//! missing one so it surfaces as a field error rather than a transport
//! rejection.

use serde_json::{Map, Value};
use uuid::Uuid;

use attest_core::FieldError;

/// Raw issuance payload as received from the transport.
#[derive(Debug, Clone, Default)]
pub struct IssueRequest {
    pub name: Option<Value>,
    pub email: Option<Value>,
    pub credential_type: Option<Value>,
    pub metadata: Option<Value>,
}

/// Raw verification payload.
#[derive(Debug, Clone, Default)]
pub struct VerifyRequest {
    pub id: Option<Value>,
    pub name: Option<Value>,
    pub email: Option<Value>,
}

/// A validated, typed issuance request.
#[derive(Debug, Clone)]
pub struct ValidIssueRequest {
    pub name: String,
    pub email: String,
    pub credential_type: String,
    pub metadata: Option<Map<String, Value>>,
}

/// A validated, typed verification request.
#[derive(Debug, Clone)]
pub struct ValidVerifyRequest {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl IssueRequest {
    /// Build from a raw JSON body. A non-object body yields a request with
    /// every field absent.
    pub fn from_value(value: &Value) -> Self {
        Self {
            name: value.get("name").cloned(),
            email: value.get("email").cloned(),
            credential_type: value.get("credentialType").cloned(),
            metadata: value.get("metadata").cloned(),
        }
    }

    /// Check the issuance schema: non-empty name, syntactically valid email,
    /// non-empty credential type, metadata an object when present.
    pub fn validate(self) -> Result<ValidIssueRequest, Vec<FieldError>> {
        let mut errors = Vec::new();

        let name = string_field(self.name);
        if name.is_empty() {
            errors.push(FieldError::new("name", "Name is required"));
        }

        let email = string_field(self.email);
        if !is_valid_email(&email) {
            errors.push(FieldError::new("email", "Valid email is required"));
        }

        let credential_type = string_field(self.credential_type);
        if credential_type.is_empty() {
            errors.push(FieldError::new(
                "credentialType",
                "Credential type is required",
            ));
        }

        let metadata = match self.metadata {
            None | Some(Value::Null) => None,
            Some(Value::Object(map)) => Some(map),
            Some(_) => {
                errors.push(FieldError::new("metadata", "Metadata must be an object"));
                None
            }
        };

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(ValidIssueRequest {
            name,
            email,
            credential_type,
            metadata,
        })
    }
}

impl VerifyRequest {
    /// Build from a raw JSON body. A non-object body yields a request with
    /// every field absent.
    pub fn from_value(value: &Value) -> Self {
        Self {
            id: value.get("id").cloned(),
            name: value.get("name").cloned(),
            email: value.get("email").cloned(),
        }
    }

    /// Check the verification schema: well-formed UUID, non-empty name,
    /// syntactically valid email.
    pub fn validate(self) -> Result<ValidVerifyRequest, Vec<FieldError>> {
        let mut errors = Vec::new();

        let id = match self.id.as_ref().and_then(Value::as_str).map(Uuid::parse_str) {
            Some(Ok(id)) => Some(id),
            _ => {
                errors.push(FieldError::new("id", "Valid UUID is required"));
                None
            }
        };

        let name = string_field(self.name);
        if name.is_empty() {
            errors.push(FieldError::new("name", "Name is required"));
        }

        let email = string_field(self.email);
        if !is_valid_email(&email) {
            errors.push(FieldError::new("email", "Valid email is required"));
        }

        match (id, errors.is_empty()) {
            (Some(id), true) => Ok(ValidVerifyRequest { id, name, email }),
            _ => Err(errors),
        }
    }
}

/// A field that must be a string; anything else reads as empty and trips
/// that field's own rule.
fn string_field(value: Option<Value>) -> String {
    match value {
        Some(Value::String(s)) => s,
        _ => String::new(),
    }
}

/// Syntactic email check: one `@`, non-empty local part, dotted domain with
/// non-empty labels, no whitespace.
fn is_valid_email(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = s.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.split('.').any(str::is_empty)
}
