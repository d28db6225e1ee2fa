//! HTTP API server for the Attest node.
//!
//! Maps the transport-agnostic operation outcomes onto HTTP: 400 for
//! validation failures, 201/409 for issuance, 200/404 for verification, 500
//! with a generic body for store failures.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use uuid::Uuid;

use attest_core::{Credential, FieldError};
use attest_service::{
    IssuanceService, IssueOutcome, IssueRequest, ServiceError, VerificationService, VerifyOutcome,
    VerifyRequest,
};
use attest_store::CredentialStore;

/// Shared handler state: the two operations over one store.
#[derive(Clone)]
pub struct AppState {
    pub issuer: Arc<IssuanceService>,
    pub verifier: Arc<VerificationService>,
}

impl AppState {
    pub fn new(store: Arc<dyn CredentialStore>, worker_id: &str) -> Self {
        Self {
            issuer: Arc::new(IssuanceService::new(store.clone(), worker_id)),
            verifier: Arc::new(VerificationService::new(store, worker_id)),
        }
    }
}

// --- Response types ---

#[derive(Serialize)]
struct HealthResponse {
    status: String,
}

#[derive(Serialize)]
struct ValidationFailedResponse {
    success: bool,
    message: &'static str,
    errors: Vec<FieldError>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CredentialBody {
    id: Uuid,
    name: String,
    email: String,
    credential_type: String,
    /// Always a map in responses; absent metadata becomes `{}`.
    metadata: Map<String, Value>,
    issued_by: String,
    issued_at: DateTime<Utc>,
}

impl From<Credential> for CredentialBody {
    fn from(credential: Credential) -> Self {
        let metadata = credential.metadata_or_empty();
        Self {
            id: credential.id,
            name: credential.name,
            email: credential.email,
            credential_type: credential.credential_type,
            metadata,
            issued_by: credential.issued_by,
            issued_at: credential.issued_at,
        }
    }
}

#[derive(Serialize)]
struct IssuedResponse {
    success: bool,
    message: String,
    credential: CredentialBody,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExistingCredentialBody {
    id: Uuid,
    issued_by: String,
    issued_at: DateTime<Utc>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConflictResponse {
    success: bool,
    message: &'static str,
    existing_credential: ExistingCredentialBody,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VerifyResponse {
    valid: bool,
    message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    credential: Option<CredentialBody>,
    verified_by: String,
    verified_at: DateTime<Utc>,
}

#[derive(Serialize)]
struct InternalErrorResponse {
    success: bool,
    message: &'static str,
}

// --- Handlers ---

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
    })
}

async fn handle_issue(State(state): State<AppState>, Json(body): Json<Value>) -> Response {
    // Requests are picked apart from the raw JSON so wrong-typed fields
    // surface as field errors, never as an extractor rejection.
    let valid = match IssueRequest::from_value(&body).validate() {
        Ok(valid) => valid,
        Err(errors) => return validation_failed(errors),
    };

    match state.issuer.issue(valid).await {
        Ok(IssueOutcome::Issued(credential)) => {
            let message = format!("credential issued by {}", credential.issued_by);
            (
                StatusCode::CREATED,
                Json(IssuedResponse {
                    success: true,
                    message,
                    credential: credential.into(),
                }),
            )
                .into_response()
        }
        Ok(IssueOutcome::Conflict(existing)) => (
            StatusCode::CONFLICT,
            Json(ConflictResponse {
                success: false,
                message: "Credential already issued",
                existing_credential: ExistingCredentialBody {
                    id: existing.id,
                    issued_by: existing.issued_by,
                    issued_at: existing.issued_at,
                },
            }),
        )
            .into_response(),
        Err(e) => internal_error("credential issuance failed", e),
    }
}

async fn handle_verify(State(state): State<AppState>, Json(body): Json<Value>) -> Response {
    let valid = match VerifyRequest::from_value(&body).validate() {
        Ok(valid) => valid,
        Err(errors) => return validation_failed(errors),
    };

    match state.verifier.verify(valid).await {
        Ok(outcome) => {
            let message = outcome.message();
            match outcome {
                VerifyOutcome::Verified {
                    credential,
                    verified_by,
                    verified_at,
                } => (
                    StatusCode::OK,
                    Json(VerifyResponse {
                        valid: true,
                        message,
                        credential: Some(credential.into()),
                        verified_by,
                        verified_at,
                    }),
                )
                    .into_response(),
                VerifyOutcome::Invalid {
                    verified_by,
                    verified_at,
                } => (
                    StatusCode::NOT_FOUND,
                    Json(VerifyResponse {
                        valid: false,
                        message,
                        credential: None,
                        verified_by,
                        verified_at,
                    }),
                )
                    .into_response(),
            }
        }
        Err(e) => internal_error("credential verification failed", e),
    }
}

fn validation_failed(errors: Vec<FieldError>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ValidationFailedResponse {
            success: false,
            message: "Validation failed",
            errors,
        }),
    )
        .into_response()
}

/// Log the failure with full detail; the caller only sees a generic message.
fn internal_error(context: &str, error: ServiceError) -> Response {
    tracing::error!(error = %error, "{}", context);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(InternalErrorResponse {
            success: false,
            message: "Internal server error",
        }),
    )
        .into_response()
}

// --- Server ---

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/issuance/credentials", post(handle_issue))
        .route("/verification/credentials", post(handle_verify))
        .with_state(state)
}

pub async fn start_api_server(listen_addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(listen_addr).await?;
    tracing::info!(%listen_addr, "HTTP API server started");
    axum::serve(listener, app).await?;
    Ok(())
}
