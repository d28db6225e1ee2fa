//! End-to-end credential flow: issuance and verification over one store.

use uuid::Uuid;

use attest_integration_tests::{issue_request, services, verify_request, WORKER_ID};
use attest_service::{IssueOutcome, ValidIssueRequest, VerifyOutcome};

#[tokio::test]
async fn issue_then_verify_roundtrip() {
    let (_store, issuer, verifier) = services();

    let outcome = issuer
        .issue(issue_request(
            "John Doe",
            "john@example.com",
            "Developer Certificate",
        ))
        .await
        .unwrap();
    let IssueOutcome::Issued(credential) = outcome else {
        panic!("expected Issued");
    };
    assert_eq!(credential.issued_by, WORKER_ID);

    let outcome = verifier
        .verify(verify_request(credential.id, "John Doe", "john@example.com"))
        .await
        .unwrap();
    let VerifyOutcome::Verified {
        credential: found,
        verified_by,
        ..
    } = outcome
    else {
        panic!("expected Verified");
    };
    assert_eq!(found, credential);
    assert_eq!(verified_by, WORKER_ID);
}

#[tokio::test]
async fn sequential_duplicate_issuance_conflicts() {
    let (store, issuer, _verifier) = services();
    let request = issue_request("John Doe", "john@example.com", "Developer Certificate");

    let first = issuer.issue(request.clone()).await.unwrap();
    let second = issuer.issue(request).await.unwrap();

    let IssueOutcome::Issued(credential) = first else {
        panic!("expected Issued");
    };
    let IssueOutcome::Conflict(existing) = second else {
        panic!("expected Conflict");
    };
    // Both outcomes reference the same resulting id.
    assert_eq!(existing.id, credential.id);
    assert_eq!(store.count(), 1);
}

#[tokio::test]
async fn concurrent_duplicate_issuance_one_winner() {
    let (store, issuer, _verifier) = services();
    let request = issue_request("Jane Doe", "jane@example.com", "Auditor Certificate");

    let (a, b) = tokio::join!(issuer.issue(request.clone()), issuer.issue(request));
    let outcomes = [a.unwrap(), b.unwrap()];

    let issued: Vec<_> = outcomes
        .iter()
        .filter_map(|o| match o {
            IssueOutcome::Issued(c) => Some(c.id),
            IssueOutcome::Conflict(_) => None,
        })
        .collect();
    let conflicts: Vec<_> = outcomes
        .iter()
        .filter_map(|o| match o {
            IssueOutcome::Conflict(e) => Some(e.id),
            IssueOutcome::Issued(_) => None,
        })
        .collect();

    // Exactly one success and one conflict, never two of either.
    assert_eq!(issued.len(), 1);
    assert_eq!(conflicts.len(), 1);
    assert_eq!(issued[0], conflicts[0]);
    assert_eq!(store.count(), 1);
}

#[tokio::test]
async fn verification_hides_whether_id_exists() {
    let (_store, issuer, verifier) = services();

    let outcome = issuer
        .issue(issue_request(
            "John Doe",
            "john@example.com",
            "Developer Certificate",
        ))
        .await
        .unwrap();
    let IssueOutcome::Issued(credential) = outcome else {
        panic!("expected Issued");
    };

    let unknown_id = verifier
        .verify(verify_request(
            Uuid::new_v4(),
            "John Doe",
            "john@example.com",
        ))
        .await
        .unwrap();
    let wrong_email = verifier
        .verify(verify_request(credential.id, "John Doe", "other@example.com"))
        .await
        .unwrap();

    for outcome in [&unknown_id, &wrong_email] {
        assert!(!outcome.is_valid());
        assert_eq!(outcome.message(), "Credential not found or invalid");
        let VerifyOutcome::Invalid { verified_by, .. } = outcome else {
            panic!("expected Invalid");
        };
        assert_eq!(verified_by, WORKER_ID);
    }
}

#[tokio::test]
async fn metadata_survives_issuance_and_verification() {
    let (_store, issuer, verifier) = services();

    let mut metadata = serde_json::Map::new();
    metadata.insert("level".into(), serde_json::Value::String("senior".into()));
    let request = ValidIssueRequest {
        metadata: Some(metadata.clone()),
        ..issue_request("John Doe", "john@example.com", "Developer Certificate")
    };

    let outcome = issuer.issue(request).await.unwrap();
    let IssueOutcome::Issued(credential) = outcome else {
        panic!("expected Issued");
    };
    assert_eq!(credential.metadata, Some(metadata.clone()));

    let outcome = verifier
        .verify(verify_request(credential.id, "John Doe", "john@example.com"))
        .await
        .unwrap();
    let VerifyOutcome::Verified {
        credential: found, ..
    } = outcome
    else {
        panic!("expected Verified");
    };
    assert_eq!(found.metadata_or_empty(), metadata);
}

#[tokio::test]
async fn distinct_identity_keys_do_not_conflict() {
    let (store, issuer, _verifier) = services();

    for (name, email, credential_type) in [
        ("John Doe", "john@example.com", "Developer Certificate"),
        ("John Doe", "john@example.com", "Auditor Certificate"),
        ("John Doe", "john@work.example.com", "Developer Certificate"),
        ("Jane Doe", "john@example.com", "Developer Certificate"),
    ] {
        let outcome = issuer
            .issue(issue_request(name, email, credential_type))
            .await
            .unwrap();
        assert!(matches!(outcome, IssueOutcome::Issued(_)));
    }
    assert_eq!(store.count(), 4);
}
