//! # Integration Flows
//!
//! Registration → login → submission → administrative resolution, driven
//! through the service layer with every subsystem sharing one store.

use super::fixtures::{student_keys, Harness, PASSWORD};
use bf_01_validator::{validate_identifier, validate_password, validate_registration, RegistrationForm};
use bf_02_identity_store::IdentityError;
use bf_03_session_authority::SessionError;
use bf_04_request_ledger::LedgerError;
use node_runtime::{NodeConfig, ServiceContainer, StorageBackend};
use shared_types::{RequestStatus, UniqueField};
use tempfile::TempDir;

#[tokio::test]
async fn test_end_to_end_scenario() {
    let h = Harness::new();
    h.catalog.create("Physics").await.unwrap();
    assert!(h.catalog.contains("Physics").await.unwrap());

    let a = h.register("1234567890123", "9876543210", "a@x.com").await;

    // same identifier again, everything else fresh
    let dup = h.candidate("1234567890123", "9876543211", "b@x.com").await;
    assert_eq!(
        h.identities.register(dup).await,
        Err(IdentityError::DuplicateField(UniqueField::Identifier))
    );

    let session = h.sessions.authenticate("a@x.com", PASSWORD, None).await.unwrap();
    let token = h.sessions.issue_token(&session).unwrap();
    let caller = h.sessions.resolve_token(&token).unwrap();
    assert_eq!(caller.identity_id, a.id);

    let identity = h.identities.get(caller.identity_id).await.unwrap();
    let request = h.ledger.submit(&identity, "internship").await.unwrap();
    assert_eq!(request.status, RequestStatus::Pending);
    assert_eq!(request.identifier, "1234567890123");

    assert_eq!(
        h.ledger.submit(&identity, "internship").await,
        Err(LedgerError::AlreadyPending)
    );

    let approved = h
        .ledger
        .transition(request.id, RequestStatus::Approved, Some("BF/2026/001".into()))
        .await
        .unwrap();
    assert_eq!(approved.document_ref.as_deref(), Some("BF/2026/001"));

    assert!(matches!(
        h.ledger.transition(request.id, RequestStatus::Rejected, None).await,
        Err(LedgerError::InvalidTransition {
            from: RequestStatus::Approved,
            to: RequestStatus::Rejected
        })
    ));

    let history = h.ledger.list_for(a.id).await.unwrap();
    assert_eq!(history, vec![approved]);
}

#[tokio::test]
async fn test_distinct_registrations_then_each_field_collides() {
    let h = Harness::new();
    for n in 0..5 {
        let (identifier, phone, email) = student_keys(n);
        h.register(&identifier, &phone, &email).await;
    }

    let (identifier, phone, email) = student_keys(2);
    let (fresh_id, fresh_phone, fresh_email) = student_keys(99);
    let cases = [
        (identifier.as_str(), fresh_phone.as_str(), fresh_email.as_str(), UniqueField::Identifier),
        (fresh_id.as_str(), phone.as_str(), fresh_email.as_str(), UniqueField::Phone),
        (fresh_id.as_str(), fresh_phone.as_str(), email.as_str(), UniqueField::Email),
    ];
    for (identifier, phone, email, field) in cases {
        let candidate = h.candidate(identifier, phone, email).await;
        assert_eq!(
            h.identities.register(candidate).await,
            Err(IdentityError::DuplicateField(field))
        );
    }
}

#[tokio::test]
async fn test_login_requires_matching_identifier() {
    let h = Harness::new();
    let a = h.register("1234567890123", "9876543210", "a@x.com").await;
    h.register("1234567890124", "9876543211", "b@x.com").await;

    let session = h
        .sessions
        .authenticate("a@x.com", PASSWORD, Some("1234567890123"))
        .await
        .unwrap();
    assert_eq!(session.identity_id, a.id);

    // b's identifier with a's email
    assert!(matches!(
        h.sessions
            .authenticate("a@x.com", PASSWORD, Some("1234567890124"))
            .await,
        Err(SessionError::InvalidCredentials)
    ));
}

#[tokio::test]
async fn test_snapshot_survives_catalog_changes() {
    let h = Harness::new();
    let physics = h.catalog.create("Physics").await.unwrap();
    let a = h.register("1234567890123", "9876543210", "a@x.com").await;

    h.catalog.delete(physics.id).await.unwrap();

    let request = h.ledger.submit(&a, "scholarship").await.unwrap();
    assert_eq!(request.department, "Physics");
    assert_eq!(h.identities.get(a.id).await.unwrap().department, "Physics");
}

#[test]
fn test_validator_examples() {
    assert!(validate_identifier("1234567890123").is_ok());
    assert!(validate_identifier("123456789012").is_err());
    assert!(validate_identifier("12345678901234").is_err());
    assert!(validate_identifier("12345678901a3").is_err());

    assert!(validate_password("Abcdef1!").is_ok());
    assert!(validate_password("Ab1!").is_err());
    assert!(validate_password("abcdef1!").is_err());
    assert!(validate_password("Abcdefg!").is_err());
    assert!(validate_password("Abcdef12").is_err());

    let form = RegistrationForm {
        first_name: "Asha".into(),
        last_name: "Patil".into(),
        identifier: "1234567890123".into(),
        phone: "9876543210".into(),
        email: "a@x.com".into(),
        password: PASSWORD.into(),
        department: "Physics".into(),
        gender: "female".into(),
    };
    assert!(validate_registration(&form).is_ok());
}

#[tokio::test]
async fn test_state_survives_restart_on_file_backend() {
    let dir = TempDir::new().unwrap();
    let config = || {
        let mut config = NodeConfig::default();
        config.storage.backend = StorageBackend::File;
        config.storage.data_dir = dir.path().to_path_buf();
        config.security.session_secret = vec![0x5a; 32];
        config
    };

    let (identity_id, request_id) = {
        let node = ServiceContainer::new(config()).unwrap();
        node.catalog.create("Physics").await.unwrap();
        let verifier = node.sessions.hash_password(PASSWORD).await.unwrap();
        let identity = node
            .identities
            .register(bf_02_identity_store::IdentityCandidate {
                first_name: "Asha".into(),
                last_name: "Patil".into(),
                identifier: "1234567890123".into(),
                phone: "9876543210".into(),
                email: "a@x.com".into(),
                department: "Physics".into(),
                gender: shared_types::Gender::Female,
                password_verifier: verifier,
            })
            .await
            .unwrap();
        let request = node.ledger.submit(&identity, "internship").await.unwrap();
        (identity.id, request.id)
    };

    let node = ServiceContainer::new(config()).unwrap();
    let identity = node.identities.get(identity_id).await.unwrap();
    assert_eq!(identity.email, "a@x.com");

    // pending projection survived too
    assert_eq!(
        node.ledger.submit(&identity, "internship").await,
        Err(LedgerError::AlreadyPending)
    );
    assert_eq!(node.ledger.get(request_id).await.unwrap().status, RequestStatus::Pending);

    let session = node.sessions.authenticate("a@x.com", PASSWORD, None).await.unwrap();
    assert_eq!(session.identity_id, identity_id);
}
