//! # Concurrency Properties
//!
//! Uniqueness and the single-pending-request rule must hold when the
//! competing calls arrive through independent service clones at once.

use super::fixtures::{student_keys, Harness};
use bf_02_identity_store::IdentityError;
use bf_04_request_ledger::LedgerError;
use shared_types::{RequestStatus, UniqueField};
use std::collections::HashSet;
use std::sync::Arc;

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_submissions_admit_one() {
    let h = Arc::new(Harness::new());
    let a = h.register("1234567890123", "9876543210", "a@x.com").await;
    const N: usize = 64;

    let handles: Vec<_> = (0..N)
        .map(|i| {
            let ledger = h.ledger.clone();
            let a = a.clone();
            tokio::spawn(async move { ledger.submit(&a, &format!("reason {}", i)).await })
        })
        .collect();

    let mut accepted = Vec::new();
    let mut rejected = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(request) => accepted.push(request),
            Err(LedgerError::AlreadyPending) => rejected += 1,
            Err(other) => panic!("unexpected error: {}", other),
        }
    }

    assert_eq!(accepted.len(), 1);
    assert_eq!(rejected, N - 1);
    assert_eq!(h.ledger.list_all(Some(RequestStatus::Pending)).await.unwrap(), accepted);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_registrations_same_identifier() {
    let h = Arc::new(Harness::new());
    const N: usize = 24;

    let mut candidates = Vec::new();
    for n in 0..N {
        let (_, phone, email) = student_keys(n);
        candidates.push(h.candidate("1234567890123", &phone, &email).await);
    }

    let handles: Vec<_> = candidates
        .into_iter()
        .map(|candidate| {
            let identities = h.identities.clone();
            tokio::spawn(async move { identities.register(candidate).await })
        })
        .collect();

    let mut winners = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => winners += 1,
            Err(e) => assert_eq!(e, IdentityError::DuplicateField(UniqueField::Identifier)),
        }
    }
    assert_eq!(winners, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_distinct_registrations_all_succeed() {
    let h = Arc::new(Harness::new());
    const N: usize = 32;

    let mut candidates = Vec::new();
    for n in 0..N {
        let (identifier, phone, email) = student_keys(n);
        candidates.push(h.candidate(&identifier, &phone, &email).await);
    }

    let handles: Vec<_> = candidates
        .into_iter()
        .map(|candidate| {
            let identities = h.identities.clone();
            tokio::spawn(async move { identities.register(candidate).await })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        ids.insert(handle.await.unwrap().unwrap().id);
    }
    assert_eq!(ids.len(), N);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_many_students_each_hold_one_pending() {
    let h = Arc::new(Harness::new());
    const STUDENTS: usize = 8;
    const ATTEMPTS: usize = 8;

    let mut students = Vec::new();
    for n in 0..STUDENTS {
        let (identifier, phone, email) = student_keys(n);
        students.push(h.register(&identifier, &phone, &email).await);
    }

    let handles: Vec<_> = students
        .iter()
        .flat_map(|s| (0..ATTEMPTS).map(move |i| (s.clone(), i)))
        .map(|(student, i)| {
            let ledger = h.ledger.clone();
            tokio::spawn(async move { ledger.submit(&student, &format!("attempt {}", i)).await })
        })
        .collect();

    let mut accepted = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            accepted += 1;
        }
    }
    assert_eq!(accepted, STUDENTS);

    for student in &students {
        let summary = h.ledger.summary_for(student.id).await.unwrap();
        assert_eq!(summary.pending, 1);
        assert_eq!(summary.total, 1);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_resolutions_one_winner() {
    let h = Arc::new(Harness::new());
    let a = h.register("1234567890123", "9876543210", "a@x.com").await;
    let request = h.ledger.submit(&a, "internship").await.unwrap();

    let handles: Vec<_> = (0..20)
        .map(|i| {
            let ledger = h.ledger.clone();
            let status = if i % 2 == 0 {
                RequestStatus::Approved
            } else {
                RequestStatus::Rejected
            };
            tokio::spawn(async move {
                ledger
                    .transition(request.id, status, Some(format!("DOC-{}", i)))
                    .await
            })
        })
        .collect();

    let mut winners = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => winners += 1,
            Err(LedgerError::InvalidTransition { from, .. }) => assert!(from.is_terminal()),
            Err(other) => panic!("unexpected error: {}", other),
        }
    }
    assert_eq!(winners, 1);

    // resolution freed the slot exactly once
    assert!(h.ledger.submit(&a, "internship, again").await.is_ok());
}
