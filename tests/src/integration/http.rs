//! # HTTP Flows
//!
//! The router driven in-process, with state set up partly through the
//! service layer to check both surfaces observe the same store.

use super::fixtures::{student_keys, Harness, ADMIN_KEY, PASSWORD};
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use bf_06_api_gateway::middleware::ADMIN_KEY_HEADER;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

async fn call(
    app: &Router,
    method: Method,
    uri: &str,
    auth: Option<(&str, &str)>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some((name, value)) = auth {
        builder = builder.header(name, value);
    }
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

async fn bearer_for(app: &Router, email: &str) -> String {
    let (status, body) = call(
        app,
        Method::POST,
        "/api/v1/sessions",
        None,
        Some(json!({ "email": email, "password": PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    format!("Bearer {}", body["data"]["token"].as_str().unwrap())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_http_submissions_admit_one() {
    let h = Harness::new();
    h.register("1234567890123", "9876543210", "a@x.com").await;
    let app = Arc::new(h.router());
    let bearer = Arc::new(bearer_for(&app, "a@x.com").await);

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let app = app.clone();
            let bearer = bearer.clone();
            tokio::spawn(async move {
                call(
                    &app,
                    Method::POST,
                    "/api/v1/bonafide-requests",
                    Some(("authorization", bearer.as_str())),
                    Some(json!({ "reason": format!("attempt {}", i) })),
                )
                .await
                .0
            })
        })
        .collect();

    let mut created = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            StatusCode::CREATED => created += 1,
            StatusCode::CONFLICT => conflicts += 1,
            other => panic!("unexpected status {}", other),
        }
    }
    assert_eq!(created, 1);
    assert_eq!(conflicts, 15);
}

#[tokio::test]
async fn test_admin_queue_spans_students() {
    let h = Harness::new();
    let app = h.router();
    let admin = Some((ADMIN_KEY_HEADER, ADMIN_KEY));

    for n in 0..3 {
        let (identifier, phone, email) = student_keys(n);
        let identity = h.register(&identifier, &phone, &email).await;
        h.ledger.submit(&identity, "internship").await.unwrap();
    }

    let (status, body) = call(
        &app,
        Method::GET,
        "/api/v1/admin/bonafide-requests?status=pending",
        admin,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let queue = body["data"].as_array().unwrap().clone();
    assert_eq!(queue.len(), 3);

    let first = queue[0]["id"].as_str().unwrap();
    let (status, body) = call(
        &app,
        Method::PATCH,
        &format!("/api/v1/bonafide-requests/{}", first),
        admin,
        Some(json!({ "status": "rejected", "documentRef": "ignored" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["data"]["status"], "rejected");
    assert!(body["data"]["documentRef"].is_null());

    let (_, body) = call(
        &app,
        Method::GET,
        "/api/v1/admin/bonafide-requests?status=pending",
        admin,
        None,
    )
    .await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let (_, body) = call(&app, Method::GET, "/api/v1/admin/bonafide-requests", admin, None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_students_see_only_their_own_history() {
    let h = Harness::new();
    let app = h.router();

    let (identifier, phone, email) = student_keys(0);
    let first = h.register(&identifier, &phone, &email).await;
    h.ledger.submit(&first, "internship").await.unwrap();

    let (identifier, phone, other_email) = student_keys(1);
    h.register(&identifier, &phone, &other_email).await;

    let bearer = bearer_for(&app, &other_email).await;
    let auth = Some(("authorization", bearer.as_str()));

    let (status, body) = call(&app, Method::GET, "/api/v1/bonafide-requests", auth, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));

    let (_, body) = call(&app, Method::GET, "/api/v1/bonafide-requests/summary", auth, None).await;
    assert_eq!(body["data"]["total"], 0);

    let (_, body) = call(&app, Method::GET, "/api/v1/identities/me", auth, None).await;
    assert_eq!(body["data"]["email"], other_email);
}

#[tokio::test]
async fn test_department_added_over_http_admits_registration() {
    let h = Harness::new();
    let app = h.router();

    let form = json!({
        "firstName": "Ravi",
        "lastName": "Kulkarni",
        "identifier": "2234567890123",
        "phone": "9876500000",
        "email": "ravi@college.edu",
        "password": PASSWORD,
        "department": "Chemistry",
        "gender": "male",
    });

    let (status, body) = call(&app, Method::POST, "/api/v1/identities", None, Some(form.clone())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["fields"][0]["field"], "department");

    let (status, _) = call(
        &app,
        Method::POST,
        "/api/v1/lookup-entries",
        Some((ADMIN_KEY_HEADER, ADMIN_KEY)),
        Some(json!({ "name": "Chemistry" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = call(&app, Method::POST, "/api/v1/identities", None, Some(form)).await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert!(h.identities.get(body["data"]["id"].as_str().unwrap().parse().unwrap()).await.is_ok());
}
