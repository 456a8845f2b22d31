//! Integration tests for user registration and the guest endpoints.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use common::*;

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn requests_without_token_are_rejected() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = build_app(pool);

    let (status, _) = request(&app, "GET", "/api/guests", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn unregistered_principal_gets_not_found() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = build_app(pool);

    let token = issue_token(Uuid::new_v4(), &unique_email("ghost"));
    let (status, _) = request(&app, "GET", "/api/guests", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn register_then_fetch_profile() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = build_app(pool);

    let user_id = Uuid::new_v4();
    let email = unique_email("student");
    let token = issue_token(user_id, &email);

    let (status, body) = request(
        &app,
        "POST",
        "/api/users",
        Some(&token),
        Some(json!({ "email": email, "name": "Sam Student" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], user_id.to_string());
    assert_eq!(body["role"], "USER");
    assert_eq!(body["maxGuests"], 50);

    let (status, body) = request(&app, "GET", "/api/users/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], email);

    // Registering twice conflicts
    let (status, _) = request(
        &app,
        "POST",
        "/api/users",
        Some(&token),
        Some(json!({ "email": email, "name": "Sam Student" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn registration_email_must_match_token() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = build_app(pool);

    let token = issue_token(Uuid::new_v4(), &unique_email("real"));
    let (status, _) = request(
        &app,
        "POST",
        "/api/users",
        Some(&token),
        Some(json!({ "email": unique_email("other"), "name": "Sam" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn guests_are_listed_with_their_codes() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;

    let email = unique_email("host");
    let user_id = seed_user(&pool, &email, "Host User").await;
    let (guest_id, code) = seed_guest_with_code(&pool, user_id).await;

    let app = build_app(pool);
    let token = issue_token(user_id, &email);

    let (status, body) = request(&app, "GET", "/api/guests", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let guests = body.as_array().expect("expected array");
    assert_eq!(guests.len(), 1);
    assert_eq!(guests[0]["id"], guest_id.to_string());
    assert_eq!(guests[0]["qrCode"]["code"], code);
    assert_eq!(guests[0]["qrCode"]["status"], "VALID");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn guest_creation_without_storage_is_unavailable() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;

    let email = unique_email("host");
    let user_id = seed_user(&pool, &email, "Host User").await;

    let app = build_app(pool);
    let token = issue_token(user_id, &email);

    let boundary = "gradpass-test-boundary";
    let body = multipart_body(
        boundary,
        &[
            ("firstName", "Jane"),
            ("lastName", "Doe"),
            ("governmentId", "P1234567"),
            ("phoneNumber", "+447911123456"),
            ("email", "jane.doe@example.edu"),
        ],
        Some(("idImage", "passport.png", "image/png", b"\x89PNG\r\n\x1a\n")),
    );

    let (status, _) = multipart_request(&app, "/api/guests", &token, boundary, body).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn guest_creation_rejects_bad_document_type() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;

    let email = unique_email("host");
    let user_id = seed_user(&pool, &email, "Host User").await;

    let app = build_app(pool);
    let token = issue_token(user_id, &email);

    let boundary = "gradpass-test-boundary";
    let body = multipart_body(
        boundary,
        &[
            ("firstName", "Jane"),
            ("lastName", "Doe"),
            ("governmentId", "P1234567"),
            ("phoneNumber", "+447911123456"),
            ("email", "jane.doe@example.edu"),
        ],
        Some(("idImage", "notes.txt", "text/plain", b"hello")),
    );

    let (status, body) = multipart_request(&app, "/api/guests", &token, boundary, body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn deleting_missing_guest_is_not_found() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;

    let email = unique_email("host");
    let user_id = seed_user(&pool, &email, "Host User").await;

    let app = build_app(pool);
    let token = issue_token(user_id, &email);

    let path = format!("/api/guests/{}", Uuid::new_v4());
    let (status, _) = request(&app, "DELETE", &path, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn deleting_guest_removes_its_code() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;

    let email = unique_email("host");
    let user_id = seed_user(&pool, &email, "Host User").await;
    let (guest_id, code) = seed_guest_with_code(&pool, user_id).await;

    let app = build_app(pool.clone());
    let token = issue_token(user_id, &email);

    let path = format!("/api/guests/{}", guest_id);
    let (status, _) = request(&app, "DELETE", &path, Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // Cascade removes the ledger row, so the code no longer verifies
    let (status, body) = request(&app, "GET", &format!("/verify/{}", code), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "INVALID");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn users_cannot_delete_each_others_guests() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;

    let owner_id = seed_user(&pool, &unique_email("owner"), "Owner").await;
    let (guest_id, _) = seed_guest_with_code(&pool, owner_id).await;

    let other_email = unique_email("other");
    let other_id = seed_user(&pool, &other_email, "Other").await;

    let app = build_app(pool);
    let token = issue_token(other_id, &other_email);

    let path = format!("/api/guests/{}", guest_id);
    let (status, _) = request(&app, "DELETE", &path, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
