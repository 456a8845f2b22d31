//! Integration tests for the administrator surface.

mod common;

use axum::http::StatusCode;
use uuid::Uuid;

use common::*;

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn regular_users_cannot_access_admin_routes() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;

    let email = unique_email("user");
    let user_id = seed_user(&pool, &email, "Regular User").await;

    let app = build_app(pool);
    let token = issue_token(user_id, &email);

    let (status, _) = request(&app, "GET", "/api/admin/users", Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = request(&app, "GET", "/api/export/guests", Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn admin_lists_users_with_counts_and_stats() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;

    let admin_email = unique_email("admin");
    let admin_id = seed_user(&pool, &admin_email, "Admin User").await;
    promote_admin(&pool, admin_id).await;

    let host_id = seed_user(&pool, &unique_email("host"), "Host User").await;
    seed_guest_with_code(&pool, host_id).await;

    let app = build_app(pool);
    let token = issue_token(admin_id, &admin_email);

    let (status, body) = request(&app, "GET", "/api/admin/users", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let users = body["users"].as_array().expect("expected users array");
    assert!(users.len() >= 2);
    let host = users
        .iter()
        .find(|u| u["name"] == "Host User")
        .expect("host user missing from listing");
    assert_eq!(host["guestCount"], 1);
    assert_eq!(host["hasGraduate"], false);

    assert!(body["pagination"]["totalCount"].as_i64().unwrap() >= 2);
    assert!(body["stats"]["totalUsers"].as_i64().unwrap() >= 2);
    assert!(body["stats"]["totalGuests"].as_i64().unwrap() >= 1);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn admin_listing_supports_search_and_pagination() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;

    let admin_email = unique_email("admin");
    let admin_id = seed_user(&pool, &admin_email, "Admin User").await;
    promote_admin(&pool, admin_id).await;

    let needle = format!("Searchable-{}", Uuid::new_v4());
    seed_user(&pool, &unique_email("findme"), &needle).await;

    let app = build_app(pool);
    let token = issue_token(admin_id, &admin_email);

    let path = format!("/api/admin/users?page=1&limit=1&search={}", needle);
    let (status, body) = request(&app, "GET", &path, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let users = body["users"].as_array().expect("expected users array");
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["name"], needle);
    assert_eq!(body["pagination"]["page"], 1);
    assert_eq!(body["pagination"]["limit"], 1);
    assert_eq!(body["pagination"]["totalCount"], 1);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn admin_reads_another_users_guests() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;

    let admin_email = unique_email("admin");
    let admin_id = seed_user(&pool, &admin_email, "Admin User").await;
    promote_admin(&pool, admin_id).await;

    let host_id = seed_user(&pool, &unique_email("host"), "Host User").await;
    let (guest_id, _) = seed_guest_with_code(&pool, host_id).await;

    let app = build_app(pool);
    let token = issue_token(admin_id, &admin_email);

    let path = format!("/api/admin/users/{}/guests", host_id);
    let (status, body) = request(&app, "GET", &path, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let guests = body.as_array().expect("expected array");
    assert_eq!(guests.len(), 1);
    assert_eq!(guests[0]["id"], guest_id.to_string());
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn admin_graduate_lookup_for_user_without_one_is_not_found() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;

    let admin_email = unique_email("admin");
    let admin_id = seed_user(&pool, &admin_email, "Admin User").await;
    promote_admin(&pool, admin_id).await;

    let host_id = seed_user(&pool, &unique_email("host"), "Host User").await;

    let app = build_app(pool);
    let token = issue_token(admin_id, &admin_email);

    let path = format!("/api/admin/graduates/{}", host_id);
    let (status, _) = request(&app, "GET", &path, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn exports_without_storage_are_unavailable() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;

    let admin_email = unique_email("admin");
    let admin_id = seed_user(&pool, &admin_email, "Admin User").await;
    promote_admin(&pool, admin_id).await;

    let app = build_app(pool);
    let token = issue_token(admin_id, &admin_email);

    let (status, _) = request(&app, "GET", "/api/export/guests", Some(&token), None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let (status, _) = request(&app, "GET", "/api/export/graduates", Some(&token), None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}
