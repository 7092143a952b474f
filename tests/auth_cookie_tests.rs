// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Disconnect/logout cookie tests.
//!
//! These tests verify that cookie removal carries the same attributes as
//! creation, and that disconnect forgets the session locally even when
//! Strava refuses the deauthorization.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use tower::ServiceExt;
use wiremock::matchers::{header as header_matcher, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;

fn assert_removal(cookie: &str) {
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Secure"));
    assert!(cookie.contains("SameSite=None"));
    assert!(cookie.contains("Max-Age=0"));
    assert!(!cookie.contains("Domain="));
}

#[tokio::test]
async fn test_disconnect_revoke_failure_still_clears_cookie() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/deauthorize"))
        .and(header_matcher("authorization", "Bearer old-access"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    let (app, state) = common::create_test_app_with_upstream(&server);
    let cookie = common::token_cookie(&state, &common::token_record(3600));

    let response = app
        .oneshot(common::get(
            "/disconnect?next=https://globalsport.kz/profile",
            Some(&cookie),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        common::location(&response),
        "https://globalsport.kz/profile?disconnected=1"
    );

    let set_cookies = common::set_cookie_headers(&response);
    assert_removal(&common::find_cookie(&set_cookies, "strava"));
    assert!(common::token_from_response(&state, &response).is_none());
}

#[tokio::test]
async fn test_disconnect_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/deauthorize"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "access_token": "old-access" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (app, state) = common::create_test_app_with_upstream(&server);
    let cookie = common::token_cookie(&state, &common::token_record(3600));

    let response = app
        .oneshot(common::get("/disconnect", Some(&cookie)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        common::location(&response),
        "https://globalsport.kz/challenge?disconnected=1"
    );
    assert_removal(&common::find_cookie(
        &common::set_cookie_headers(&response),
        "strava",
    ));
}

#[tokio::test]
async fn test_disconnect_without_cookie_skips_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (app, _) = common::create_test_app_with_upstream(&server);

    let response = app
        .oneshot(common::get("/disconnect?next=notaurl", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        common::location(&response),
        "https://globalsport.kz/challenge?disconnected=1"
    );
    assert_removal(&common::find_cookie(
        &common::set_cookie_headers(&response),
        "strava",
    ));
}

#[tokio::test]
async fn test_logout_clears_cookie_locally() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (app, state) = common::create_test_app_with_upstream(&server);
    let cookie = common::token_cookie(&state, &common::token_record(3600));

    let response = app
        .oneshot(common::get("/logout", Some(&cookie)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_removal(&common::find_cookie(
        &common::set_cookie_headers(&response),
        "strava",
    ));
    assert_eq!(
        common::body_text(response).await,
        "Logged out. Cookie cleared."
    );
}

#[tokio::test]
async fn test_healthz() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(common::get("/healthz", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(common::body_text(response).await, "OK");
}

#[tokio::test]
async fn test_cors_preflight_from_frontend() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/activities")
                .header(header::ORIGIN, "https://globalsport.kz")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "https://globalsport.kz"
    );
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
            .unwrap(),
        "true"
    );
}

#[tokio::test]
async fn test_cors_rejects_other_origin() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/status")
                .header(header::ORIGIN, "https://evil.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(!response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}
