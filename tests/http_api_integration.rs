//! Integration tests for the HTTP surface.
//!
//! Builds the real router over in-memory adapters and a mock session
//! validator, then drives it with `tower::ServiceExt::oneshot`: auth
//! enforcement, the lifecycle endpoints, error payloads.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::{middleware, Router};
use serde_json::{json, Value};
use tower::ServiceExt;

use skillswap::adapters::auth::MockSessionValidator;
use skillswap::adapters::http::middleware::{auth_middleware, AuthState};
use skillswap::adapters::http::rating::{rating_routes, RatingHandlers};
use skillswap::adapters::http::swap::{swap_routes, SwapHandlers};
use skillswap::adapters::memory::{
    test_profile, InMemorySwapRatingRepository, InMemorySwapRequestRepository,
    InMemoryUserDirectory,
};
use skillswap::application::handlers::rating::{
    GetRatingHandler, ListRatingsHandler, SubmitRatingHandler,
};
use skillswap::application::handlers::swap::{
    CreateSwapHandler, DeleteSwapHandler, GetSwapHandler, ListSwapsHandler, MyRequestsHandler,
    TransitionSwapHandler, UpdateSwapHandler,
};

/// Router over in-memory stores; tokens "alice-token" etc. map to users.
fn test_app(user_ids: &[&str]) -> Router {
    let ratings = Arc::new(InMemorySwapRatingRepository::new());
    let swaps = Arc::new(InMemorySwapRequestRepository::new().with_rating_cascade(ratings.clone()));
    let mut users = InMemoryUserDirectory::new();
    let mut validator = MockSessionValidator::new();
    for id in user_ids {
        users = users.with_profile(test_profile(id));
        validator = validator.with_test_user(format!("{}-token", id), *id);
    }
    let users = Arc::new(users);
    let validator: AuthState = Arc::new(validator);

    let swap_handlers = SwapHandlers::new(
        Arc::new(CreateSwapHandler::new(swaps.clone(), users.clone())),
        Arc::new(TransitionSwapHandler::new(swaps.clone())),
        Arc::new(GetSwapHandler::new(swaps.clone())),
        Arc::new(ListSwapsHandler::new(swaps.clone())),
        Arc::new(MyRequestsHandler::new(swaps.clone())),
        Arc::new(UpdateSwapHandler::new(swaps.clone())),
        Arc::new(DeleteSwapHandler::new(swaps.clone())),
    );
    let rating_handlers = RatingHandlers::new(
        Arc::new(SubmitRatingHandler::new(ratings.clone(), swaps.clone(), users)),
        Arc::new(GetRatingHandler::new(ratings.clone())),
        Arc::new(ListRatingsHandler::new(ratings)),
    );

    let api = swap_routes(swap_handlers)
        .merge(rating_routes(rating_handlers))
        .layer(middleware::from_fn_with_state(validator, auth_middleware));

    Router::new().nest_service("/api/swaps", api)
}

fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn create_swap_body(recipient: &str) -> Value {
    json!({
        "recipient": recipient,
        "requested_skill": "Yoga",
        "offered_skill": "Guitar",
        "message": "Let's trade lessons"
    })
}

#[tokio::test]
async fn requests_without_token_are_unauthorized() {
    let app = test_app(&["alice", "bob"]);

    let response = app
        .oneshot(request("GET", "/api/swaps/", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn invalid_token_is_unauthorized() {
    let app = test_app(&["alice"]);

    let response = app
        .oneshot(request("GET", "/api/swaps/", Some("forged"), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn full_lifecycle_over_http() {
    let app = test_app(&["alice", "bob"]);

    // alice proposes
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/swaps/",
            Some("alice-token"),
            Some(create_swap_body("bob")),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    assert_eq!(body["swap_request"]["status"], "pending");
    let id = body["swap_request"]["id"].as_str().unwrap().to_string();

    // bob accepts
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            &format!("/api/swaps/{}/accept", id),
            Some("bob-token"),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["message"], "Swap request accepted");
    assert_eq!(body["swap_request"]["status"], "accepted");

    // alice completes
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            &format!("/api/swaps/{}/complete", id),
            Some("alice-token"),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // bob rates alice
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/swaps/ratings",
            Some("bob-token"),
            Some(json!({
                "swap_request": id,
                "rated_user": "alice",
                "rating": 4,
                "comment": "Great teacher"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    assert_eq!(body["rated_user_rating"], 4.0);
    assert_eq!(body["rated_user_rating_count"], 1);

    // duplicate rating is a conflict
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/swaps/ratings",
            Some("bob-token"),
            Some(json!({
                "swap_request": id,
                "rated_user": "alice",
                "rating": 5
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["code"], "CONFLICT");

    // my-requests keeps the directions apart
    let response = app
        .oneshot(request(
            "GET",
            "/api/swaps/my-requests",
            Some("alice-token"),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["sent_requests"].as_array().unwrap().len(), 1);
    assert_eq!(body["received_requests"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn wrong_role_transition_is_not_found() {
    let app = test_app(&["alice", "bob"]);

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/swaps/",
            Some("alice-token"),
            Some(create_swap_body("bob")),
        ))
        .await
        .unwrap();
    let body = json_body(response).await;
    let id = body["swap_request"]["id"].as_str().unwrap().to_string();

    // the requester cannot accept their own proposal
    let response = app
        .oneshot(request(
            "POST",
            &format!("/api/swaps/{}/accept", id),
            Some("alice-token"),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn non_participant_sees_nothing() {
    let app = test_app(&["alice", "bob", "mallory"]);

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/swaps/",
            Some("alice-token"),
            Some(create_swap_body("bob")),
        ))
        .await
        .unwrap();
    let body = json_body(response).await;
    let id = body["swap_request"]["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(request(
            "GET",
            &format!("/api/swaps/{}", id),
            Some("mallory-token"),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(request("GET", "/api/swaps/", Some("mallory-token"), None))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn validation_failures_are_bad_requests() {
    let app = test_app(&["alice", "bob"]);

    // self-swap
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/swaps/",
            Some("alice-token"),
            Some(create_swap_body("alice")),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // unknown recipient
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/swaps/",
            Some("alice-token"),
            Some(create_swap_body("ghost")),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // malformed id in path
    let response = app
        .oneshot(request(
            "GET",
            "/api/swaps/not-a-uuid",
            Some("alice-token"),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
