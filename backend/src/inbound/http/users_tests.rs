//! Tests for the user handlers.

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::MockUserRegistry;
use crate::domain::{RegisteredUser, User};
use crate::inbound::http::error::BODY_NOT_VALID;
use crate::inbound::http::test_utils::registry_app;

fn stored_user(id: &str) -> User {
    User::from_stored(id, "Ann", "1 Oak St", "ann@x.com").expect("stored user")
}

#[rstest]
#[actix_web::test]
async fn register_user_wraps_both_copies_in_envelope() {
    let mut registry = MockUserRegistry::new();
    registry
        .expect_register_user()
        .withf(|user| user.name() == "Ann" && user.email() == "ann@x.com")
        .times(1)
        .return_once(|_| {
            Ok(RegisteredUser {
                primary: stored_user("p-1"),
                secondary: stored_user("s-1"),
            })
        });
    let app = actix_test::init_service(registry_app(registry)).await;

    let request = actix_test::TestRequest::post()
        .uri("/user")
        .set_json(json!({ "id": "ignored", "name": "Ann", "address": "1 Oak St", "email": "ann@x.com" }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["status"], json!("Success (200)"));
    assert_eq!(body["data"]["userMysql"]["id"], json!("p-1"));
    assert_eq!(body["data"]["userMongo"]["id"], json!("s-1"));
}

#[rstest]
#[actix_web::test]
async fn malformed_json_is_rejected_with_plain_text() {
    let mut registry = MockUserRegistry::new();
    registry.expect_register_user().times(0);
    let app = actix_test::init_service(registry_app(registry)).await;

    let request = actix_test::TestRequest::post()
        .uri("/user")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"name\": ")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = actix_test::read_body(response).await;
    assert_eq!(body.as_ref(), BODY_NOT_VALID.as_bytes());
}

#[rstest]
#[case(json!({ "address": "1 Oak St", "email": "ann@x.com" }), "name must not be empty")]
#[case(json!({ "name": "Ann", "address": " ", "email": "ann@x.com" }), "address must not be empty")]
#[actix_web::test]
async fn blank_fields_are_invalid_requests(#[case] payload: Value, #[case] expected: &str) {
    let mut registry = MockUserRegistry::new();
    registry.expect_register_user().times(0);
    let app = actix_test::init_service(registry_app(registry)).await;

    let request = actix_test::TestRequest::post()
        .uri("/user")
        .set_json(payload)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = actix_test::read_body(response).await;
    assert_eq!(body.as_ref(), expected.as_bytes());
}

#[rstest]
#[actix_web::test]
async fn secondary_failure_surfaces_as_server_error() {
    let mut registry = MockUserRegistry::new();
    registry.expect_register_user().return_once(|_| {
        Err(Error::secondary_write_failed(
            "user registered in primary store as p-9 but secondary store write failed: down",
        ))
    });
    let app = actix_test::init_service(registry_app(registry)).await;

    let request = actix_test::TestRequest::post()
        .uri("/user")
        .set_json(json!({ "name": "Ann", "address": "1 Oak St", "email": "ann@x.com" }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = actix_test::read_body(response).await;
    assert!(String::from_utf8_lossy(&body).contains("p-9"));
}

#[rstest]
#[actix_web::test]
async fn primary_lookup_returns_user() {
    let mut registry = MockUserRegistry::new();
    registry
        .expect_get_user_by_id()
        .withf(|id| id == "p-1")
        .return_once(|_| Ok(stored_user("p-1")));
    let app = actix_test::init_service(registry_app(registry)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/p-1/user/mysql").to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body["data"],
        json!({ "id": "p-1", "name": "Ann", "address": "1 Oak St", "email": "ann@x.com" })
    );
}

#[rstest]
#[case(Error::not_found("user document s-404 not found"), StatusCode::NOT_FOUND)]
#[case(Error::service_unavailable("secondary store unavailable"), StatusCode::SERVICE_UNAVAILABLE)]
#[actix_web::test]
async fn secondary_lookup_maps_errors(#[case] failure: Error, #[case] expected: StatusCode) {
    let mut registry = MockUserRegistry::new();
    registry
        .expect_get_secondary_user_by_id()
        .return_once(move |_| Err(failure));
    let app = actix_test::init_service(registry_app(registry)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/s-404/user/mongo").to_request(),
    )
    .await;

    assert_eq!(response.status(), expected);
}
