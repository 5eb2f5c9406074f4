//! End-to-end registration flows over HTTP with in-memory stores.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use registry_backend::Trace;
use registry_backend::domain::{RegistrationService, TRACE_ID_HEADER};
use registry_backend::inbound::http::state::HttpState;
use registry_backend::inbound::http::{accounts, json_config, users};
use registry_backend::outbound::memory::{InMemoryPrimaryStore, InMemorySecondaryStore};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

struct Stores {
    primary: Arc<InMemoryPrimaryStore>,
    secondary: Arc<InMemorySecondaryStore>,
}

#[fixture]
fn stores() -> Stores {
    Stores {
        primary: Arc::new(InMemoryPrimaryStore::new()),
        secondary: Arc::new(InMemorySecondaryStore::new()),
    }
}

macro_rules! registry_app {
    ($stores:expr) => {{
        let service =
            RegistrationService::new(Arc::clone(&$stores.primary), Arc::clone(&$stores.secondary));
        actix_test::init_service(
            App::new()
                .app_data(web::Data::new(HttpState::new(Arc::new(service))))
                .app_data(json_config())
                .wrap(Trace)
                .configure(users::configure)
                .configure(accounts::configure),
        )
        .await
    }};
}

fn ann() -> Value {
    json!({ "name": "Ann", "address": "1 Oak St", "email": "ann@x.com" })
}

#[rstest]
#[actix_web::test]
async fn registered_user_is_readable_from_both_stores(stores: Stores) {
    let app = registry_app!(stores);

    let req = actix_test::TestRequest::post()
        .uri("/user")
        .set_json(ann())
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "Success (200)");
    let primary_id = body["data"]["userMysql"]["id"]
        .as_str()
        .expect("primary id")
        .to_owned();
    let secondary_id = body["data"]["userMongo"]["id"]
        .as_str()
        .expect("secondary id")
        .to_owned();
    assert!(!primary_id.is_empty());
    assert!(!secondary_id.is_empty());

    let req = actix_test::TestRequest::get()
        .uri(&format!("/{primary_id}/user/mysql"))
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["id"], primary_id.as_str());
    assert_eq!(body["data"]["name"], "Ann");
    assert_eq!(body["data"]["address"], "1 Oak St");
    assert_eq!(body["data"]["email"], "ann@x.com");

    let req = actix_test::TestRequest::get()
        .uri(&format!("/{secondary_id}/user/mongo"))
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["id"], secondary_id.as_str());
    assert_eq!(body["data"]["email"], "ann@x.com");
}

#[rstest]
#[actix_web::test]
async fn fourth_account_is_rejected(stores: Stores) {
    let app = registry_app!(stores);

    let req = actix_test::TestRequest::post()
        .uri("/user")
        .set_json(ann())
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;
    let user_id = body["data"]["userMysql"]["id"]
        .as_str()
        .expect("primary id")
        .to_owned();

    let mut account_ids = Vec::new();
    for n in 0..3 {
        let req = actix_test::TestRequest::post()
            .uri("/account")
            .set_json(json!({ "msisdn": format!("555-010{n}"), "userID": user_id }))
            .to_request();
        let body: Value = actix_test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["userID"], user_id.as_str());
        account_ids.push(body["data"]["id"].as_str().expect("account id").to_owned());
    }

    let req = actix_test::TestRequest::post()
        .uri("/account")
        .set_json(json!({ "msisdn": "555-0199", "userID": user_id }))
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let owner = registry_backend::domain::UserId::new(&user_id).expect("valid id");
    assert_eq!(stores.primary.account_count(&owner), 3);

    let req = actix_test::TestRequest::get()
        .uri(&format!("/{}/account", account_ids[0]))
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["id"], user_id.as_str());
}

#[rstest]
#[actix_web::test]
async fn account_for_unknown_user_is_not_found(stores: Stores) {
    let app = registry_app!(stores);

    let req = actix_test::TestRequest::post()
        .uri("/account")
        .set_json(json!({ "msisdn": "555-0100", "userID": "ghost" }))
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn secondary_failure_reports_primary_identifier(stores: Stores) {
    stores.secondary.set_fail_inserts(true);
    let app = registry_app!(stores);

    let req = actix_test::TestRequest::post()
        .uri("/user")
        .set_json(ann())
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let message = String::from_utf8(actix_test::read_body(res).await.to_vec()).expect("utf-8");

    let primary_id = message
        .split_whitespace()
        .skip_while(|word| *word != "as")
        .nth(1)
        .expect("message names the primary id")
        .to_owned();

    let req = actix_test::TestRequest::get()
        .uri(&format!("/{primary_id}/user/mysql"))
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["name"], "Ann");
    assert_eq!(stores.secondary.document_count(), 0);
}

#[rstest]
#[actix_web::test]
async fn malformed_body_is_a_bad_request(stores: Stores) {
    let app = registry_app!(stores);

    let req = actix_test::TestRequest::post()
        .uri("/user")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(res.headers().contains_key(TRACE_ID_HEADER));
    let body = actix_test::read_body(res).await;
    assert_eq!(body.as_ref(), b"request body not valid");
}

#[rstest]
#[actix_web::test]
async fn unknown_primary_user_is_not_found(stores: Stores) {
    let app = registry_app!(stores);

    let req = actix_test::TestRequest::get()
        .uri("/nobody/user/mysql")
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(res.headers().contains_key(TRACE_ID_HEADER));
}

#[rstest]
#[actix_web::test]
async fn primary_outage_is_service_unavailable(stores: Stores) {
    stores.primary.set_unavailable(true);
    let app = registry_app!(stores);

    let req = actix_test::TestRequest::get()
        .uri("/someone/user/mysql")
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
}
