use std::sync::Arc;

use actix_web::{http::StatusCode, test, web, App};
use serde_json::{json, Value};

use antiquarium::storage::InMemoryStore;

macro_rules! app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(antiquarium::build_state(Arc::new(InMemoryStore::new()))))
                .configure(antiquarium::configure),
        )
        .await
    };
}

fn vase() -> Value {
    json!({
        "name": "Vase",
        "creator": "Unknown",
        "period": "Qing",
        "acquisition_date": "2022-03-10",
        "acquisition_cost": "100",
        "quantity": "1"
    })
}

#[actix_web::test]
async fn vase_lifecycle_over_http() {
    let app = app!();

    let req = test::TestRequest::post().uri("/items").set_json(vase()).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let id = body["body"]["id"].as_i64().unwrap();

    let req = test::TestRequest::get().uri("/items").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["body"][0]["status"], "available");

    let sale = json!({ "item_id": id.to_string(), "sale_price": "150", "customer_name": "Rossi" });
    let req = test::TestRequest::post().uri("/sales").set_json(&sale).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::get().uri(&format!("/items/{}", id)).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["body"]["quantity"], 0);
    assert_eq!(body["body"]["status"], "sold out");

    let again = json!({ "item_id": id.to_string(), "sale_price": "50" });
    let req = test::TestRequest::post().uri("/sales").set_json(&again).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "rejected");

    let req = test::TestRequest::get().uri(&format!("/sales?item_id={}", id)).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["body"].as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn missing_quantity_is_a_bad_request() {
    let app = app!();
    let mut form = vase();
    form.as_object_mut().unwrap().remove("quantity");

    let req = test::TestRequest::post().uri("/items").set_json(&form).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "invalid");

    let req = test::TestRequest::get().uri("/items").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["body"], json!([]));
}

#[actix_web::test]
async fn malformed_json_is_a_bad_request() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/items")
        .insert_header(("content-type", "application/json"))
        .set_payload("{ not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn unknown_item_answers_not_found() {
    let app = app!();

    let req = test::TestRequest::delete().uri("/items/77").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let sale = json!({ "item_id": "77", "sale_price": "10" });
    let req = test::TestRequest::post().uri("/sales").set_json(&sale).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "not_found");
}

#[actix_web::test]
async fn deleted_item_leaves_sales_behind() {
    let app = app!();

    let mut form = vase();
    form["quantity"] = json!("2");
    let req = test::TestRequest::post().uri("/items").set_json(&form).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let id = body["body"]["id"].as_i64().unwrap();

    let sale = json!({ "item_id": id.to_string(), "sale_price": "150" });
    let req = test::TestRequest::post().uri("/sales").set_json(&sale).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let sale_id = body["body"]["id"].as_i64().unwrap();

    let req = test::TestRequest::delete().uri(&format!("/items/{}", id)).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/sales").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["body"][0]["item_id"], id);

    let req = test::TestRequest::get().uri(&format!("/sales/{}/item", sale_id)).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn exponent_or_over_precise_amounts_are_bad_requests() {
    let app = app!();

    for cost in ["1e-9223372036854775808", "1e200000", "100.555"] {
        let mut form = vase();
        form["acquisition_cost"] = json!(cost);
        let req = test::TestRequest::post().uri("/items").set_json(&form).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "cost {}", cost);
    }

    let req = test::TestRequest::post().uri("/items").set_json(vase()).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let id = body["body"]["id"].as_i64().unwrap();

    let sale = json!({ "item_id": id.to_string(), "sale_price": "1E5" });
    let req = test::TestRequest::post().uri("/sales").set_json(&sale).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
