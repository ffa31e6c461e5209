//! Integration tests for the pagination query extractor

use actix_web::{http::StatusCode, test, web, App, HttpResponse};
use serde_json::Value;

use ck_api::extractors::Page;

async fn list(Page(pagination): Page) -> HttpResponse {
    HttpResponse::Ok().json(pagination.with_counts(0, 0))
}

#[actix_web::test]
async fn test_page_defaults() {
    let app = test::init_service(App::new().route("/items", web::get().to(list))).await;

    let req = test::TestRequest::get().uri("/items").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["limit"], 10);
    assert_eq!(body["page"], 1);
    assert!(body.get("sort").is_none());
}

#[actix_web::test]
async fn test_page_with_sort() {
    let app = test::init_service(App::new().route("/items", web::get().to(list))).await;

    let req = test::TestRequest::get()
        .uri("/items?limit=25&page=3&sort=created_at:desc,name:asc")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["limit"], 25);
    assert_eq!(body["page"], 3);
    assert_eq!(body["sort"][0]["field"], "created_at");
    assert_eq!(body["sort"][1]["order"], "asc");
}

#[actix_web::test]
async fn test_invalid_limit_is_bad_request() {
    let app = test::init_service(App::new().route("/items", web::get().to(list))).await;

    let req = test::TestRequest::get().uri("/items?limit=ten").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "INVALID_PAGINATION");
}
