use actix_web::{http::StatusCode, test};
use serde_json::json;

mod common;
use common::{client::TestClient, TestContext, ADMIN_KEY};

#[actix_web::test]
async fn test_health_flow() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
}

#[actix_web::test]
async fn test_catalog_lookups() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;
    let catalog = client.seed_catalog().await;

    let req = test::TestRequest::get().uri("/api/domains").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["name_en"], "Construction");

    let req = test::TestRequest::get()
        .uri(&format!("/api/domains/{}/sub-domains", catalog.domain_id))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"][0]["id"], catalog.sub_domain_id);

    let req = test::TestRequest::get()
        .uri(&format!("/api/regions/{}/cities", catalog.region_id))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"][0]["id"], catalog.city_id);
    assert_eq!(body["data"][0]["region_id"], catalog.region_id);
}

#[actix_web::test]
async fn test_children_of_missing_parent_are_not_found() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    let req = test::TestRequest::get().uri("/api/domains/999/sub-domains").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "NOT_FOUND");

    let req = test::TestRequest::get().uri("/api/regions/999/cities").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_bad_path_id_is_a_bad_request() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    let req = test::TestRequest::get().uri("/api/regions/abc/cities").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_admin_catalog_maintenance() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/admin/licenses")
        .insert_header(("Authorization", format!("Bearer {}", ADMIN_KEY)))
        .set_json(json!({"name_ar": "رخصة بلدية", "name_en": "Municipal license"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::get().uri("/api/licenses").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"][0]["name_en"], "Municipal license");

    let req = test::TestRequest::post()
        .uri("/api/admin/regions/999/cities")
        .insert_header(("Authorization", format!("Bearer {}", ADMIN_KEY)))
        .set_json(json!({"name_ar": "جدة", "name_en": "Jeddah"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_admin_routes_reject_bad_keys_and_blank_names() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/admin/domains")
        .insert_header(("Authorization", "Bearer wrong-key"))
        .set_json(json!({"name_ar": "x", "name_en": "x"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "UNAUTHORIZED");

    let req = test::TestRequest::post()
        .uri("/api/admin/domains")
        .set_json(json!({"name_ar": "x", "name_en": "x"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "UNAUTHORIZED");

    let req = test::TestRequest::post()
        .uri("/api/admin/domains")
        .insert_header(("Authorization", format!("Bearer {}", ADMIN_KEY)))
        .set_json(json!({"name_ar": " ", "name_en": "Health"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let domains = ctx.db.list_domains().await.unwrap();
    assert!(domains.is_empty());
}
