use actix_web::{http::StatusCode, test};
use sea_orm::ConnectionTrait;
use serde_json::json;

mod common;
use common::{client::TestClient, TestContext, PASSWORD};

fn buyer_form(domain_id: i32, city_id: i32, email: &str) -> serde_json::Value {
    json!({
        "company_name": "Ministry Works",
        "commercial_record": "CR-1001",
        "email": email,
        "phone": "0551234567",
        "password": PASSWORD,
        "domain_id": domain_id,
        "city_id": city_id,
        "otp_code": "0000"
    })
}

#[actix_web::test]
async fn test_buyer_registration_and_login_flow() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;
    let catalog = client.seed_catalog().await;

    let req = test::TestRequest::post()
        .uri("/api/buyers")
        .set_json(buyer_form(catalog.domain_id, catalog.city_id, "Buyer@Works.sa"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["email"], "buyer@works.sa");
    assert!(body["data"].get("password_hash").is_none());
    assert!(body["data"].get("session_hash").is_none());

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"email": "buyer@works.sa", "password": PASSWORD}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert!(body.get("token").is_none());
    assert_eq!(body["data"]["party"], "buyer");
    assert_eq!(body["data"]["account"]["email"], "buyer@works.sa");
    let token = body["data"]["token"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri("/api/auth/me")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["party"], "buyer");
    assert_eq!(body["data"]["account"]["company_name"], "Ministry Works");
}

#[actix_web::test]
async fn test_duplicate_registration_conflicts() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;
    let catalog = client.seed_catalog().await;

    for expected in [StatusCode::CREATED, StatusCode::CONFLICT] {
        let req = test::TestRequest::post()
            .uri("/api/buyers")
            .set_json(buyer_form(catalog.domain_id, catalog.city_id, "dup@works.sa"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), expected);
    }
}

#[actix_web::test]
async fn test_registration_validation() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;
    let catalog = client.seed_catalog().await;

    let mut blank_name = buyer_form(catalog.domain_id, catalog.city_id, "a@works.sa");
    blank_name["company_name"] = json!("");
    let mut short_password = buyer_form(catalog.domain_id, catalog.city_id, "b@works.sa");
    short_password["password"] = json!("123");
    let mut missing_field = buyer_form(catalog.domain_id, catalog.city_id, "c@works.sa");
    missing_field.as_object_mut().unwrap().remove("phone");

    for form in [blank_name, short_password, missing_field] {
        let req = test::TestRequest::post().uri("/api/buyers").set_json(form).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    let unknown_city = buyer_form(catalog.domain_id, 999, "d@works.sa");
    let req = test::TestRequest::post().uri("/api/buyers").set_json(unknown_city).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    assert!(ctx.db.list_buyers().await.unwrap().is_empty());
}

#[actix_web::test]
async fn test_supplier_registration_checks_sub_domain() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;
    let catalog = client.seed_catalog().await;

    let other = ctx
        .db
        .create_domain(tawreed::types::reference::RNamed {
            name_ar: "صحة".into(),
            name_en: "Health".into(),
        })
        .await
        .unwrap();

    let req = test::TestRequest::post()
        .uri("/api/suppliers")
        .set_json(json!({
            "company_name": "Asphalt Co",
            "commercial_record": "CR-77",
            "email": "sales@asphalt.sa",
            "phone": "0559999999",
            "password": PASSWORD,
            "domain_id": other.id,
            "sub_domain_id": catalog.sub_domain_id,
            "city_id": catalog.city_id
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/suppliers")
        .set_json(json!({
            "company_name": "Asphalt Co",
            "commercial_record": "CR-77",
            "email": "sales@asphalt.sa",
            "phone": "0559999999",
            "password": PASSWORD,
            "domain_id": catalog.domain_id,
            "sub_domain_id": catalog.sub_domain_id,
            "city_id": catalog.city_id
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri("/api/auth/supplier/login")
        .set_json(json!({"email": "sales@asphalt.sa", "password": PASSWORD}))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["party"], "supplier");
    assert_eq!(body["data"]["account"]["sub_domain_id"], catalog.sub_domain_id);
}

#[actix_web::test]
async fn test_login_failures() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;
    let catalog = client.seed_catalog().await;
    client.create_test_buyer(&catalog).await;
    let buyer = ctx.db.list_buyers().await.unwrap().remove(0);

    let cases = [
        (json!({"email": buyer.email, "password": "wrong-password"}), StatusCode::UNAUTHORIZED),
        (json!({"email": "nobody@test.com", "password": PASSWORD}), StatusCode::UNAUTHORIZED),
        (json!({"email": "", "password": PASSWORD}), StatusCode::BAD_REQUEST),
        (json!({"email": buyer.email, "password": ""}), StatusCode::BAD_REQUEST),
    ];
    for (body, expected) in cases {
        let req = test::TestRequest::post().uri("/api/auth/login").set_json(body).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), expected);
    }

    // buyers cannot log in through the supplier door
    let req = test::TestRequest::post()
        .uri("/api/auth/supplier/login")
        .set_json(json!({"email": buyer.email, "password": PASSWORD}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_logout_and_rotation_revoke_tokens() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;
    let catalog = client.seed_catalog().await;
    let (buyer_id, first_token) = client.create_test_buyer(&catalog).await;
    let email = ctx.db.get_buyer(buyer_id).await.unwrap().email;

    // logging in again rotates the session
    let second = ctx.db.login_buyer(&email, PASSWORD).await.unwrap().token;
    assert!(ctx.db.authenticate(&first_token).await.is_err());
    assert!(ctx.db.authenticate(&second).await.is_ok());

    let req = test::TestRequest::post()
        .uri("/api/auth/logout")
        .insert_header(("Authorization", format!("Bearer {}", second)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/auth/me")
        .insert_header(("Authorization", format!("Bearer {}", second)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_garbage_tokens_are_unauthorized() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    for token in ["invalid_token", "YnV5ZXIuMS50b2tfeA=="] {
        let req = test::TestRequest::get()
            .uri("/api/auth/me")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "UNAUTHORIZED");
    }

    // no header at all gets the same body, not a bare challenge
    let req = test::TestRequest::get().uri("/api/auth/me").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(resp.headers().contains_key("www-authenticate"));
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "UNAUTHORIZED");
}

#[actix_web::test]
async fn test_database_failure_is_not_reported_as_bad_token() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;
    let catalog = client.seed_catalog().await;
    let (_, token) = client.create_test_buyer(&catalog).await;

    ctx.db
        .connection()
        .execute_unprepared("ALTER TABLE buyer RENAME TO buyer_moved")
        .await
        .unwrap();

    let req = test::TestRequest::get()
        .uri("/api/auth/me")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "DB_ERROR");
}

#[actix_web::test]
async fn test_otp_send_is_a_noop_when_disabled() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/otp/send")
        .set_json(json!({"phone": "0551234567"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/api/auth/otp/send")
        .set_json(json!({"phone": "  "}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
