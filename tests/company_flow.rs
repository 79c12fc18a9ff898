use actix_web::{http::StatusCode, test};
use serde_json::json;

mod common;
use common::{client::TestClient, TestContext, PASSWORD};
use tawreed::types::reference::RNamed;

fn named(en: &str) -> RNamed {
    RNamed { name_ar: format!("{en} (ar)"), name_en: en.to_string() }
}

#[actix_web::test]
async fn test_profile_update_is_self_only() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;
    let catalog = client.seed_catalog().await;
    let (buyer_id, buyer_token) = client.create_test_buyer(&catalog).await;
    let (other_id, _) = client.create_test_buyer(&catalog).await;
    let (_, supplier_token) = client.create_test_supplier(&catalog).await;

    let req = test::TestRequest::put()
        .uri(&format!("/api/buyers/{}", buyer_id))
        .insert_header(("Authorization", format!("Bearer {}", buyer_token)))
        .set_json(json!({"company_name": "Renamed Authority"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["company_name"], "Renamed Authority");

    for (uri, token) in [
        (format!("/api/buyers/{}", other_id), &buyer_token),
        (format!("/api/buyers/{}", buyer_id), &supplier_token),
    ] {
        let req = test::TestRequest::put()
            .uri(&uri)
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .set_json(json!({"company_name": "Hijacked"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    assert_eq!(ctx.db.get_buyer(other_id).await.unwrap().company_name, "Test Company");
}

#[actix_web::test]
async fn test_password_change_signs_out() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;
    let catalog = client.seed_catalog().await;
    let (supplier_id, token) = client.create_test_supplier(&catalog).await;

    let req = test::TestRequest::put()
        .uri(&format!("/api/suppliers/{}", supplier_id))
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .set_json(json!({"password": "a-much-better-one"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    assert!(ctx.db.authenticate(&token).await.is_err());
    let email = ctx.db.get_supplier(supplier_id).await.unwrap().email;
    assert!(ctx.db.login_supplier(&email, PASSWORD).await.is_err());
    assert!(ctx.db.login_supplier(&email, "a-much-better-one").await.is_ok());
}

#[actix_web::test]
async fn test_buyer_with_tenders_cannot_be_deleted() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;
    let catalog = client.seed_catalog().await;
    let (buyer_id, token) = client.create_test_buyer(&catalog).await;
    client.open_tender(&catalog, buyer_id).await;

    let req = test::TestRequest::delete()
        .uri(&format!("/api/buyers/{}", buyer_id))
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert!(ctx.db.get_buyer(buyer_id).await.is_ok());
}

#[actix_web::test]
async fn test_supplier_delete_takes_its_proposals() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;
    let catalog = client.seed_catalog().await;
    let (buyer_id, _) = client.create_test_buyer(&catalog).await;
    let (supplier_id, token) = client.create_test_supplier(&catalog).await;
    let t = client.open_tender(&catalog, buyer_id).await;
    client.submit_proposal(t.tender.id, supplier_id, 10.0).await;

    let req = test::TestRequest::delete()
        .uri(&format!("/api/suppliers/{}", supplier_id))
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    assert!(ctx.db.get_supplier(supplier_id).await.is_err());
    assert!(!ctx.db.supplier_has_proposal(t.tender.id, supplier_id).await.unwrap());
}

#[actix_web::test]
async fn test_awarded_supplier_cannot_be_deleted() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;
    let catalog = client.seed_catalog().await;
    let (tender_id, buyer_id, _, supplier_id, supplier_token) = client.awarding_tender(&catalog).await;
    ctx.db
        .award_tender(tender_id, buyer_id, supplier_id, chrono::Utc::now())
        .await
        .unwrap();

    let req = test::TestRequest::delete()
        .uri(&format!("/api/suppliers/{}", supplier_id))
        .insert_header(("Authorization", format!("Bearer {}", supplier_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn test_license_and_certificate_links() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;
    let catalog = client.seed_catalog().await;
    let (supplier_id, token) = client.create_test_supplier(&catalog).await;
    let (buyer_id, buyer_token) = client.create_test_buyer(&catalog).await;
    let license = ctx.db.create_license(named("Contractor class A")).await.unwrap();
    let cert = ctx.db.create_certificate(named("ISO 9001")).await.unwrap();

    let licenses_uri = format!("/api/suppliers/{}/licenses", supplier_id);
    for expected in [StatusCode::CREATED, StatusCode::CONFLICT] {
        let req = test::TestRequest::post()
            .uri(&licenses_uri)
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .set_json(json!({"license_id": license.id}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), expected);
    }

    let req = test::TestRequest::post()
        .uri(&licenses_uri)
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .set_json(json!({"license_id": 999}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // somebody else's profile
    let req = test::TestRequest::post()
        .uri(&licenses_uri)
        .insert_header(("Authorization", format!("Bearer {}", buyer_token)))
        .set_json(json!({"license_id": license.id}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get().uri(&licenses_uri).to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["name_en"], "Contractor class A");

    // the same catalog id on the buyer side is a separate link
    let req = test::TestRequest::post()
        .uri(&format!("/api/buyers/{}/certificates", buyer_id))
        .insert_header(("Authorization", format!("Bearer {}", buyer_token)))
        .set_json(json!({"certificate_id": cert.id}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert!(ctx
        .db
        .list_company_certificates(entity::company_license::Party::Supplier, supplier_id)
        .await
        .unwrap()
        .is_empty());

    let req = test::TestRequest::delete()
        .uri(&format!("{}/{}", licenses_uri, license.id))
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::delete()
        .uri(&format!("{}/{}", licenses_uri, license.id))
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
