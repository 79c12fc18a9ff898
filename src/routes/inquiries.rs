use actix_web::{get, post, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use chrono::Utc;
use entity::inquiry;
use std::sync::Arc;

use crate::db::database_service::DatabaseService;
use crate::types::inquiry::{PublicInquiryView, RInquiryAnswer, RInquiryCreate};
use crate::types::response::{ApiResponse, ApiResult};

#[post("/tenders/{id}/inquiries")]
pub async fn ask(
    db: web::Data<Arc<DatabaseService>>,
    auth: BearerAuth,
    path: web::Path<i32>,
    data: web::Json<RInquiryCreate>,
) -> ApiResult<inquiry::Model> {
    let supplier_id = db.authenticate(auth.token()).await?.supplier_id()?;
    let q = db
        .ask_inquiry(path.into_inner(), supplier_id, &data.question, Utc::now())
        .await?;
    Ok(ApiResponse::Created(q))
}

#[post("/inquiries/{id}/answer")]
pub async fn answer(
    db: web::Data<Arc<DatabaseService>>,
    auth: BearerAuth,
    path: web::Path<i32>,
    data: web::Json<RInquiryAnswer>,
) -> ApiResult<inquiry::Model> {
    let buyer_id = db.authenticate(auth.token()).await?.buyer_id()?;
    let q = db
        .answer_inquiry(path.into_inner(), buyer_id, &data.answer, Utc::now())
        .await?;
    Ok(ApiResponse::Ok(q))
}

#[get("/tenders/{id}/inquiries")]
pub async fn list_public(
    db: web::Data<Arc<DatabaseService>>,
    path: web::Path<i32>,
) -> ApiResult<Vec<PublicInquiryView>> {
    Ok(ApiResponse::Ok(db.list_public_inquiries(path.into_inner()).await?))
}

#[get("/tenders/{id}/inquiries/all")]
pub async fn list_all(
    db: web::Data<Arc<DatabaseService>>,
    auth: BearerAuth,
    path: web::Path<i32>,
) -> ApiResult<Vec<inquiry::Model>> {
    let buyer_id = db.authenticate(auth.token()).await?.buyer_id()?;
    Ok(ApiResponse::Ok(db.list_tender_inquiries(path.into_inner(), buyer_id).await?))
}
