use actix_web::{get, post, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use chrono::Utc;
use std::sync::Arc;

use crate::db::database_service::DatabaseService;
use crate::types::company::SupplierView;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::tender::{RAward, TenderView};

#[post("/tenders/{id}/finish")]
pub async fn finish(
    db: web::Data<Arc<DatabaseService>>,
    auth: BearerAuth,
    path: web::Path<i32>,
) -> ApiResult<TenderView> {
    let id = path.into_inner();
    let buyer_id = db.authenticate(auth.token()).await?.buyer_id()?;
    db.finish_tender(id, buyer_id, Utc::now()).await?;
    Ok(ApiResponse::Ok(db.get_tender_listing(id).await?.into()))
}

#[post("/tenders/{id}/award")]
pub async fn award(
    db: web::Data<Arc<DatabaseService>>,
    auth: BearerAuth,
    path: web::Path<i32>,
    data: web::Json<RAward>,
) -> ApiResult<TenderView> {
    let id = path.into_inner();
    let buyer_id = db.authenticate(auth.token()).await?.buyer_id()?;
    db.award_tender(id, buyer_id, data.supplier_id, Utc::now()).await?;
    Ok(ApiResponse::Ok(db.get_tender_listing(id).await?.into()))
}

#[get("/tenders/{id}/awarded-supplier")]
pub async fn awarded_supplier(
    db: web::Data<Arc<DatabaseService>>,
    path: web::Path<i32>,
) -> ApiResult<SupplierView> {
    Ok(ApiResponse::Ok(db.awarded_supplier(path.into_inner()).await?.into()))
}
