use actix_web::{delete, get, post, put, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use chrono::Utc;
use std::sync::Arc;

use crate::db::database_service::DatabaseService;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::tender::{RTenderCreate, RTenderUpdate, TenderQuery, TenderView};
use crate::utils::filter::TenderFilter;

#[get("/tenders")]
pub async fn list(
    db: web::Data<Arc<DatabaseService>>,
    query: web::Query<TenderQuery>,
) -> ApiResult<Vec<TenderView>> {
    let filter = TenderFilter::from_query(&query)?;
    let listings = db.list_tenders(&filter).await?;
    Ok(ApiResponse::Ok(listings.into_iter().map(TenderView::from).collect()))
}

#[post("/tenders")]
pub async fn create(
    db: web::Data<Arc<DatabaseService>>,
    auth: BearerAuth,
    data: web::Json<RTenderCreate>,
) -> ApiResult<TenderView> {
    let buyer_id = db.authenticate(auth.token()).await?.buyer_id()?;
    let listing = db.create_tender(buyer_id, data.into_inner(), Utc::now()).await?;
    Ok(ApiResponse::Created(listing.into()))
}

#[get("/tenders/{id}")]
pub async fn show(db: web::Data<Arc<DatabaseService>>, path: web::Path<i32>) -> ApiResult<TenderView> {
    Ok(ApiResponse::Ok(db.get_tender_listing(path.into_inner()).await?.into()))
}

#[put("/tenders/{id}")]
pub async fn update(
    db: web::Data<Arc<DatabaseService>>,
    auth: BearerAuth,
    path: web::Path<i32>,
    data: web::Json<RTenderUpdate>,
) -> ApiResult<TenderView> {
    let buyer_id = db.authenticate(auth.token()).await?.buyer_id()?;
    let listing = db
        .update_tender(path.into_inner(), buyer_id, data.into_inner(), Utc::now())
        .await?;
    Ok(ApiResponse::Ok(listing.into()))
}

#[delete("/tenders/{id}")]
pub async fn remove(
    db: web::Data<Arc<DatabaseService>>,
    auth: BearerAuth,
    path: web::Path<i32>,
) -> ApiResult<()> {
    let buyer_id = db.authenticate(auth.token()).await?.buyer_id()?;
    db.delete_tender(path.into_inner(), buyer_id).await?;
    Ok(ApiResponse::EmptyOk)
}
