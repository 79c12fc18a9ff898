use actix_web::{delete, get, post, put, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use entity::company_license::Party;
use std::sync::Arc;

use crate::db::companies::hash_password;
use crate::db::database_service::DatabaseService;
use crate::types::company::{validate_registration, BuyerView, DBCompanyCreate, RBuyerCreate, RCompanyUpdate};
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::tender::TenderView;
use crate::utils::otp;

#[post("/buyers")]
pub async fn register(
    db: web::Data<Arc<DatabaseService>>,
    data: web::Json<RBuyerCreate>,
) -> ApiResult<BuyerView> {
    let data = data.into_inner();
    validate_registration(
        &data.company_name,
        &data.commercial_record,
        &data.email,
        &data.phone,
        &data.password,
    )?;
    otp::verify_registration(&data.phone, data.otp_code.as_deref()).await?;

    let buyer = db
        .create_buyer(DBCompanyCreate {
            company_name: data.company_name.trim().to_string(),
            commercial_record: data.commercial_record.trim().to_string(),
            email: data.email.trim().to_lowercase(),
            phone: data.phone.trim().to_string(),
            password_hash: hash_password(&data.password)?,
            domain_id: data.domain_id,
            sub_domain_id: None,
            city_id: data.city_id,
        })
        .await?;
    Ok(ApiResponse::Created(buyer.into()))
}

#[get("/buyers")]
pub async fn list(db: web::Data<Arc<DatabaseService>>) -> ApiResult<Vec<BuyerView>> {
    let buyers = db.list_buyers().await?;
    Ok(ApiResponse::Ok(buyers.into_iter().map(BuyerView::from).collect()))
}

#[get("/buyers/{id}")]
pub async fn show(db: web::Data<Arc<DatabaseService>>, path: web::Path<i32>) -> ApiResult<BuyerView> {
    Ok(ApiResponse::Ok(db.get_buyer(path.into_inner()).await?.into()))
}

#[put("/buyers/{id}")]
pub async fn update(
    db: web::Data<Arc<DatabaseService>>,
    auth: BearerAuth,
    path: web::Path<i32>,
    data: web::Json<RCompanyUpdate>,
) -> ApiResult<BuyerView> {
    let id = path.into_inner();
    db.authenticate(auth.token()).await?.ensure_is(Party::Buyer, id)?;
    let patch = data.into_inner();
    patch.validate()?;
    Ok(ApiResponse::Ok(db.update_buyer(id, patch).await?.into()))
}

#[delete("/buyers/{id}")]
pub async fn remove(
    db: web::Data<Arc<DatabaseService>>,
    auth: BearerAuth,
    path: web::Path<i32>,
) -> ApiResult<()> {
    let id = path.into_inner();
    db.authenticate(auth.token()).await?.ensure_is(Party::Buyer, id)?;
    db.delete_buyer(id).await?;
    Ok(ApiResponse::EmptyOk)
}

#[get("/buyers/{id}/tenders")]
pub async fn tenders(db: web::Data<Arc<DatabaseService>>, path: web::Path<i32>) -> ApiResult<Vec<TenderView>> {
    let listings = db.list_buyer_tenders(path.into_inner()).await?;
    Ok(ApiResponse::Ok(listings.into_iter().map(TenderView::from).collect()))
}
