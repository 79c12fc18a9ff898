use actix_web::{delete, get, post, put, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use entity::company_license::Party;
use entity::inquiry;
use std::sync::Arc;

use crate::db::companies::hash_password;
use crate::db::database_service::DatabaseService;
use crate::types::company::{validate_registration, DBCompanyCreate, RCompanyUpdate, RSupplierCreate, SupplierView};
use crate::types::proposal::ProposalView;
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::otp;

#[post("/suppliers")]
pub async fn register(
    db: web::Data<Arc<DatabaseService>>,
    data: web::Json<RSupplierCreate>,
) -> ApiResult<SupplierView> {
    let data = data.into_inner();
    validate_registration(
        &data.company_name,
        &data.commercial_record,
        &data.email,
        &data.phone,
        &data.password,
    )?;
    otp::verify_registration(&data.phone, data.otp_code.as_deref()).await?;

    let supplier = db
        .create_supplier(DBCompanyCreate {
            company_name: data.company_name.trim().to_string(),
            commercial_record: data.commercial_record.trim().to_string(),
            email: data.email.trim().to_lowercase(),
            phone: data.phone.trim().to_string(),
            password_hash: hash_password(&data.password)?,
            domain_id: data.domain_id,
            sub_domain_id: data.sub_domain_id,
            city_id: data.city_id,
        })
        .await?;
    Ok(ApiResponse::Created(supplier.into()))
}

#[get("/suppliers")]
pub async fn list(db: web::Data<Arc<DatabaseService>>) -> ApiResult<Vec<SupplierView>> {
    let suppliers = db.list_suppliers().await?;
    Ok(ApiResponse::Ok(suppliers.into_iter().map(SupplierView::from).collect()))
}

#[get("/suppliers/{id}")]
pub async fn show(db: web::Data<Arc<DatabaseService>>, path: web::Path<i32>) -> ApiResult<SupplierView> {
    Ok(ApiResponse::Ok(db.get_supplier(path.into_inner()).await?.into()))
}

#[put("/suppliers/{id}")]
pub async fn update(
    db: web::Data<Arc<DatabaseService>>,
    auth: BearerAuth,
    path: web::Path<i32>,
    data: web::Json<RCompanyUpdate>,
) -> ApiResult<SupplierView> {
    let id = path.into_inner();
    db.authenticate(auth.token()).await?.ensure_is(Party::Supplier, id)?;
    let patch = data.into_inner();
    patch.validate()?;
    Ok(ApiResponse::Ok(db.update_supplier(id, patch).await?.into()))
}

#[delete("/suppliers/{id}")]
pub async fn remove(
    db: web::Data<Arc<DatabaseService>>,
    auth: BearerAuth,
    path: web::Path<i32>,
) -> ApiResult<()> {
    let id = path.into_inner();
    db.authenticate(auth.token()).await?.ensure_is(Party::Supplier, id)?;
    db.delete_supplier(id).await?;
    Ok(ApiResponse::EmptyOk)
}

#[get("/suppliers/{id}/proposals")]
pub async fn proposals(
    db: web::Data<Arc<DatabaseService>>,
    auth: BearerAuth,
    path: web::Path<i32>,
) -> ApiResult<Vec<ProposalView>> {
    let id = path.into_inner();
    db.authenticate(auth.token()).await?.ensure_is(Party::Supplier, id)?;
    Ok(ApiResponse::Ok(db.list_supplier_proposals(id).await?))
}

#[get("/suppliers/{id}/inquiries")]
pub async fn inquiries(
    db: web::Data<Arc<DatabaseService>>,
    auth: BearerAuth,
    path: web::Path<i32>,
) -> ApiResult<Vec<inquiry::Model>> {
    let id = path.into_inner();
    db.authenticate(auth.token()).await?.ensure_is(Party::Supplier, id)?;
    Ok(ApiResponse::Ok(db.list_supplier_inquiries(id).await?))
}
