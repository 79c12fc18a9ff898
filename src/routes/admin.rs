use actix_web::{post, web};
use chrono::Utc;
use entity::{certificate, city, domain, license, region, sub_domain};
use std::sync::Arc;

use crate::db::database_service::DatabaseService;
use crate::types::error::AppError;
use crate::types::reference::RNamed;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::tender::ExpireRes;

fn named(data: web::Json<RNamed>) -> Result<RNamed, AppError> {
    let data = data.into_inner();
    if data.is_blank() {
        return Err(AppError::Validation("name_ar and name_en are required".into()));
    }
    Ok(RNamed {
        name_ar: data.name_ar.trim().to_string(),
        name_en: data.name_en.trim().to_string(),
    })
}

#[post("/domains")]
pub async fn create_domain(
    db: web::Data<Arc<DatabaseService>>,
    data: web::Json<RNamed>,
) -> ApiResult<domain::Model> {
    Ok(ApiResponse::Created(db.create_domain(named(data)?).await?))
}

#[post("/domains/{id}/sub-domains")]
pub async fn create_sub_domain(
    db: web::Data<Arc<DatabaseService>>,
    path: web::Path<i32>,
    data: web::Json<RNamed>,
) -> ApiResult<sub_domain::Model> {
    Ok(ApiResponse::Created(
        db.create_sub_domain(path.into_inner(), named(data)?).await?,
    ))
}

#[post("/regions")]
pub async fn create_region(
    db: web::Data<Arc<DatabaseService>>,
    data: web::Json<RNamed>,
) -> ApiResult<region::Model> {
    Ok(ApiResponse::Created(db.create_region(named(data)?).await?))
}

#[post("/regions/{id}/cities")]
pub async fn create_city(
    db: web::Data<Arc<DatabaseService>>,
    path: web::Path<i32>,
    data: web::Json<RNamed>,
) -> ApiResult<city::Model> {
    Ok(ApiResponse::Created(
        db.create_city(path.into_inner(), named(data)?).await?,
    ))
}

#[post("/licenses")]
pub async fn create_license(
    db: web::Data<Arc<DatabaseService>>,
    data: web::Json<RNamed>,
) -> ApiResult<license::Model> {
    Ok(ApiResponse::Created(db.create_license(named(data)?).await?))
}

#[post("/certificates")]
pub async fn create_certificate(
    db: web::Data<Arc<DatabaseService>>,
    data: web::Json<RNamed>,
) -> ApiResult<certificate::Model> {
    Ok(ApiResponse::Created(db.create_certificate(named(data)?).await?))
}

/// Same sweep the background job runs, on demand.
#[post("/tenders/expire")]
pub async fn expire_tenders(db: web::Data<Arc<DatabaseService>>) -> ApiResult<ExpireRes> {
    Ok(ApiResponse::Ok(db.expire_tenders(Utc::now()).await?))
}
