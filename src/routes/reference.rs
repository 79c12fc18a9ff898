use actix_web::{get, web};
use entity::{certificate, city, domain, license, region, sub_domain};
use std::sync::Arc;

use crate::db::database_service::DatabaseService;
use crate::types::response::{ApiResponse, ApiResult};

#[get("/domains")]
pub async fn domains(db: web::Data<Arc<DatabaseService>>) -> ApiResult<Vec<domain::Model>> {
    Ok(ApiResponse::Ok(db.list_domains().await?))
}

#[get("/domains/{id}/sub-domains")]
pub async fn sub_domains(
    db: web::Data<Arc<DatabaseService>>,
    path: web::Path<i32>,
) -> ApiResult<Vec<sub_domain::Model>> {
    Ok(ApiResponse::Ok(db.list_sub_domains(path.into_inner()).await?))
}

#[get("/regions")]
pub async fn regions(db: web::Data<Arc<DatabaseService>>) -> ApiResult<Vec<region::Model>> {
    Ok(ApiResponse::Ok(db.list_regions().await?))
}

#[get("/regions/{id}/cities")]
pub async fn cities(
    db: web::Data<Arc<DatabaseService>>,
    path: web::Path<i32>,
) -> ApiResult<Vec<city::Model>> {
    Ok(ApiResponse::Ok(db.list_cities(path.into_inner()).await?))
}

#[get("/licenses")]
pub async fn licenses(db: web::Data<Arc<DatabaseService>>) -> ApiResult<Vec<license::Model>> {
    Ok(ApiResponse::Ok(db.list_licenses().await?))
}

#[get("/certificates")]
pub async fn certificates(db: web::Data<Arc<DatabaseService>>) -> ApiResult<Vec<certificate::Model>> {
    Ok(ApiResponse::Ok(db.list_certificates().await?))
}
