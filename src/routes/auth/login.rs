use actix_web::{post, web};
use std::sync::Arc;

use crate::db::database_service::DatabaseService;
use crate::types::auth::{LoginRes, RLogin};
use crate::types::response::{ApiResponse, ApiResult};

#[post("/login")]
pub async fn buyer_login(
    db: web::Data<Arc<DatabaseService>>,
    data: web::Json<RLogin>,
) -> ApiResult<LoginRes> {
    data.validate()?;
    Ok(ApiResponse::Ok(db.login_buyer(&data.email, &data.password).await?))
}

#[post("/supplier/login")]
pub async fn supplier_login(
    db: web::Data<Arc<DatabaseService>>,
    data: web::Json<RLogin>,
) -> ApiResult<LoginRes> {
    data.validate()?;
    Ok(ApiResponse::Ok(db.login_supplier(&data.email, &data.password).await?))
}
