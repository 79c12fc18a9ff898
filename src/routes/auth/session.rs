use actix_web::{get, post, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use std::sync::Arc;

use crate::db::database_service::DatabaseService;
use crate::types::auth::Account;
use crate::types::response::{ApiResponse, ApiResult};

#[post("/logout")]
pub async fn logout(db: web::Data<Arc<DatabaseService>>, auth: BearerAuth) -> ApiResult<()> {
    let identity = db.authenticate(auth.token()).await?;
    db.end_session(identity).await?;
    Ok(ApiResponse::EmptyOk)
}

#[get("/me")]
pub async fn me(db: web::Data<Arc<DatabaseService>>, auth: BearerAuth) -> ApiResult<Account> {
    let me = db.authenticate(auth.token()).await?;
    Ok(ApiResponse::Ok(db.account(me).await?))
}
