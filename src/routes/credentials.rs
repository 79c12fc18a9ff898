//! License and certificate links, mounted under both `/buyers` and `/suppliers`.

use actix_web::{delete, get, post, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use entity::company_license::Party;
use entity::{certificate, license};
use std::sync::Arc;

use crate::db::database_service::DatabaseService;
use crate::types::credential::{RCertificateLink, RLicenseLink};
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};

fn party_of(segment: &str) -> Result<Party, AppError> {
    match segment {
        "buyers" => Ok(Party::Buyer),
        "suppliers" => Ok(Party::Supplier),
        other => Err(AppError::NotFound(format!("unknown company kind {other}"))),
    }
}

/// Writes are reserved to the company itself.
async fn owner(
    db: &DatabaseService,
    auth: &BearerAuth,
    segment: &str,
    company_id: i32,
) -> Result<Party, AppError> {
    let party = party_of(segment)?;
    db.authenticate(auth.token()).await?.ensure_is(party, company_id)?;
    Ok(party)
}

#[get("/{party:buyers|suppliers}/{id}/licenses")]
pub async fn list_licenses(
    db: web::Data<Arc<DatabaseService>>,
    path: web::Path<(String, i32)>,
) -> ApiResult<Vec<license::Model>> {
    let (segment, id) = path.into_inner();
    Ok(ApiResponse::Ok(db.list_company_licenses(party_of(&segment)?, id).await?))
}

#[post("/{party:buyers|suppliers}/{id}/licenses")]
pub async fn attach_license(
    db: web::Data<Arc<DatabaseService>>,
    auth: BearerAuth,
    path: web::Path<(String, i32)>,
    data: web::Json<RLicenseLink>,
) -> ApiResult<license::Model> {
    let (segment, id) = path.into_inner();
    let party = owner(&db, &auth, &segment, id).await?;
    Ok(ApiResponse::Created(db.attach_license(party, id, data.license_id).await?))
}

#[delete("/{party:buyers|suppliers}/{id}/licenses/{license_id}")]
pub async fn detach_license(
    db: web::Data<Arc<DatabaseService>>,
    auth: BearerAuth,
    path: web::Path<(String, i32, i32)>,
) -> ApiResult<()> {
    let (segment, id, license_id) = path.into_inner();
    let party = owner(&db, &auth, &segment, id).await?;
    db.detach_license(party, id, license_id).await?;
    Ok(ApiResponse::EmptyOk)
}

#[get("/{party:buyers|suppliers}/{id}/certificates")]
pub async fn list_certificates(
    db: web::Data<Arc<DatabaseService>>,
    path: web::Path<(String, i32)>,
) -> ApiResult<Vec<certificate::Model>> {
    let (segment, id) = path.into_inner();
    Ok(ApiResponse::Ok(db.list_company_certificates(party_of(&segment)?, id).await?))
}

#[post("/{party:buyers|suppliers}/{id}/certificates")]
pub async fn attach_certificate(
    db: web::Data<Arc<DatabaseService>>,
    auth: BearerAuth,
    path: web::Path<(String, i32)>,
    data: web::Json<RCertificateLink>,
) -> ApiResult<certificate::Model> {
    let (segment, id) = path.into_inner();
    let party = owner(&db, &auth, &segment, id).await?;
    Ok(ApiResponse::Created(db.attach_certificate(party, id, data.certificate_id).await?))
}

#[delete("/{party:buyers|suppliers}/{id}/certificates/{certificate_id}")]
pub async fn detach_certificate(
    db: web::Data<Arc<DatabaseService>>,
    auth: BearerAuth,
    path: web::Path<(String, i32, i32)>,
) -> ApiResult<()> {
    let (segment, id, certificate_id) = path.into_inner();
    let party = owner(&db, &auth, &segment, id).await?;
    db.detach_certificate(party, id, certificate_id).await?;
    Ok(ApiResponse::EmptyOk)
}
