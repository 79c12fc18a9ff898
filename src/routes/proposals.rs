use actix_multipart::Multipart;
use actix_web::http::header::{
    Charset, ContentDisposition, DispositionParam, DispositionType, ExtendedValue,
};
use actix_web::{get, post, web, HttpResponse};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use chrono::Utc;
use entity::company_license::Party;
use entity::proposal_file::FileKind;
use std::sync::Arc;

use crate::config::config;
use crate::db::database_service::DatabaseService;
use crate::types::error::AppError;
use crate::types::proposal::ProposalView;
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::multipart::ProposalForm;

#[post("/tenders/{id}/proposals")]
pub async fn submit(
    db: web::Data<Arc<DatabaseService>>,
    auth: BearerAuth,
    path: web::Path<i32>,
    payload: Multipart,
) -> ApiResult<ProposalView> {
    let tender_id = path.into_inner();
    let supplier_id = db.authenticate(auth.token()).await?.supplier_id()?;

    let submission = ProposalForm::read(payload, config().max_upload_bytes)
        .await?
        .into_submission()?;
    if submission.tender_id != tender_id {
        return Err(AppError::Validation("tender_id does not match the url".into()));
    }
    if submission.supplier_id != supplier_id {
        return Err(AppError::Forbidden);
    }

    Ok(ApiResponse::Created(db.submit_proposal(submission, Utc::now()).await?))
}

#[get("/tenders/{id}/proposals")]
pub async fn list_for_tender(
    db: web::Data<Arc<DatabaseService>>,
    auth: BearerAuth,
    path: web::Path<i32>,
) -> ApiResult<Vec<ProposalView>> {
    let buyer_id = db.authenticate(auth.token()).await?.buyer_id()?;
    Ok(ApiResponse::Ok(db.list_tender_proposals(path.into_inner(), buyer_id).await?))
}

/// Plain ASCII `filename` for old clients plus the exact UTF-8 name as `filename*`.
fn attachment_name(file_name: &str) -> Vec<DispositionParam> {
    let ascii: String = file_name
        .chars()
        .map(|c| if c.is_ascii() && !c.is_ascii_control() && c != '"' { c } else { '_' })
        .collect();
    vec![
        DispositionParam::Filename(ascii),
        DispositionParam::FilenameExt(ExtendedValue {
            charset: Charset::Ext("UTF-8".to_string()),
            language_tag: None,
            value: file_name.as_bytes().to_vec(),
        }),
    ]
}

/// Raw attachment bytes, for the tender's buyer or the submitting supplier.
#[get("/proposals/{id}/files/{kind}")]
pub async fn download_file(
    db: web::Data<Arc<DatabaseService>>,
    auth: BearerAuth,
    path: web::Path<(i32, String)>,
) -> Result<HttpResponse, AppError> {
    let (proposal_id, kind) = path.into_inner();
    let kind = FileKind::parse(&kind)
        .ok_or_else(|| AppError::BadRequest(format!("unknown file kind {kind}")))?;
    let me = db.authenticate(auth.token()).await?;

    let p = db.get_proposal(proposal_id).await?;
    let allowed = match me.party {
        Party::Supplier => p.supplier_id == me.id,
        Party::Buyer => db.get_tender(p.tender_id).await?.buyer_id == me.id,
    };
    if !allowed {
        return Err(AppError::Forbidden);
    }

    let file = db.get_proposal_file(proposal_id, kind).await?;
    Ok(HttpResponse::Ok()
        .content_type("application/octet-stream")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: attachment_name(&file.file_name),
        })
        .body(file.data))
}
