use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::middleware::ErrorHandlerResponse;
use actix_web::ResponseError;
use actix_web_httpauth::extractors::bearer::BearerAuth;
use tracing::warn;

use crate::config::config;
use crate::types::error::AppError;

pub async fn validate_admin_token(
    req: ServiceRequest,
    credentials: BearerAuth,
) -> Result<ServiceRequest, (actix_web::Error, ServiceRequest)> {
    if credentials.token() == config().admin_key {
        Ok(req)
    } else {
        warn!("rejected admin call to {}", req.path());
        Err((AppError::Unauthorized.into(), req))
    }
}

/// Gives bodiless 401s from the bearer extractor the usual error shape.
///
/// Responses that already carry a body pass through untouched.
pub fn render_unauthorized<B>(
    res: ServiceResponse<B>,
) -> actix_web::Result<ErrorHandlerResponse<B>> {
    if res.headers().contains_key(header::CONTENT_TYPE) {
        return Ok(ErrorHandlerResponse::Response(res.map_into_left_body()));
    }

    let challenge = res.headers().get(header::WWW_AUTHENTICATE).cloned();
    let (req, _) = res.into_parts();
    let mut body = AppError::Unauthorized.error_response();
    if let Some(challenge) = challenge {
        body.headers_mut().insert(header::WWW_AUTHENTICATE, challenge);
    }
    Ok(ErrorHandlerResponse::Response(
        ServiceResponse::new(req, body).map_into_right_body(),
    ))
}
