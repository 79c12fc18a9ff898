use crate::types::error::AppError;
use actix_web::{HttpResponse, Responder};
use serde::Serialize;

pub enum ApiResponse<T> {
    Ok(T),
    EmptyOk,
    Created(T),
    NoContent,
}

/// Every successful JSON body is `{"success": true, "data": ...}`.
#[derive(Serialize)]
struct Envelope<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

impl<T> Envelope<T> {
    fn with(data: Option<T>) -> Self {
        Envelope { success: true, data }
    }
}

impl<T: Serialize> Responder for ApiResponse<T> {
    type Body = actix_web::body::BoxBody;
    fn respond_to(self, _: &actix_web::HttpRequest) -> HttpResponse {
        match self {
            ApiResponse::Ok(v) => HttpResponse::Ok().json(Envelope::with(Some(v))),
            ApiResponse::EmptyOk => HttpResponse::Ok().json(Envelope::<T>::with(None)),
            ApiResponse::Created(v) => HttpResponse::Created()
                .json(Envelope::with(Some(v))),
            ApiResponse::NoContent => HttpResponse::NoContent().finish(),
        }
    }
}

pub type ApiResult<T> = Result<ApiResponse<T>, AppError>;
