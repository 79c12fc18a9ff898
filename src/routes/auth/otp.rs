use actix_web::{post, web};

use crate::types::auth::ROtpSend;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::otp;

#[post("/otp/send")]
pub async fn send_otp(data: web::Json<ROtpSend>) -> ApiResult<()> {
    let phone = data.phone.trim();
    if phone.is_empty() {
        return Err(AppError::Validation("phone is required".into()));
    }
    otp::send_code(phone).await?;
    Ok(ApiResponse::EmptyOk)
}
