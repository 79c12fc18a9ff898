use std::time::Duration;

use reqwest::{Client, ClientBuilder};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::config::config;
use crate::types::error::AppError;

#[derive(Serialize)]
struct SendRequest<'a> {
    phone: &'a str,
}

#[derive(Serialize)]
struct CheckRequest<'a> {
    phone: &'a str,
    code: &'a str,
}

#[derive(Deserialize)]
struct CheckResponse {
    approved: bool,
}

fn client() -> Result<Client, AppError> {
    ClientBuilder::new()
        .user_agent("tawreed/0.1 (+reqwest)")
        .pool_idle_timeout(Duration::from_secs(30))
        .timeout(Duration::from_secs(15))
        .build()
        .map_err(|e| AppError::Internal(format!("build otp client failed: {e}")))
}

/// Asks the verification service to text a code to `phone`.
pub async fn send_code(phone: &str) -> Result<(), AppError> {
    let otp = &config().otp;
    if !otp.enabled {
        info!("otp disabled, not sending code");
        return Ok(());
    }

    let res = client()?
        .post(format!("{}/send", otp.endpoint.trim_end_matches('/')))
        .bearer_auth(&otp.api_key)
        .json(&SendRequest { phone })
        .send()
        .await
        .map_err(|e| AppError::Internal(format!("otp send failed: {e}")))?;

    if !res.status().is_success() {
        error!("otp service refused send: HTTP {}", res.status());
        return Err(AppError::BadRequest("could not send verification code".into()));
    }
    Ok(())
}

/// True when `code` is the one sent to `phone`. Always true with OTP disabled.
pub async fn check_code(phone: &str, code: &str) -> Result<bool, AppError> {
    let otp = &config().otp;
    if !otp.enabled {
        return Ok(true);
    }
    if code.trim().is_empty() {
        return Ok(false);
    }

    let res = client()?
        .post(format!("{}/check", otp.endpoint.trim_end_matches('/')))
        .bearer_auth(&otp.api_key)
        .json(&CheckRequest { phone, code })
        .send()
        .await
        .map_err(|e| AppError::Internal(format!("otp check failed: {e}")))?;

    if !res.status().is_success() {
        error!("otp service refused check: HTTP {}", res.status());
        return Ok(false);
    }

    let body: CheckResponse = res
        .json()
        .await
        .map_err(|e| AppError::Internal(format!("otp check body unreadable: {e}")))?;
    Ok(body.approved)
}

/// Registration gate: with OTP on, `otp_code` must be present and approved.
pub async fn verify_registration(phone: &str, otp_code: Option<&str>) -> Result<(), AppError> {
    if !config().otp.enabled {
        return Ok(());
    }
    let code = otp_code
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::Validation("otp_code is required".into()))?;
    if !check_code(phone, code).await? {
        return Err(AppError::BadRequest("verification code rejected".into()));
    }
    Ok(())
}
