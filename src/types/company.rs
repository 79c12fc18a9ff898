use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::error::AppError;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RBuyerCreate {
    pub company_name: String,
    pub commercial_record: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub domain_id: i32,
    pub city_id: i32,
    pub otp_code: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RSupplierCreate {
    pub company_name: String,
    pub commercial_record: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub domain_id: i32,
    pub sub_domain_id: Option<i32>,
    pub city_id: i32,
    pub otp_code: Option<String>,
}

/// Partial profile update shared by buyers and suppliers.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct RCompanyUpdate {
    pub company_name: Option<String>,
    pub commercial_record: Option<String>,
    pub phone: Option<String>,
    pub password: Option<String>,
    pub domain_id: Option<i32>,
    pub sub_domain_id: Option<i32>,
    pub city_id: Option<i32>,
}

/// What the db layer stores once the password has been hashed.
#[derive(Debug, Clone)]
pub struct DBCompanyCreate {
    pub company_name: String,
    pub commercial_record: String,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
    pub domain_id: i32,
    pub sub_domain_id: Option<i32>,
    pub city_id: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BuyerView {
    pub id: i32,
    pub company_name: String,
    pub commercial_record: String,
    pub email: String,
    pub phone: String,
    pub domain_id: i32,
    pub city_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<entity::buyer::Model> for BuyerView {
    fn from(m: entity::buyer::Model) -> Self {
        BuyerView {
            id: m.id,
            company_name: m.company_name,
            commercial_record: m.commercial_record,
            email: m.email,
            phone: m.phone,
            domain_id: m.domain_id,
            city_id: m.city_id,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SupplierView {
    pub id: i32,
    pub company_name: String,
    pub commercial_record: String,
    pub email: String,
    pub phone: String,
    pub domain_id: i32,
    pub sub_domain_id: Option<i32>,
    pub city_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<entity::supplier::Model> for SupplierView {
    fn from(m: entity::supplier::Model) -> Self {
        SupplierView {
            id: m.id,
            company_name: m.company_name,
            commercial_record: m.commercial_record,
            email: m.email,
            phone: m.phone,
            domain_id: m.domain_id,
            sub_domain_id: m.sub_domain_id,
            city_id: m.city_id,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

pub const MIN_PASSWORD_LEN: usize = 8;

fn require(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} is required")));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), AppError> {
    require(email, "email")?;
    let (local, host) = email
        .split_once('@')
        .ok_or_else(|| AppError::Validation("email is invalid".into()))?;
    if local.is_empty() || !host.contains('.') {
        return Err(AppError::Validation("email is invalid".into()));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), AppError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

/// Field checks common to both registration forms.
pub fn validate_registration(
    company_name: &str,
    commercial_record: &str,
    email: &str,
    phone: &str,
    password: &str,
) -> Result<(), AppError> {
    require(company_name, "company_name")?;
    require(commercial_record, "commercial_record")?;
    require(phone, "phone")?;
    validate_email(email)?;
    validate_password(password)
}

impl RCompanyUpdate {
    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(name) = &self.company_name {
            require(name, "company_name")?;
        }
        if let Some(record) = &self.commercial_record {
            require(record, "commercial_record")?;
        }
        if let Some(phone) = &self.phone {
            require(phone, "phone")?;
        }
        if let Some(password) = &self.password {
            validate_password(password)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_rejects_blank_and_malformed_fields() {
        assert!(validate_registration("Acme", "CR-1", "ops@acme.sa", "0500000000", "s3cret-pass").is_ok());
        assert!(validate_registration(" ", "CR-1", "ops@acme.sa", "0500000000", "s3cret-pass").is_err());
        assert!(validate_registration("Acme", "CR-1", "ops.acme.sa", "0500000000", "s3cret-pass").is_err());
        assert!(validate_registration("Acme", "CR-1", "ops@localhost", "0500000000", "s3cret-pass").is_err());
        assert!(validate_registration("Acme", "CR-1", "ops@acme.sa", "0500000000", "short").is_err());
    }

    #[test]
    fn empty_update_is_valid() {
        assert!(RCompanyUpdate::default().validate().is_ok());
        let bad = RCompanyUpdate { phone: Some("".into()), ..Default::default() };
        assert!(bad.validate().is_err());
    }
}
