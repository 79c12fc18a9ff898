use entity::company_license::Party;
use serde::{Deserialize, Serialize};

use crate::types::company::{BuyerView, SupplierView};
use crate::types::error::AppError;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RLogin {
    pub email: String,
    pub password: String,
}

impl RLogin {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(AppError::Validation("email and password are required".into()));
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ROtpSend {
    pub phone: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(tag = "party", content = "account", rename_all = "lowercase")]
pub enum Account {
    Buyer(BuyerView),
    Supplier(SupplierView),
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginRes {
    pub token: String,
    #[serde(flatten)]
    pub account: Account,
}

/// The caller behind a validated bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub party: Party,
    pub id: i32,
}

impl Identity {
    pub fn buyer_id(&self) -> Result<i32, AppError> {
        match self.party {
            Party::Buyer => Ok(self.id),
            Party::Supplier => Err(AppError::Forbidden),
        }
    }

    pub fn supplier_id(&self) -> Result<i32, AppError> {
        match self.party {
            Party::Supplier => Ok(self.id),
            Party::Buyer => Err(AppError::Forbidden),
        }
    }

    /// Succeeds only when the caller is exactly this account.
    pub fn ensure_is(&self, party: Party, id: i32) -> Result<(), AppError> {
        if self.party == party && self.id == id {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }
}
