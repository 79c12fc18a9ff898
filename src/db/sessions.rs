use chrono::Utc;
use entity::company_license::Party;
use entity::{buyer, supplier};
use sea_orm::{ActiveModelTrait, Set};
use tracing::{info, warn};

use crate::db::database_service::DatabaseService;
use crate::types::auth::{Account, Identity, LoginRes};
use crate::types::error::AppError;
use crate::utils::token::{construct_token, extract_token_parts, hash_secret, new_token, verify_secret};

fn password_matches(password: &str, hash: &str) -> bool {
    match verify_secret(password, hash) {
        Ok(ok) => ok,
        Err(e) => {
            warn!("stored password hash unreadable: {e}");
            false
        }
    }
}

fn new_session() -> Result<(String, String), AppError> {
    let secret = new_token();
    let hash = hash_secret(&secret)
        .map_err(|e| AppError::Internal(format!("hash session failed: {e}")))?;
    Ok((secret, hash))
}

impl DatabaseService {
    /// Verifies the credentials and rotates the buyer's session.
    pub async fn login_buyer(&self, email: &str, password: &str) -> Result<LoginRes, AppError> {
        let b = self
            .get_buyer_by_email(&email.trim().to_lowercase())
            .await?
            .ok_or(AppError::Unauthorized)?;
        if !password_matches(password, &b.password_hash) {
            return Err(AppError::Unauthorized);
        }

        let (secret, hash) = new_session()?;
        let mut am: buyer::ActiveModel = b.into();
        am.session_hash = Set(Some(hash));
        am.updated_at = Set(Utc::now());
        let b = am.update(&self.database_connection).await?;
        info!("buyer {} logged in", b.id);

        Ok(LoginRes {
            token: construct_token(Party::Buyer, b.id, &secret),
            account: Account::Buyer(b.into()),
        })
    }

    pub async fn login_supplier(&self, email: &str, password: &str) -> Result<LoginRes, AppError> {
        let s = self
            .get_supplier_by_email(&email.trim().to_lowercase())
            .await?
            .ok_or(AppError::Unauthorized)?;
        if !password_matches(password, &s.password_hash) {
            return Err(AppError::Unauthorized);
        }

        let (secret, hash) = new_session()?;
        let mut am: supplier::ActiveModel = s.into();
        am.session_hash = Set(Some(hash));
        am.updated_at = Set(Utc::now());
        let s = am.update(&self.database_connection).await?;
        info!("supplier {} logged in", s.id);

        Ok(LoginRes {
            token: construct_token(Party::Supplier, s.id, &secret),
            account: Account::Supplier(s.into()),
        })
    }

    /// Resolves a bearer token to the account it was issued for.
    pub async fn authenticate(&self, token: &str) -> Result<Identity, AppError> {
        let (party, id, secret) = extract_token_parts(token).ok_or(AppError::Unauthorized)?;
        let found = match party {
            Party::Buyer => self.get_buyer(id).await.map(|b| b.session_hash),
            Party::Supplier => self.get_supplier(id).await.map(|s| s.session_hash),
        };
        // a deleted account is an invalid token; anything else is a real failure
        let stored = match found {
            Ok(hash) => hash,
            Err(AppError::NotFound(_)) => None,
            Err(e) => return Err(e),
        };
        let Some(stored) = stored else {
            return Err(AppError::Unauthorized);
        };
        if !password_matches(&secret, &stored) {
            return Err(AppError::Unauthorized);
        }
        Ok(Identity { party, id })
    }

    pub async fn account(&self, identity: Identity) -> Result<Account, AppError> {
        Ok(match identity.party {
            Party::Buyer => Account::Buyer(self.get_buyer(identity.id).await?.into()),
            Party::Supplier => Account::Supplier(self.get_supplier(identity.id).await?.into()),
        })
    }

    pub async fn end_session(&self, identity: Identity) -> Result<(), AppError> {
        match identity.party {
            Party::Buyer => {
                let mut am: buyer::ActiveModel = self.get_buyer(identity.id).await?.into();
                am.session_hash = Set(None);
                am.update(&self.database_connection).await?;
            }
            Party::Supplier => {
                let mut am: supplier::ActiveModel = self.get_supplier(identity.id).await?.into();
                am.session_hash = Set(None);
                am.update(&self.database_connection).await?;
            }
        }
        info!("{:?} {} logged out", identity.party, identity.id);
        Ok(())
    }
}
