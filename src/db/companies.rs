use chrono::Utc;
use entity::company_license::Party;
use entity::{buyer, company_certificate, company_license, supplier, tender};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::info;

use crate::db::database_service::DatabaseService;
use crate::types::company::{DBCompanyCreate, RCompanyUpdate};
use crate::types::error::AppError;
use crate::utils::token::hash_secret;

pub(crate) fn hash_password(password: &str) -> Result<String, AppError> {
    hash_secret(password).map_err(|e| AppError::Internal(format!("hash password failed: {e}")))
}

impl DatabaseService {
    /// Domain, city and (optionally) sub-domain must exist and agree.
    pub async fn check_location(
        &self,
        domain_id: i32,
        city_id: i32,
        sub_domain_id: Option<i32>,
    ) -> Result<(), AppError> {
        self.get_domain(domain_id).await?;
        self.get_city(city_id).await?;
        if let Some(sd) = sub_domain_id {
            self.check_sub_domain(domain_id, sd).await?;
        }
        Ok(())
    }

    // buyers

    pub async fn buyer_exists_by_email(&self, email: &str) -> Result<bool, AppError> {
        Ok(buyer::Entity::find()
            .filter(buyer::Column::Email.eq(email))
            .count(&self.database_connection)
            .await?
            > 0)
    }

    pub async fn create_buyer(&self, payload: DBCompanyCreate) -> Result<buyer::Model, AppError> {
        if self.buyer_exists_by_email(&payload.email).await? {
            return Err(AppError::AlreadyExists);
        }
        self.check_location(payload.domain_id, payload.city_id, None).await?;

        let now = Utc::now();
        let am = buyer::ActiveModel {
            company_name: Set(payload.company_name),
            commercial_record: Set(payload.commercial_record),
            email: Set(payload.email),
            phone: Set(payload.phone),
            password_hash: Set(payload.password_hash),
            session_hash: Set(None),
            domain_id: Set(payload.domain_id),
            city_id: Set(payload.city_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let res = buyer::Entity::insert(am).exec(&self.database_connection).await?;
        info!("registered buyer {}", res.last_insert_id);
        self.get_buyer(res.last_insert_id).await
    }

    pub async fn get_buyer(&self, id: i32) -> Result<buyer::Model, AppError> {
        buyer::Entity::find_by_id(id)
            .one(&self.database_connection)
            .await?
            .ok_or_else(|| AppError::not_found("buyer", id))
    }

    pub async fn get_buyer_by_email(&self, email: &str) -> Result<Option<buyer::Model>, AppError> {
        Ok(buyer::Entity::find()
            .filter(buyer::Column::Email.eq(email))
            .one(&self.database_connection)
            .await?)
    }

    pub async fn list_buyers(&self) -> Result<Vec<buyer::Model>, AppError> {
        Ok(buyer::Entity::find()
            .order_by_asc(buyer::Column::Id)
            .all(&self.database_connection)
            .await?)
    }

    pub async fn update_buyer(&self, id: i32, patch: RCompanyUpdate) -> Result<buyer::Model, AppError> {
        let current = self.get_buyer(id).await?;
        let domain_id = patch.domain_id.unwrap_or(current.domain_id);
        let city_id = patch.city_id.unwrap_or(current.city_id);
        if patch.domain_id.is_some() || patch.city_id.is_some() {
            self.check_location(domain_id, city_id, None).await?;
        }

        let mut am: buyer::ActiveModel = current.into();
        if let Some(v) = patch.company_name {
            am.company_name = Set(v);
        }
        if let Some(v) = patch.commercial_record {
            am.commercial_record = Set(v);
        }
        if let Some(v) = patch.phone {
            am.phone = Set(v);
        }
        if let Some(pw) = patch.password {
            am.password_hash = Set(hash_password(&pw)?);
            // a new password signs out every session
            am.session_hash = Set(None);
        }
        am.domain_id = Set(domain_id);
        am.city_id = Set(city_id);
        am.updated_at = Set(Utc::now());
        Ok(am.update(&self.database_connection).await?)
    }

    /// Refused while the buyer still owns tenders.
    pub async fn delete_buyer(&self, id: i32) -> Result<(), AppError> {
        let txn = self.database_connection.begin().await?;
        let b = buyer::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::not_found("buyer", id))?;
        let tenders = tender::Entity::find()
            .filter(tender::Column::BuyerId.eq(id))
            .count(&txn)
            .await?;
        if tenders > 0 {
            txn.rollback().await?;
            return Err(AppError::Conflict("buyer still owns tenders".into()));
        }
        delete_credential_links(&txn, Party::Buyer, id).await?;
        buyer::Entity::delete_by_id(b.id).exec(&txn).await?;
        txn.commit().await?;
        info!("deleted buyer {id}");
        Ok(())
    }

    // suppliers

    pub async fn supplier_exists_by_email(&self, email: &str) -> Result<bool, AppError> {
        Ok(supplier::Entity::find()
            .filter(supplier::Column::Email.eq(email))
            .count(&self.database_connection)
            .await?
            > 0)
    }

    pub async fn create_supplier(&self, payload: DBCompanyCreate) -> Result<supplier::Model, AppError> {
        if self.supplier_exists_by_email(&payload.email).await? {
            return Err(AppError::AlreadyExists);
        }
        self.check_location(payload.domain_id, payload.city_id, payload.sub_domain_id)
            .await?;

        let now = Utc::now();
        let am = supplier::ActiveModel {
            company_name: Set(payload.company_name),
            commercial_record: Set(payload.commercial_record),
            email: Set(payload.email),
            phone: Set(payload.phone),
            password_hash: Set(payload.password_hash),
            session_hash: Set(None),
            domain_id: Set(payload.domain_id),
            sub_domain_id: Set(payload.sub_domain_id),
            city_id: Set(payload.city_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let res = supplier::Entity::insert(am).exec(&self.database_connection).await?;
        info!("registered supplier {}", res.last_insert_id);
        self.get_supplier(res.last_insert_id).await
    }

    pub async fn get_supplier(&self, id: i32) -> Result<supplier::Model, AppError> {
        supplier::Entity::find_by_id(id)
            .one(&self.database_connection)
            .await?
            .ok_or_else(|| AppError::not_found("supplier", id))
    }

    pub async fn get_supplier_by_email(&self, email: &str) -> Result<Option<supplier::Model>, AppError> {
        Ok(supplier::Entity::find()
            .filter(supplier::Column::Email.eq(email))
            .one(&self.database_connection)
            .await?)
    }

    pub async fn list_suppliers(&self) -> Result<Vec<supplier::Model>, AppError> {
        Ok(supplier::Entity::find()
            .order_by_asc(supplier::Column::Id)
            .all(&self.database_connection)
            .await?)
    }

    pub async fn update_supplier(&self, id: i32, patch: RCompanyUpdate) -> Result<supplier::Model, AppError> {
        let current = self.get_supplier(id).await?;
        let domain_id = patch.domain_id.unwrap_or(current.domain_id);
        let city_id = patch.city_id.unwrap_or(current.city_id);
        let sub_domain_id = patch.sub_domain_id.or(current.sub_domain_id);
        if patch.domain_id.is_some() || patch.city_id.is_some() || patch.sub_domain_id.is_some() {
            self.check_location(domain_id, city_id, sub_domain_id).await?;
        }

        let mut am: supplier::ActiveModel = current.into();
        if let Some(v) = patch.company_name {
            am.company_name = Set(v);
        }
        if let Some(v) = patch.commercial_record {
            am.commercial_record = Set(v);
        }
        if let Some(v) = patch.phone {
            am.phone = Set(v);
        }
        if let Some(pw) = patch.password {
            am.password_hash = Set(hash_password(&pw)?);
            am.session_hash = Set(None);
        }
        am.domain_id = Set(domain_id);
        am.sub_domain_id = Set(sub_domain_id);
        am.city_id = Set(city_id);
        am.updated_at = Set(Utc::now());
        Ok(am.update(&self.database_connection).await?)
    }

    /// Proposals and inquiries go with the supplier. Refused once it has won a tender.
    pub async fn delete_supplier(&self, id: i32) -> Result<(), AppError> {
        let txn = self.database_connection.begin().await?;
        let s = supplier::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::not_found("supplier", id))?;
        let won = tender::Entity::find()
            .filter(tender::Column::WinnerId.eq(id))
            .count(&txn)
            .await?;
        if won > 0 {
            txn.rollback().await?;
            return Err(AppError::Conflict("supplier has been awarded tenders".into()));
        }
        delete_credential_links(&txn, Party::Supplier, id).await?;
        supplier::Entity::delete_by_id(s.id).exec(&txn).await?;
        txn.commit().await?;
        info!("deleted supplier {id}");
        Ok(())
    }
}

async fn delete_credential_links<C: sea_orm::ConnectionTrait>(
    conn: &C,
    party: Party,
    company_id: i32,
) -> Result<(), AppError> {
    company_license::Entity::delete_many()
        .filter(company_license::Column::Party.eq(party))
        .filter(company_license::Column::CompanyId.eq(company_id))
        .exec(conn)
        .await?;
    company_certificate::Entity::delete_many()
        .filter(company_certificate::Column::Party.eq(party))
        .filter(company_certificate::Column::CompanyId.eq(company_id))
        .exec(conn)
        .await?;
    Ok(())
}
