use chrono::Utc;
use entity::company_license::Party;
use entity::{certificate, company_certificate, company_license, license};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set};

use crate::db::database_service::DatabaseService;
use crate::types::error::AppError;

impl DatabaseService {
    /// The company must exist on its side of the marketplace.
    pub async fn check_company(&self, party: Party, company_id: i32) -> Result<(), AppError> {
        match party {
            Party::Buyer => self.get_buyer(company_id).await.map(|_| ()),
            Party::Supplier => self.get_supplier(company_id).await.map(|_| ()),
        }
    }

    pub async fn list_company_licenses(&self, party: Party, company_id: i32) -> Result<Vec<license::Model>, AppError> {
        self.check_company(party, company_id).await?;
        let ids: Vec<i32> = company_license::Entity::find()
            .filter(company_license::Column::Party.eq(party))
            .filter(company_license::Column::CompanyId.eq(company_id))
            .all(&self.database_connection)
            .await?
            .into_iter()
            .map(|l| l.license_id)
            .collect();
        Ok(license::Entity::find()
            .filter(license::Column::Id.is_in(ids))
            .order_by_asc(license::Column::Id)
            .all(&self.database_connection)
            .await?)
    }

    pub async fn attach_license(&self, party: Party, company_id: i32, license_id: i32) -> Result<license::Model, AppError> {
        self.check_company(party, company_id).await?;
        let lic = self.get_license(license_id).await?;
        let linked = company_license::Entity::find()
            .filter(company_license::Column::Party.eq(party))
            .filter(company_license::Column::CompanyId.eq(company_id))
            .filter(company_license::Column::LicenseId.eq(license_id))
            .count(&self.database_connection)
            .await?;
        if linked > 0 {
            return Err(AppError::AlreadyExists);
        }
        company_license::Entity::insert(company_license::ActiveModel {
            party: Set(party),
            company_id: Set(company_id),
            license_id: Set(license_id),
            created_at: Set(Utc::now()),
            ..Default::default()
        })
        .exec(&self.database_connection)
        .await?;
        Ok(lic)
    }

    pub async fn detach_license(&self, party: Party, company_id: i32, license_id: i32) -> Result<(), AppError> {
        let res = company_license::Entity::delete_many()
            .filter(company_license::Column::Party.eq(party))
            .filter(company_license::Column::CompanyId.eq(company_id))
            .filter(company_license::Column::LicenseId.eq(license_id))
            .exec(&self.database_connection)
            .await?;
        if res.rows_affected == 0 {
            return Err(AppError::NotFound(format!(
                "license {license_id} is not linked to this company"
            )));
        }
        Ok(())
    }

    pub async fn list_company_certificates(&self, party: Party, company_id: i32) -> Result<Vec<certificate::Model>, AppError> {
        self.check_company(party, company_id).await?;
        let ids: Vec<i32> = company_certificate::Entity::find()
            .filter(company_certificate::Column::Party.eq(party))
            .filter(company_certificate::Column::CompanyId.eq(company_id))
            .all(&self.database_connection)
            .await?
            .into_iter()
            .map(|c| c.certificate_id)
            .collect();
        Ok(certificate::Entity::find()
            .filter(certificate::Column::Id.is_in(ids))
            .order_by_asc(certificate::Column::Id)
            .all(&self.database_connection)
            .await?)
    }

    pub async fn attach_certificate(&self, party: Party, company_id: i32, certificate_id: i32) -> Result<certificate::Model, AppError> {
        self.check_company(party, company_id).await?;
        let cert = self.get_certificate(certificate_id).await?;
        let linked = company_certificate::Entity::find()
            .filter(company_certificate::Column::Party.eq(party))
            .filter(company_certificate::Column::CompanyId.eq(company_id))
            .filter(company_certificate::Column::CertificateId.eq(certificate_id))
            .count(&self.database_connection)
            .await?;
        if linked > 0 {
            return Err(AppError::AlreadyExists);
        }
        company_certificate::Entity::insert(company_certificate::ActiveModel {
            party: Set(party),
            company_id: Set(company_id),
            certificate_id: Set(certificate_id),
            created_at: Set(Utc::now()),
            ..Default::default()
        })
        .exec(&self.database_connection)
        .await?;
        Ok(cert)
    }

    pub async fn detach_certificate(&self, party: Party, company_id: i32, certificate_id: i32) -> Result<(), AppError> {
        let res = company_certificate::Entity::delete_many()
            .filter(company_certificate::Column::Party.eq(party))
            .filter(company_certificate::Column::CompanyId.eq(company_id))
            .filter(company_certificate::Column::CertificateId.eq(certificate_id))
            .exec(&self.database_connection)
            .await?;
        if res.rows_affected == 0 {
            return Err(AppError::NotFound(format!(
                "certificate {certificate_id} is not linked to this company"
            )));
        }
        Ok(())
    }
}
