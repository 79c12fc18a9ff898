use entity::{certificate, city, domain, license, region, sub_domain};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::db::database_service::DatabaseService;
use crate::types::error::AppError;
use crate::types::reference::RNamed;

impl DatabaseService {
    pub async fn list_domains(&self) -> Result<Vec<domain::Model>, AppError> {
        Ok(domain::Entity::find()
            .order_by_asc(domain::Column::Id)
            .all(&self.database_connection)
            .await?)
    }

    pub async fn get_domain(&self, id: i32) -> Result<domain::Model, AppError> {
        domain::Entity::find_by_id(id)
            .one(&self.database_connection)
            .await?
            .ok_or_else(|| AppError::not_found("domain", id))
    }

    pub async fn list_sub_domains(&self, domain_id: i32) -> Result<Vec<sub_domain::Model>, AppError> {
        self.get_domain(domain_id).await?;
        Ok(sub_domain::Entity::find()
            .filter(sub_domain::Column::DomainId.eq(domain_id))
            .order_by_asc(sub_domain::Column::Id)
            .all(&self.database_connection)
            .await?)
    }

    pub async fn list_regions(&self) -> Result<Vec<region::Model>, AppError> {
        Ok(region::Entity::find()
            .order_by_asc(region::Column::Id)
            .all(&self.database_connection)
            .await?)
    }

    pub async fn get_region(&self, id: i32) -> Result<region::Model, AppError> {
        region::Entity::find_by_id(id)
            .one(&self.database_connection)
            .await?
            .ok_or_else(|| AppError::not_found("region", id))
    }

    pub async fn list_cities(&self, region_id: i32) -> Result<Vec<city::Model>, AppError> {
        self.get_region(region_id).await?;
        Ok(city::Entity::find()
            .filter(city::Column::RegionId.eq(region_id))
            .order_by_asc(city::Column::Id)
            .all(&self.database_connection)
            .await?)
    }

    pub async fn get_city(&self, id: i32) -> Result<city::Model, AppError> {
        city::Entity::find_by_id(id)
            .one(&self.database_connection)
            .await?
            .ok_or_else(|| AppError::not_found("city", id))
    }

    pub async fn list_licenses(&self) -> Result<Vec<license::Model>, AppError> {
        Ok(license::Entity::find()
            .order_by_asc(license::Column::Id)
            .all(&self.database_connection)
            .await?)
    }

    pub async fn list_certificates(&self) -> Result<Vec<certificate::Model>, AppError> {
        Ok(certificate::Entity::find()
            .order_by_asc(certificate::Column::Id)
            .all(&self.database_connection)
            .await?)
    }

    // catalog maintenance, admin only

    pub async fn create_domain(&self, name: RNamed) -> Result<domain::Model, AppError> {
        let am = domain::ActiveModel {
            name_ar: Set(name.name_ar),
            name_en: Set(name.name_en),
            ..Default::default()
        };
        let res = domain::Entity::insert(am).exec(&self.database_connection).await?;
        self.get_domain(res.last_insert_id).await
    }

    pub async fn create_sub_domain(&self, domain_id: i32, name: RNamed) -> Result<sub_domain::Model, AppError> {
        self.get_domain(domain_id).await?;
        let am = sub_domain::ActiveModel {
            domain_id: Set(domain_id),
            name_ar: Set(name.name_ar),
            name_en: Set(name.name_en),
            ..Default::default()
        };
        let res = sub_domain::Entity::insert(am).exec(&self.database_connection).await?;
        sub_domain::Entity::find_by_id(res.last_insert_id)
            .one(&self.database_connection)
            .await?
            .ok_or_else(|| AppError::not_found("sub-domain", res.last_insert_id))
    }

    pub async fn create_region(&self, name: RNamed) -> Result<region::Model, AppError> {
        let am = region::ActiveModel {
            name_ar: Set(name.name_ar),
            name_en: Set(name.name_en),
            ..Default::default()
        };
        let res = region::Entity::insert(am).exec(&self.database_connection).await?;
        self.get_region(res.last_insert_id).await
    }

    pub async fn create_city(&self, region_id: i32, name: RNamed) -> Result<city::Model, AppError> {
        self.get_region(region_id).await?;
        let am = city::ActiveModel {
            region_id: Set(region_id),
            name_ar: Set(name.name_ar),
            name_en: Set(name.name_en),
            ..Default::default()
        };
        let res = city::Entity::insert(am).exec(&self.database_connection).await?;
        self.get_city(res.last_insert_id).await
    }

    pub async fn create_license(&self, name: RNamed) -> Result<license::Model, AppError> {
        let am = license::ActiveModel {
            name_ar: Set(name.name_ar),
            name_en: Set(name.name_en),
            ..Default::default()
        };
        let res = license::Entity::insert(am).exec(&self.database_connection).await?;
        self.get_license(res.last_insert_id).await
    }

    pub async fn get_license(&self, id: i32) -> Result<license::Model, AppError> {
        license::Entity::find_by_id(id)
            .one(&self.database_connection)
            .await?
            .ok_or_else(|| AppError::not_found("license", id))
    }

    pub async fn create_certificate(&self, name: RNamed) -> Result<certificate::Model, AppError> {
        let am = certificate::ActiveModel {
            name_ar: Set(name.name_ar),
            name_en: Set(name.name_en),
            ..Default::default()
        };
        let res = certificate::Entity::insert(am).exec(&self.database_connection).await?;
        self.get_certificate(res.last_insert_id).await
    }

    pub async fn get_certificate(&self, id: i32) -> Result<certificate::Model, AppError> {
        certificate::Entity::find_by_id(id)
            .one(&self.database_connection)
            .await?
            .ok_or_else(|| AppError::not_found("certificate", id))
    }

    /// A city must exist; the returned region id is the city's.
    pub async fn city_region(&self, city_id: i32) -> Result<i32, AppError> {
        Ok(self.get_city(city_id).await?.region_id)
    }

    /// Checks that `sub_domain_id` exists and belongs to `domain_id`.
    pub async fn check_sub_domain(&self, domain_id: i32, sub_domain_id: i32) -> Result<(), AppError> {
        let sd = sub_domain::Entity::find_by_id(sub_domain_id)
            .one(&self.database_connection)
            .await?
            .ok_or_else(|| AppError::not_found("sub-domain", sub_domain_id))?;
        if sd.domain_id != domain_id {
            return Err(AppError::Validation(format!(
                "sub-domain {sub_domain_id} does not belong to domain {domain_id}"
            )));
        }
        Ok(())
    }
}
