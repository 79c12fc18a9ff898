use sea_orm_migration::prelude::*;

use crate::m20250301_000001_create_reference_tables::{Certificate, City, Domain, License, SubDomain};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
pub(crate) enum Buyer {
    Table,
    Id,
    CompanyName,
    CommercialRecord,
    Email,
    Phone,
    PasswordHash,
    SessionHash,
    DomainId,
    CityId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Supplier {
    Table,
    Id,
    CompanyName,
    CommercialRecord,
    Email,
    Phone,
    PasswordHash,
    SessionHash,
    DomainId,
    SubDomainId,
    CityId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum CompanyLicense {
    Table,
    Id,
    Party,
    CompanyId,
    LicenseId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum CompanyCertificate {
    Table,
    Id,
    Party,
    CompanyId,
    CertificateId,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.create_table(
            Table::create()
                .table(Buyer::Table)
                .if_not_exists()
                .col(ColumnDef::new(Buyer::Id).integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(Buyer::CompanyName).string().not_null())
                .col(ColumnDef::new(Buyer::CommercialRecord).string().not_null())
                .col(ColumnDef::new(Buyer::Email).string().not_null().unique_key())
                .col(ColumnDef::new(Buyer::Phone).string().not_null())
                .col(ColumnDef::new(Buyer::PasswordHash).string().not_null())
                .col(ColumnDef::new(Buyer::SessionHash).string().null())
                .col(ColumnDef::new(Buyer::DomainId).integer().not_null())
                .col(ColumnDef::new(Buyer::CityId).integer().not_null())
                .col(ColumnDef::new(Buyer::CreatedAt).timestamp_with_time_zone().not_null())
                .col(ColumnDef::new(Buyer::UpdatedAt).timestamp_with_time_zone().not_null())
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_buyer_domain")
                        .from(Buyer::Table, Buyer::DomainId)
                        .to(Domain::Table, Domain::Id)
                        .on_delete(ForeignKeyAction::Restrict)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_buyer_city")
                        .from(Buyer::Table, Buyer::CityId)
                        .to(City::Table, City::Id)
                        .on_delete(ForeignKeyAction::Restrict)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        ).await?;

        m.create_table(
            Table::create()
                .table(Supplier::Table)
                .if_not_exists()
                .col(ColumnDef::new(Supplier::Id).integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(Supplier::CompanyName).string().not_null())
                .col(ColumnDef::new(Supplier::CommercialRecord).string().not_null())
                .col(ColumnDef::new(Supplier::Email).string().not_null().unique_key())
                .col(ColumnDef::new(Supplier::Phone).string().not_null())
                .col(ColumnDef::new(Supplier::PasswordHash).string().not_null())
                .col(ColumnDef::new(Supplier::SessionHash).string().null())
                .col(ColumnDef::new(Supplier::DomainId).integer().not_null())
                .col(ColumnDef::new(Supplier::SubDomainId).integer().null())
                .col(ColumnDef::new(Supplier::CityId).integer().not_null())
                .col(ColumnDef::new(Supplier::CreatedAt).timestamp_with_time_zone().not_null())
                .col(ColumnDef::new(Supplier::UpdatedAt).timestamp_with_time_zone().not_null())
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_supplier_domain")
                        .from(Supplier::Table, Supplier::DomainId)
                        .to(Domain::Table, Domain::Id)
                        .on_delete(ForeignKeyAction::Restrict)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_supplier_sub_domain")
                        .from(Supplier::Table, Supplier::SubDomainId)
                        .to(SubDomain::Table, SubDomain::Id)
                        .on_delete(ForeignKeyAction::SetNull)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_supplier_city")
                        .from(Supplier::Table, Supplier::CityId)
                        .to(City::Table, City::Id)
                        .on_delete(ForeignKeyAction::Restrict)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        ).await?;

        // company_id is polymorphic over buyer/supplier, only the catalog side gets an FK
        m.create_table(
            Table::create()
                .table(CompanyLicense::Table)
                .if_not_exists()
                .col(ColumnDef::new(CompanyLicense::Id).integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(CompanyLicense::Party).string().not_null())
                .col(ColumnDef::new(CompanyLicense::CompanyId).integer().not_null())
                .col(ColumnDef::new(CompanyLicense::LicenseId).integer().not_null())
                .col(ColumnDef::new(CompanyLicense::CreatedAt).timestamp_with_time_zone().not_null())
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_company_license_license")
                        .from(CompanyLicense::Table, CompanyLicense::LicenseId)
                        .to(License::Table, License::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        ).await?;

        m.create_index(
            Index::create()
                .name("uk_company_license")
                .table(CompanyLicense::Table)
                .col(CompanyLicense::Party)
                .col(CompanyLicense::CompanyId)
                .col(CompanyLicense::LicenseId)
                .unique()
                .to_owned(),
        ).await?;

        m.create_table(
            Table::create()
                .table(CompanyCertificate::Table)
                .if_not_exists()
                .col(ColumnDef::new(CompanyCertificate::Id).integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(CompanyCertificate::Party).string().not_null())
                .col(ColumnDef::new(CompanyCertificate::CompanyId).integer().not_null())
                .col(ColumnDef::new(CompanyCertificate::CertificateId).integer().not_null())
                .col(ColumnDef::new(CompanyCertificate::CreatedAt).timestamp_with_time_zone().not_null())
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_company_certificate_certificate")
                        .from(CompanyCertificate::Table, CompanyCertificate::CertificateId)
                        .to(Certificate::Table, Certificate::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        ).await?;

        m.create_index(
            Index::create()
                .name("uk_company_certificate")
                .table(CompanyCertificate::Table)
                .col(CompanyCertificate::Party)
                .col(CompanyCertificate::CompanyId)
                .col(CompanyCertificate::CertificateId)
                .unique()
                .to_owned(),
        ).await?;

        Ok(())
    }

    async fn down(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.drop_table(Table::drop().table(CompanyCertificate::Table).if_exists().to_owned()).await?;
        m.drop_table(Table::drop().table(CompanyLicense::Table).if_exists().to_owned()).await?;
        m.drop_table(Table::drop().table(Supplier::Table).if_exists().to_owned()).await?;
        m.drop_table(Table::drop().table(Buyer::Table).if_exists().to_owned()).await?;
        Ok(())
    }
}
