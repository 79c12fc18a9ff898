use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
pub(crate) enum Domain {
    Table,
    Id,
    NameAr,
    NameEn,
}

#[derive(DeriveIden)]
pub(crate) enum SubDomain {
    Table,
    Id,
    DomainId,
    NameAr,
    NameEn,
}

#[derive(DeriveIden)]
pub(crate) enum Region {
    Table,
    Id,
    NameAr,
    NameEn,
}

#[derive(DeriveIden)]
pub(crate) enum City {
    Table,
    Id,
    RegionId,
    NameAr,
    NameEn,
}

#[derive(DeriveIden)]
pub(crate) enum License {
    Table,
    Id,
    NameAr,
    NameEn,
}

#[derive(DeriveIden)]
pub(crate) enum Certificate {
    Table,
    Id,
    NameAr,
    NameEn,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.create_table(
            Table::create()
                .table(Domain::Table)
                .if_not_exists()
                .col(ColumnDef::new(Domain::Id).integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(Domain::NameAr).string().not_null())
                .col(ColumnDef::new(Domain::NameEn).string().not_null())
                .to_owned(),
        ).await?;

        m.create_table(
            Table::create()
                .table(SubDomain::Table)
                .if_not_exists()
                .col(ColumnDef::new(SubDomain::Id).integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(SubDomain::DomainId).integer().not_null())
                .col(ColumnDef::new(SubDomain::NameAr).string().not_null())
                .col(ColumnDef::new(SubDomain::NameEn).string().not_null())
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_sub_domain_domain")
                        .from(SubDomain::Table, SubDomain::DomainId)
                        .to(Domain::Table, Domain::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        ).await?;

        m.create_index(
            Index::create()
                .name("idx_sub_domain_domain")
                .table(SubDomain::Table)
                .col(SubDomain::DomainId)
                .to_owned(),
        ).await?;

        m.create_table(
            Table::create()
                .table(Region::Table)
                .if_not_exists()
                .col(ColumnDef::new(Region::Id).integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(Region::NameAr).string().not_null())
                .col(ColumnDef::new(Region::NameEn).string().not_null())
                .to_owned(),
        ).await?;

        m.create_table(
            Table::create()
                .table(City::Table)
                .if_not_exists()
                .col(ColumnDef::new(City::Id).integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(City::RegionId).integer().not_null())
                .col(ColumnDef::new(City::NameAr).string().not_null())
                .col(ColumnDef::new(City::NameEn).string().not_null())
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_city_region")
                        .from(City::Table, City::RegionId)
                        .to(Region::Table, Region::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        ).await?;

        m.create_index(
            Index::create()
                .name("idx_city_region")
                .table(City::Table)
                .col(City::RegionId)
                .to_owned(),
        ).await?;

        m.create_table(
            Table::create()
                .table(License::Table)
                .if_not_exists()
                .col(ColumnDef::new(License::Id).integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(License::NameAr).string().not_null())
                .col(ColumnDef::new(License::NameEn).string().not_null())
                .to_owned(),
        ).await?;

        m.create_table(
            Table::create()
                .table(Certificate::Table)
                .if_not_exists()
                .col(ColumnDef::new(Certificate::Id).integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(Certificate::NameAr).string().not_null())
                .col(ColumnDef::new(Certificate::NameEn).string().not_null())
                .to_owned(),
        ).await?;

        Ok(())
    }

    async fn down(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.drop_table(Table::drop().table(Certificate::Table).if_exists().to_owned()).await?;
        m.drop_table(Table::drop().table(License::Table).if_exists().to_owned()).await?;
        m.drop_table(Table::drop().table(City::Table).if_exists().to_owned()).await?;
        m.drop_table(Table::drop().table(Region::Table).if_exists().to_owned()).await?;
        m.drop_table(Table::drop().table(SubDomain::Table).if_exists().to_owned()).await?;
        m.drop_table(Table::drop().table(Domain::Table).if_exists().to_owned()).await?;
        Ok(())
    }
}
