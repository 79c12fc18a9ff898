use sea_orm_migration::prelude::*;

use crate::m20250301_000001_create_reference_tables::{City, Domain, SubDomain};
use crate::m20250301_000002_create_company_tables::{Buyer, Supplier};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Tender {
    Table,
    Id,
    BuyerId,
    DomainId,
    CityId,
    Title,
    Description,
    SubmitDeadline,
    QuiresDeadline,
    ExpectedBudget,
    StatusId,
    WinnerId,
    ReferenceNumber,
    FinishedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum TenderSubDomain {
    Table,
    TenderId,
    SubDomainId,
}

#[derive(DeriveIden)]
enum Proposal {
    Table,
    Id,
    TenderId,
    SupplierId,
    Price,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ProposalFile {
    Table,
    Id,
    ProposalId,
    Kind,
    FileName,
    ContentType,
    Size,
    Data,
}

#[derive(DeriveIden)]
enum Inquiry {
    Table,
    Id,
    TenderId,
    SupplierId,
    Question,
    Answer,
    AnsweredAt,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.create_table(
            Table::create()
                .table(Tender::Table)
                .if_not_exists()
                .col(ColumnDef::new(Tender::Id).integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(Tender::BuyerId).integer().not_null())
                .col(ColumnDef::new(Tender::DomainId).integer().not_null())
                .col(ColumnDef::new(Tender::CityId).integer().not_null())
                .col(ColumnDef::new(Tender::Title).string().not_null())
                .col(ColumnDef::new(Tender::Description).text().not_null())
                .col(ColumnDef::new(Tender::SubmitDeadline).timestamp_with_time_zone().not_null())
                .col(ColumnDef::new(Tender::QuiresDeadline).timestamp_with_time_zone().not_null())
                .col(ColumnDef::new(Tender::ExpectedBudget).double().null())
                // 1 = OPEN, 2 = AWARDING, 3 = FINISHED
                .col(ColumnDef::new(Tender::StatusId).integer().not_null().default(1))
                .col(ColumnDef::new(Tender::WinnerId).integer().null())
                .col(ColumnDef::new(Tender::ReferenceNumber).string().not_null().unique_key())
                .col(ColumnDef::new(Tender::FinishedAt).timestamp_with_time_zone().null())
                .col(ColumnDef::new(Tender::CreatedAt).timestamp_with_time_zone().not_null())
                .col(ColumnDef::new(Tender::UpdatedAt).timestamp_with_time_zone().not_null())
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_tender_buyer")
                        .from(Tender::Table, Tender::BuyerId)
                        .to(Buyer::Table, Buyer::Id)
                        .on_delete(ForeignKeyAction::Restrict)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_tender_domain")
                        .from(Tender::Table, Tender::DomainId)
                        .to(Domain::Table, Domain::Id)
                        .on_delete(ForeignKeyAction::Restrict)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_tender_city")
                        .from(Tender::Table, Tender::CityId)
                        .to(City::Table, City::Id)
                        .on_delete(ForeignKeyAction::Restrict)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_tender_winner")
                        .from(Tender::Table, Tender::WinnerId)
                        .to(Supplier::Table, Supplier::Id)
                        .on_delete(ForeignKeyAction::Restrict)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        ).await?;

        // the expiry sweep scans by (status_id, submit_deadline)
        m.create_index(
            Index::create()
                .name("idx_tender_status_deadline")
                .table(Tender::Table)
                .col(Tender::StatusId)
                .col(Tender::SubmitDeadline)
                .to_owned(),
        ).await?;

        m.create_index(
            Index::create()
                .name("idx_tender_buyer")
                .table(Tender::Table)
                .col(Tender::BuyerId)
                .to_owned(),
        ).await?;

        m.create_table(
            Table::create()
                .table(TenderSubDomain::Table)
                .if_not_exists()
                .col(ColumnDef::new(TenderSubDomain::TenderId).integer().not_null())
                .col(ColumnDef::new(TenderSubDomain::SubDomainId).integer().not_null())
                .primary_key(
                    Index::create()
                        .name("pk_tender_sub_domain")
                        .col(TenderSubDomain::TenderId)
                        .col(TenderSubDomain::SubDomainId),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_tender_sub_domain_tender")
                        .from(TenderSubDomain::Table, TenderSubDomain::TenderId)
                        .to(Tender::Table, Tender::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_tender_sub_domain_sub_domain")
                        .from(TenderSubDomain::Table, TenderSubDomain::SubDomainId)
                        .to(SubDomain::Table, SubDomain::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        ).await?;

        m.create_table(
            Table::create()
                .table(Proposal::Table)
                .if_not_exists()
                .col(ColumnDef::new(Proposal::Id).integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(Proposal::TenderId).integer().not_null())
                .col(ColumnDef::new(Proposal::SupplierId).integer().not_null())
                .col(ColumnDef::new(Proposal::Price).double().not_null())
                .col(ColumnDef::new(Proposal::CreatedAt).timestamp_with_time_zone().not_null())
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_proposal_tender")
                        .from(Proposal::Table, Proposal::TenderId)
                        .to(Tender::Table, Tender::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_proposal_supplier")
                        .from(Proposal::Table, Proposal::SupplierId)
                        .to(Supplier::Table, Supplier::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        ).await?;

        m.create_index(
            Index::create()
                .name("idx_proposal_tender")
                .table(Proposal::Table)
                .col(Proposal::TenderId)
                .to_owned(),
        ).await?;

        m.create_table(
            Table::create()
                .table(ProposalFile::Table)
                .if_not_exists()
                .col(ColumnDef::new(ProposalFile::Id).integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(ProposalFile::ProposalId).integer().not_null())
                .col(ColumnDef::new(ProposalFile::Kind).string().not_null())
                .col(ColumnDef::new(ProposalFile::FileName).string().not_null())
                .col(ColumnDef::new(ProposalFile::ContentType).string().not_null())
                .col(ColumnDef::new(ProposalFile::Size).big_integer().not_null())
                .col(ColumnDef::new(ProposalFile::Data).blob().not_null())
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_proposal_file_proposal")
                        .from(ProposalFile::Table, ProposalFile::ProposalId)
                        .to(Proposal::Table, Proposal::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        ).await?;

        m.create_index(
            Index::create()
                .name("uk_proposal_file_kind")
                .table(ProposalFile::Table)
                .col(ProposalFile::ProposalId)
                .col(ProposalFile::Kind)
                .unique()
                .to_owned(),
        ).await?;

        m.create_table(
            Table::create()
                .table(Inquiry::Table)
                .if_not_exists()
                .col(ColumnDef::new(Inquiry::Id).integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(Inquiry::TenderId).integer().not_null())
                .col(ColumnDef::new(Inquiry::SupplierId).integer().not_null())
                .col(ColumnDef::new(Inquiry::Question).text().not_null())
                .col(ColumnDef::new(Inquiry::Answer).text().null())
                .col(ColumnDef::new(Inquiry::AnsweredAt).timestamp_with_time_zone().null())
                .col(ColumnDef::new(Inquiry::CreatedAt).timestamp_with_time_zone().not_null())
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_inquiry_tender")
                        .from(Inquiry::Table, Inquiry::TenderId)
                        .to(Tender::Table, Tender::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_inquiry_supplier")
                        .from(Inquiry::Table, Inquiry::SupplierId)
                        .to(Supplier::Table, Supplier::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        ).await?;

        m.create_index(
            Index::create()
                .name("idx_inquiry_tender")
                .table(Inquiry::Table)
                .col(Inquiry::TenderId)
                .to_owned(),
        ).await?;

        Ok(())
    }

    async fn down(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.drop_table(Table::drop().table(Inquiry::Table).if_exists().to_owned()).await?;
        m.drop_table(Table::drop().table(ProposalFile::Table).if_exists().to_owned()).await?;
        m.drop_table(Table::drop().table(Proposal::Table).if_exists().to_owned()).await?;
        m.drop_table(Table::drop().table(TenderSubDomain::Table).if_exists().to_owned()).await?;
        m.drop_table(Table::drop().table(Tender::Table).if_exists().to_owned()).await?;
        Ok(())
    }
}
