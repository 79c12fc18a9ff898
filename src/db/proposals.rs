use std::collections::HashMap;

use chrono::{DateTime, Utc};
use entity::proposal_file::FileKind;
use entity::{proposal, proposal_file};
use sea_orm::{
    ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};
use tracing::info;

use crate::db::database_service::DatabaseService;
use crate::db::tenders::lock_tender;
use crate::types::error::AppError;
use crate::types::proposal::{FileView, NewProposal, ProposalView};

impl DatabaseService {
    /// Stores a proposal and its attachments in one transaction.
    ///
    /// The tender row is locked while the proposal goes in, so a sweep or an
    /// award cannot close it between the check and the insert.
    pub async fn submit_proposal(&self, sub: NewProposal, now: DateTime<Utc>) -> Result<ProposalView, AppError> {
        self.get_supplier(sub.supplier_id).await?;

        let txn = self.database_connection.begin().await?;
        let t = lock_tender(&txn, sub.tender_id).await?;
        if !t.status_id.is_open() || t.submit_deadline <= now {
            txn.rollback().await?;
            return Err(AppError::Conflict(format!(
                "tender {} is closed for submissions",
                t.id
            )));
        }

        let res = proposal::Entity::insert(proposal::ActiveModel {
            tender_id: Set(sub.tender_id),
            supplier_id: Set(sub.supplier_id),
            price: Set(sub.price),
            created_at: Set(now),
            ..Default::default()
        })
        .exec(&txn)
        .await?;
        let proposal_id = res.last_insert_id;

        for file in sub.files {
            proposal_file::Entity::insert(proposal_file::ActiveModel {
                proposal_id: Set(proposal_id),
                kind: Set(file.kind),
                file_name: Set(file.file_name),
                content_type: Set(file.content_type),
                size: Set(file.data.len() as i64),
                data: Set(file.data),
                ..Default::default()
            })
            .exec(&txn)
            .await?;
        }
        txn.commit().await?;

        info!(
            "supplier {} submitted proposal {proposal_id} on tender {}",
            sub.supplier_id, sub.tender_id
        );
        let p = self.get_proposal(proposal_id).await?;
        let mut files = self.file_views(vec![proposal_id]).await?;
        Ok(ProposalView::new(p, files.remove(&proposal_id).unwrap_or_default()))
    }

    pub async fn get_proposal(&self, id: i32) -> Result<proposal::Model, AppError> {
        proposal::Entity::find_by_id(id)
            .one(&self.database_connection)
            .await?
            .ok_or_else(|| AppError::not_found("proposal", id))
    }

    /// Attachment metadata grouped by proposal. Blobs are not read.
    async fn file_views(&self, proposal_ids: Vec<i32>) -> Result<HashMap<i32, Vec<FileView>>, AppError> {
        let mut out: HashMap<i32, Vec<FileView>> = HashMap::new();
        if proposal_ids.is_empty() {
            return Ok(out);
        }
        let rows = proposal_file::Entity::find()
            .select_only()
            .columns([
                proposal_file::Column::Id,
                proposal_file::Column::ProposalId,
                proposal_file::Column::Kind,
                proposal_file::Column::FileName,
                proposal_file::Column::ContentType,
                proposal_file::Column::Size,
            ])
            .filter(proposal_file::Column::ProposalId.is_in(proposal_ids))
            .order_by_asc(proposal_file::Column::Id)
            .into_model::<FileView>()
            .all(&self.database_connection)
            .await?;
        for f in rows {
            out.entry(f.proposal_id).or_default().push(f);
        }
        Ok(out)
    }

    async fn with_files(&self, proposals: Vec<proposal::Model>) -> Result<Vec<ProposalView>, AppError> {
        let mut files = self
            .file_views(proposals.iter().map(|p| p.id).collect())
            .await?;
        Ok(proposals
            .into_iter()
            .map(|p| {
                let f = files.remove(&p.id).unwrap_or_default();
                ProposalView::new(p, f)
            })
            .collect())
    }

    pub async fn list_tender_proposals(&self, tender_id: i32, buyer_id: i32) -> Result<Vec<ProposalView>, AppError> {
        self.get_owned_tender(tender_id, buyer_id).await?;
        let rows = proposal::Entity::find()
            .filter(proposal::Column::TenderId.eq(tender_id))
            .order_by_asc(proposal::Column::Id)
            .all(&self.database_connection)
            .await?;
        self.with_files(rows).await
    }

    pub async fn list_supplier_proposals(&self, supplier_id: i32) -> Result<Vec<ProposalView>, AppError> {
        self.get_supplier(supplier_id).await?;
        let rows = proposal::Entity::find()
            .filter(proposal::Column::SupplierId.eq(supplier_id))
            .order_by_desc(proposal::Column::CreatedAt)
            .order_by_desc(proposal::Column::Id)
            .all(&self.database_connection)
            .await?;
        self.with_files(rows).await
    }

    pub async fn get_proposal_file(&self, proposal_id: i32, kind: FileKind) -> Result<proposal_file::Model, AppError> {
        proposal_file::Entity::find()
            .filter(proposal_file::Column::ProposalId.eq(proposal_id))
            .filter(proposal_file::Column::Kind.eq(kind))
            .one(&self.database_connection)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "proposal {proposal_id} has no {} file",
                    kind.as_str()
                ))
            })
    }

    pub async fn supplier_has_proposal(&self, tender_id: i32, supplier_id: i32) -> Result<bool, AppError> {
        Ok(proposal::Entity::find()
            .filter(proposal::Column::TenderId.eq(tender_id))
            .filter(proposal::Column::SupplierId.eq(supplier_id))
            .count(&self.database_connection)
            .await?
            > 0)
    }
}
