//! Tender status transitions.
//!
//! Every transition is one conditional `UPDATE ... WHERE status_id = <from>`;
//! the affected-row count decides whether it happened. Nothing reads the
//! status first and writes later, so racing callers cannot both win.

use chrono::{DateTime, Utc};
use entity::tender::TenderStatus;
use entity::{supplier, tender};
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QuerySelect, TransactionTrait, UpdateMany};
use tracing::{info, warn};

use crate::db::database_service::DatabaseService;
use crate::types::error::AppError;
use crate::types::tender::ExpireRes;

/// Update moving tenders out of `from` into the state after it.
fn advance(from: TenderStatus, now: DateTime<Utc>) -> Result<UpdateMany<tender::Entity>, AppError> {
    let to = from
        .next()
        .ok_or_else(|| AppError::Conflict(format!("{from:?} tenders cannot change state")))?;
    Ok(tender::Entity::update_many()
        .col_expr(tender::Column::StatusId, Expr::value(to.id()))
        .col_expr(tender::Column::UpdatedAt, Expr::value(now))
        .filter(tender::Column::StatusId.eq(from)))
}

impl DatabaseService {
    /// Moves every open tender whose submission deadline has passed to awarding.
    ///
    /// The due rows stay locked until commit, so a concurrent withdraw or
    /// sweep cannot change them between the select and the update.
    pub async fn expire_tenders(&self, now: DateTime<Utc>) -> Result<ExpireRes, AppError> {
        let txn = self.database_connection.begin().await?;
        let due: Vec<i32> = tender::Entity::find()
            .select_only()
            .column(tender::Column::Id)
            .filter(tender::Column::StatusId.eq(TenderStatus::Open))
            .filter(tender::Column::SubmitDeadline.lte(now))
            .lock_exclusive()
            .into_tuple()
            .all(&txn)
            .await?;

        if due.is_empty() {
            txn.commit().await?;
            return Ok(ExpireRes { updated: 0, tender_ids: Vec::new() });
        }

        let res = advance(TenderStatus::Open, now)?
            .filter(tender::Column::Id.is_in(due.clone()))
            .exec(&txn)
            .await?;
        if res.rows_affected != due.len() as u64 {
            txn.rollback().await?;
            warn!("expiry raced: {} of {} due tenders changed", res.rows_affected, due.len());
            return Err(AppError::Conflict("tenders changed during expiry, retry".into()));
        }
        txn.commit().await?;

        info!("expired {} tender(s): {:?}", res.rows_affected, due);
        Ok(ExpireRes {
            updated: due.len(),
            tender_ids: due,
        })
    }

    async fn close_awarding(
        &self,
        id: i32,
        winner_id: Option<i32>,
        now: DateTime<Utc>,
    ) -> Result<tender::Model, AppError> {
        let mut update = advance(TenderStatus::Awarding, now)?
            .col_expr(tender::Column::FinishedAt, Expr::value(now));
        if let Some(w) = winner_id {
            update = update.col_expr(tender::Column::WinnerId, Expr::value(w));
        }
        let res = update
            .filter(tender::Column::Id.eq(id))
            .exec(&self.database_connection)
            .await?;

        if res.rows_affected == 0 {
            // tell a missing tender apart from one in the wrong state
            let t = self.get_tender(id).await?;
            warn!("tender {id} is {:?}, transition refused", t.status_id);
            if t.status_id.is_terminal() {
                return Err(AppError::Conflict(format!("tender {id} is already finished")));
            }
            return Err(AppError::Conflict(format!(
                "tender {id} not found or not in awarding state"
            )));
        }
        self.get_tender(id).await
    }

    /// Closes an awarding tender without a winner.
    pub async fn finish_tender(&self, id: i32, buyer_id: i32, now: DateTime<Utc>) -> Result<tender::Model, AppError> {
        self.get_owned_tender(id, buyer_id).await?;
        let t = self.close_awarding(id, None, now).await?;
        info!("tender {id} finished without award");
        Ok(t)
    }

    /// Closes an awarding tender in favour of `supplier_id`, who must have bid on it.
    pub async fn award_tender(
        &self,
        id: i32,
        buyer_id: i32,
        supplier_id: i32,
        now: DateTime<Utc>,
    ) -> Result<tender::Model, AppError> {
        self.get_owned_tender(id, buyer_id).await?;
        self.get_supplier(supplier_id).await?;
        if !self.supplier_has_proposal(id, supplier_id).await? {
            return Err(AppError::BadRequest(format!(
                "supplier {supplier_id} has no proposal on tender {id}"
            )));
        }
        let t = self.close_awarding(id, Some(supplier_id), now).await?;
        info!("tender {id} awarded to supplier {supplier_id}");
        Ok(t)
    }

    pub async fn awarded_supplier(&self, id: i32) -> Result<supplier::Model, AppError> {
        let t = self.get_tender(id).await?;
        let winner = t
            .winner_id
            .ok_or_else(|| AppError::NotFound(format!("tender {id} has no awarded supplier")))?;
        self.get_supplier(winner).await
    }
}
