use chrono::{DateTime, Utc};
use entity::inquiry;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait};
use tracing::info;

use crate::db::database_service::DatabaseService;
use crate::db::tenders::lock_tender;
use crate::types::error::AppError;
use crate::types::inquiry::PublicInquiryView;

impl DatabaseService {
    /// Questions are taken while the tender is open and before its inquiry deadline.
    pub async fn ask_inquiry(
        &self,
        tender_id: i32,
        supplier_id: i32,
        question: &str,
        now: DateTime<Utc>,
    ) -> Result<inquiry::Model, AppError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(AppError::Validation("question is required".into()));
        }
        self.get_supplier(supplier_id).await?;

        let txn = self.database_connection.begin().await?;
        let t = lock_tender(&txn, tender_id).await?;
        if !t.status_id.is_open() || t.quires_deadline <= now {
            txn.rollback().await?;
            return Err(AppError::Conflict(format!(
                "tender {tender_id} is closed for inquiries"
            )));
        }

        let res = inquiry::Entity::insert(inquiry::ActiveModel {
            tender_id: Set(tender_id),
            supplier_id: Set(supplier_id),
            question: Set(question.to_string()),
            answer: Set(None),
            answered_at: Set(None),
            created_at: Set(now),
            ..Default::default()
        })
        .exec(&txn)
        .await?;
        txn.commit().await?;
        info!("supplier {supplier_id} asked inquiry {} on tender {tender_id}", res.last_insert_id);
        self.get_inquiry(res.last_insert_id).await
    }

    pub async fn get_inquiry(&self, id: i32) -> Result<inquiry::Model, AppError> {
        inquiry::Entity::find_by_id(id)
            .one(&self.database_connection)
            .await?
            .ok_or_else(|| AppError::not_found("inquiry", id))
    }

    /// An inquiry is answered once, by the buyer who owns the tender.
    pub async fn answer_inquiry(
        &self,
        id: i32,
        buyer_id: i32,
        answer: &str,
        now: DateTime<Utc>,
    ) -> Result<inquiry::Model, AppError> {
        let answer = answer.trim();
        if answer.is_empty() {
            return Err(AppError::Validation("answer is required".into()));
        }
        let q = self.get_inquiry(id).await?;
        self.get_owned_tender(q.tender_id, buyer_id).await?;

        let res = inquiry::Entity::update_many()
            .col_expr(inquiry::Column::Answer, Expr::value(answer))
            .col_expr(inquiry::Column::AnsweredAt, Expr::value(now))
            .filter(inquiry::Column::Id.eq(id))
            .filter(inquiry::Column::Answer.is_null())
            .exec(&self.database_connection)
            .await?;
        if res.rows_affected == 0 {
            return Err(AppError::Conflict(format!("inquiry {id} is already answered")));
        }
        self.get_inquiry(id).await
    }

    /// Answered inquiries of a tender, without who asked them.
    pub async fn list_public_inquiries(&self, tender_id: i32) -> Result<Vec<PublicInquiryView>, AppError> {
        self.get_tender(tender_id).await?;
        Ok(inquiry::Entity::find()
            .filter(inquiry::Column::TenderId.eq(tender_id))
            .filter(inquiry::Column::Answer.is_not_null())
            .order_by_asc(inquiry::Column::Id)
            .all(&self.database_connection)
            .await?
            .into_iter()
            .map(PublicInquiryView::from)
            .collect())
    }

    pub async fn list_tender_inquiries(&self, tender_id: i32, buyer_id: i32) -> Result<Vec<inquiry::Model>, AppError> {
        self.get_owned_tender(tender_id, buyer_id).await?;
        Ok(inquiry::Entity::find()
            .filter(inquiry::Column::TenderId.eq(tender_id))
            .order_by_asc(inquiry::Column::Id)
            .all(&self.database_connection)
            .await?)
    }

    pub async fn list_supplier_inquiries(&self, supplier_id: i32) -> Result<Vec<inquiry::Model>, AppError> {
        self.get_supplier(supplier_id).await?;
        Ok(inquiry::Entity::find()
            .filter(inquiry::Column::SupplierId.eq(supplier_id))
            .order_by_desc(inquiry::Column::CreatedAt)
            .order_by_desc(inquiry::Column::Id)
            .all(&self.database_connection)
            .await?)
    }
}
