use std::collections::HashMap;

use chrono::{DateTime, Datelike, Utc};
use entity::tender::TenderStatus;
use entity::{city, proposal, tender, tender_sub_domain};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Select, Set, TransactionTrait,
};
use tracing::info;

use crate::db::database_service::DatabaseService;
use crate::types::error::AppError;
use crate::types::tender::{validate_schedule, RTenderCreate, RTenderUpdate, TenderListing};
use crate::utils::filter::TenderFilter;
use crate::utils::token::new_reference_number;

async fn replace_sub_domains<C: ConnectionTrait>(
    conn: &C,
    tender_id: i32,
    sub_domain_ids: &[i32],
) -> Result<(), AppError> {
    tender_sub_domain::Entity::delete_many()
        .filter(tender_sub_domain::Column::TenderId.eq(tender_id))
        .exec(conn)
        .await?;
    if sub_domain_ids.is_empty() {
        return Ok(());
    }
    let rows = sub_domain_ids.iter().map(|&sd| tender_sub_domain::ActiveModel {
        tender_id: Set(tender_id),
        sub_domain_id: Set(sd),
    });
    tender_sub_domain::Entity::insert_many(rows)
        .exec_without_returning(conn)
        .await?;
    Ok(())
}

/// Re-reads a tender inside a transaction, holding its row until commit.
pub(crate) async fn lock_tender<C: ConnectionTrait>(conn: &C, id: i32) -> Result<tender::Model, AppError> {
    tender::Entity::find_by_id(id)
        .lock_exclusive()
        .one(conn)
        .await?
        .ok_or_else(|| AppError::not_found("tender", id))
}

fn dedup(ids: &[i32]) -> Vec<i32> {
    let mut ids = ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    ids
}

impl DatabaseService {
    async fn check_classification(&self, domain_id: i32, city_id: i32, sub_domain_ids: &[i32]) -> Result<(), AppError> {
        self.check_location(domain_id, city_id, None).await?;
        for &sd in sub_domain_ids {
            self.check_sub_domain(domain_id, sd).await?;
        }
        Ok(())
    }

    pub async fn create_tender(
        &self,
        buyer_id: i32,
        req: RTenderCreate,
        now: DateTime<Utc>,
    ) -> Result<TenderListing, AppError> {
        req.validate(now)?;
        self.get_buyer(buyer_id).await?;
        let sub_domain_ids = dedup(&req.sub_domain_ids);
        self.check_classification(req.domain_id, req.city_id, &sub_domain_ids)
            .await?;

        let txn = self.database_connection.begin().await?;
        let am = tender::ActiveModel {
            buyer_id: Set(buyer_id),
            domain_id: Set(req.domain_id),
            city_id: Set(req.city_id),
            title: Set(req.title.trim().to_string()),
            description: Set(req.description),
            submit_deadline: Set(req.submit_deadline),
            quires_deadline: Set(req.quires_deadline),
            expected_budget: Set(req.expected_budget),
            status_id: Set(TenderStatus::Open),
            winner_id: Set(None),
            reference_number: Set(new_reference_number(now.year())),
            finished_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let res = tender::Entity::insert(am).exec(&txn).await?;
        replace_sub_domains(&txn, res.last_insert_id, &sub_domain_ids).await?;
        txn.commit().await?;

        info!("buyer {buyer_id} opened tender {}", res.last_insert_id);
        self.get_tender_listing(res.last_insert_id).await
    }

    pub async fn get_tender(&self, id: i32) -> Result<tender::Model, AppError> {
        tender::Entity::find_by_id(id)
            .one(&self.database_connection)
            .await?
            .ok_or_else(|| AppError::not_found("tender", id))
    }

    /// The tender, failing with 403 unless `buyer_id` owns it.
    pub async fn get_owned_tender(&self, id: i32, buyer_id: i32) -> Result<tender::Model, AppError> {
        let t = self.get_tender(id).await?;
        if t.buyer_id != buyer_id {
            return Err(AppError::Forbidden);
        }
        Ok(t)
    }

    pub async fn get_tender_listing(&self, id: i32) -> Result<TenderListing, AppError> {
        let t = self.get_tender(id).await?;
        let mut listings = self.to_listings(vec![t]).await?;
        listings.pop().ok_or_else(|| AppError::not_found("tender", id))
    }

    /// Joins each tender with its region and sub-domains.
    async fn to_listings(&self, tenders: Vec<tender::Model>) -> Result<Vec<TenderListing>, AppError> {
        if tenders.is_empty() {
            return Ok(Vec::new());
        }
        let tender_ids: Vec<i32> = tenders.iter().map(|t| t.id).collect();
        let city_ids: Vec<i32> = tenders.iter().map(|t| t.city_id).collect();

        let regions: HashMap<i32, i32> = city::Entity::find()
            .filter(city::Column::Id.is_in(city_ids))
            .all(&self.database_connection)
            .await?
            .into_iter()
            .map(|c| (c.id, c.region_id))
            .collect();

        let mut sub_domains: HashMap<i32, Vec<i32>> = HashMap::new();
        for link in tender_sub_domain::Entity::find()
            .filter(tender_sub_domain::Column::TenderId.is_in(tender_ids))
            .order_by_asc(tender_sub_domain::Column::SubDomainId)
            .all(&self.database_connection)
            .await?
        {
            sub_domains.entry(link.tender_id).or_default().push(link.sub_domain_id);
        }

        Ok(tenders
            .into_iter()
            .map(|t| TenderListing {
                region_id: regions.get(&t.city_id).copied(),
                sub_domain_ids: sub_domains.remove(&t.id).unwrap_or_default(),
                tender: t,
            })
            .collect())
    }

    fn newest_first(select: Select<tender::Entity>) -> Select<tender::Entity> {
        select
            .order_by_desc(tender::Column::CreatedAt)
            .order_by_desc(tender::Column::Id)
    }

    /// Budget and deadline ranges run in SQL, every other predicate in memory.
    pub async fn list_tenders(&self, filter: &TenderFilter) -> Result<Vec<TenderListing>, AppError> {
        let mut select = tender::Entity::find();
        if let Some(min) = filter.min_budget {
            select = select.filter(tender::Column::ExpectedBudget.gte(min));
        }
        if let Some(max) = filter.max_budget {
            select = select.filter(tender::Column::ExpectedBudget.lte(max));
        }
        if let Some(from) = filter.deadline_from {
            select = select.filter(tender::Column::SubmitDeadline.gte(from));
        }
        if let Some(to) = filter.deadline_to {
            select = select.filter(tender::Column::SubmitDeadline.lte(to));
        }
        let rows = Self::newest_first(select)
            .all(&self.database_connection)
            .await?;
        Ok(filter.apply(self.to_listings(rows).await?))
    }

    pub async fn list_buyer_tenders(&self, buyer_id: i32) -> Result<Vec<TenderListing>, AppError> {
        self.get_buyer(buyer_id).await?;
        let rows = Self::newest_first(
            tender::Entity::find().filter(tender::Column::BuyerId.eq(buyer_id)),
        )
        .all(&self.database_connection)
        .await?;
        self.to_listings(rows).await
    }

    /// Edits are only taken while the tender is open.
    pub async fn update_tender(
        &self,
        id: i32,
        buyer_id: i32,
        patch: RTenderUpdate,
        now: DateTime<Utc>,
    ) -> Result<TenderListing, AppError> {
        let current = self.get_owned_tender(id, buyer_id).await?;
        if !current.status_id.is_open() {
            return Err(AppError::Conflict("tender is no longer open".into()));
        }

        if let Some(title) = &patch.title {
            if title.trim().is_empty() {
                return Err(AppError::Validation("title is required".into()));
            }
        }
        if let Some(description) = &patch.description {
            if description.trim().is_empty() {
                return Err(AppError::Validation("description is required".into()));
            }
        }
        let submit = patch.submit_deadline.unwrap_or(current.submit_deadline);
        let quires = patch.quires_deadline.unwrap_or(current.quires_deadline);
        let budget = match patch.expected_budget {
            Some(v) => v,
            None => current.expected_budget,
        };
        validate_schedule(submit, quires, budget, now)?;

        let domain_id = patch.domain_id.unwrap_or(current.domain_id);
        let city_id = patch.city_id.unwrap_or(current.city_id);
        let sub_domain_ids = match &patch.sub_domain_ids {
            Some(ids) => Some(dedup(ids)),
            None if patch.domain_id.is_some() => Some(self.tender_sub_domains(id).await?),
            None => None,
        };
        self.check_classification(domain_id, city_id, sub_domain_ids.as_deref().unwrap_or(&[]))
            .await?;

        let txn = self.database_connection.begin().await?;
        let mut update = tender::Entity::update_many()
            .col_expr(tender::Column::DomainId, Expr::value(domain_id))
            .col_expr(tender::Column::CityId, Expr::value(city_id))
            .col_expr(tender::Column::SubmitDeadline, Expr::value(submit))
            .col_expr(tender::Column::QuiresDeadline, Expr::value(quires))
            .col_expr(tender::Column::ExpectedBudget, Expr::value(budget))
            .col_expr(tender::Column::UpdatedAt, Expr::value(now));
        if let Some(v) = patch.title {
            update = update.col_expr(tender::Column::Title, Expr::value(v.trim().to_string()));
        }
        if let Some(v) = patch.description {
            update = update.col_expr(tender::Column::Description, Expr::value(v));
        }
        // the sweep may have closed it since the check above
        let res = update
            .filter(tender::Column::Id.eq(id))
            .filter(tender::Column::StatusId.eq(TenderStatus::Open))
            .exec(&txn)
            .await?;
        if res.rows_affected == 0 {
            txn.rollback().await?;
            return Err(AppError::Conflict("tender is no longer open".into()));
        }
        if let Some(ids) = &sub_domain_ids {
            replace_sub_domains(&txn, id, ids).await?;
        }
        txn.commit().await?;

        self.get_tender_listing(id).await
    }

    pub async fn tender_sub_domains(&self, tender_id: i32) -> Result<Vec<i32>, AppError> {
        Ok(tender_sub_domain::Entity::find()
            .filter(tender_sub_domain::Column::TenderId.eq(tender_id))
            .order_by_asc(tender_sub_domain::Column::SubDomainId)
            .all(&self.database_connection)
            .await?
            .into_iter()
            .map(|l| l.sub_domain_id)
            .collect())
    }

    /// Only an open tender nobody has bid on can be withdrawn.
    pub async fn delete_tender(&self, id: i32, buyer_id: i32) -> Result<(), AppError> {
        self.get_owned_tender(id, buyer_id).await?;
        let txn = self.database_connection.begin().await?;
        let t = lock_tender(&txn, id).await?;
        if !t.status_id.is_open() {
            txn.rollback().await?;
            return Err(AppError::Conflict("tender is no longer open".into()));
        }
        let bids = proposal::Entity::find()
            .filter(proposal::Column::TenderId.eq(id))
            .count(&txn)
            .await?;
        if bids > 0 {
            txn.rollback().await?;
            return Err(AppError::Conflict("tender already has proposals".into()));
        }
        tender::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;
        info!("buyer {buyer_id} withdrew tender {id}");
        Ok(())
    }
}
