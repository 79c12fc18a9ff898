use chrono::{DateTime, Utc};
use entity::tender::TenderStatus;
use serde::{Deserialize, Deserializer, Serialize};

use crate::types::error::AppError;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RTenderCreate {
    pub title: String,
    pub description: String,
    pub domain_id: i32,
    #[serde(default)]
    pub sub_domain_ids: Vec<i32>,
    pub city_id: i32,
    pub submit_deadline: DateTime<Utc>,
    pub quires_deadline: DateTime<Utc>,
    pub expected_budget: Option<f64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct RTenderUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub domain_id: Option<i32>,
    pub sub_domain_ids: Option<Vec<i32>>,
    pub city_id: Option<i32>,
    pub submit_deadline: Option<DateTime<Utc>>,
    pub quires_deadline: Option<DateTime<Utc>>,
    /// Absent keeps the budget, `null` clears it.
    #[serde(default, deserialize_with = "explicit_null", skip_serializing_if = "Option::is_none")]
    pub expected_budget: Option<Option<f64>>,
}

/// Reads a present field as `Some(..)` even when its value is `null`.
fn explicit_null<'de, D, T>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RAward {
    pub supplier_id: i32,
}

/// Raw query string of `GET /api/tenders`. Parsed into a `TenderFilter`.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct TenderQuery {
    pub q: Option<String>,
    /// Comma separated status ids, e.g. `1,2`.
    pub status: Option<String>,
    pub min_budget: Option<f64>,
    pub max_budget: Option<f64>,
    pub region_id: Option<i32>,
    pub city_id: Option<i32>,
    pub domain_id: Option<i32>,
    /// Comma separated sub-domain ids.
    pub sub_domain: Option<String>,
    pub deadline_from: Option<DateTime<Utc>>,
    pub deadline_to: Option<DateTime<Utc>>,
}

/// A tender joined with what the list filters need beyond its own row.
#[derive(Debug, Clone)]
pub struct TenderListing {
    pub tender: entity::tender::Model,
    pub region_id: Option<i32>,
    pub sub_domain_ids: Vec<i32>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TenderView {
    pub id: i32,
    pub buyer_id: i32,
    pub reference_number: String,
    pub title: String,
    pub description: String,
    pub domain_id: i32,
    pub sub_domain_ids: Vec<i32>,
    pub city_id: i32,
    pub region_id: Option<i32>,
    pub submit_deadline: DateTime<Utc>,
    pub quires_deadline: DateTime<Utc>,
    pub expected_budget: Option<f64>,
    pub status_id: i32,
    pub status: TenderStatus,
    pub winner_id: Option<i32>,
    pub finished_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TenderListing> for TenderView {
    fn from(l: TenderListing) -> Self {
        let t = l.tender;
        TenderView {
            id: t.id,
            buyer_id: t.buyer_id,
            reference_number: t.reference_number,
            title: t.title,
            description: t.description,
            domain_id: t.domain_id,
            sub_domain_ids: l.sub_domain_ids,
            city_id: t.city_id,
            region_id: l.region_id,
            submit_deadline: t.submit_deadline,
            quires_deadline: t.quires_deadline,
            expected_budget: t.expected_budget,
            status_id: t.status_id.id(),
            status: t.status_id,
            winner_id: t.winner_id,
            finished_at: t.finished_at,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ExpireRes {
    pub updated: usize,
    pub tender_ids: Vec<i32>,
}

/// Deadline and budget rules shared by create and update.
pub fn validate_schedule(
    submit_deadline: DateTime<Utc>,
    quires_deadline: DateTime<Utc>,
    expected_budget: Option<f64>,
    now: DateTime<Utc>,
) -> Result<(), AppError> {
    if submit_deadline <= now {
        return Err(AppError::Validation("submit_deadline must be in the future".into()));
    }
    if quires_deadline > submit_deadline {
        return Err(AppError::Validation(
            "quires_deadline must not be after submit_deadline".into(),
        ));
    }
    if let Some(budget) = expected_budget {
        if !budget.is_finite() || budget < 0.0 {
            return Err(AppError::Validation("expected_budget must be a non-negative number".into()));
        }
    }
    Ok(())
}

impl RTenderCreate {
    pub fn validate(&self, now: DateTime<Utc>) -> Result<(), AppError> {
        if self.title.trim().is_empty() {
            return Err(AppError::Validation("title is required".into()));
        }
        if self.description.trim().is_empty() {
            return Err(AppError::Validation("description is required".into()));
        }
        validate_schedule(self.submit_deadline, self.quires_deadline, self.expected_budget, now)
    }
}
