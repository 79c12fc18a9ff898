//! Tender list filtering.
//!
//! Each query parameter is an independent predicate; a tender is kept when
//! every predicate that was supplied holds. Date and budget ranges are also
//! pushed into SQL by the db layer, the rest only run here.

use chrono::{DateTime, Utc};
use entity::tender::TenderStatus;

use crate::types::error::AppError;
use crate::types::tender::{TenderListing, TenderQuery};

#[derive(Debug, Clone, Default)]
pub struct TenderFilter {
    pub text: Option<String>,
    pub statuses: Vec<TenderStatus>,
    pub min_budget: Option<f64>,
    pub max_budget: Option<f64>,
    pub region_id: Option<i32>,
    pub city_id: Option<i32>,
    pub domain_id: Option<i32>,
    pub sub_domains: Vec<i32>,
    pub deadline_from: Option<DateTime<Utc>>,
    pub deadline_to: Option<DateTime<Utc>>,
}

fn parse_id_list(raw: &str, field: &str) -> Result<Vec<i32>, AppError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i32>()
                .map_err(|_| AppError::Validation(format!("{field} must be a comma separated list of ids")))
        })
        .collect()
}

impl TenderFilter {
    pub fn from_query(query: &TenderQuery) -> Result<Self, AppError> {
        let statuses = match &query.status {
            Some(raw) => parse_id_list(raw, "status")?
                .into_iter()
                .map(|id| {
                    TenderStatus::from_id(id)
                        .ok_or_else(|| AppError::Validation(format!("unknown status id {id}")))
                })
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
        };
        let sub_domains = match &query.sub_domain {
            Some(raw) => parse_id_list(raw, "sub_domain")?,
            None => Vec::new(),
        };

        if let (Some(min), Some(max)) = (query.min_budget, query.max_budget) {
            if min > max {
                return Err(AppError::Validation("min_budget must not exceed max_budget".into()));
            }
        }
        if let (Some(from), Some(to)) = (query.deadline_from, query.deadline_to) {
            if from > to {
                return Err(AppError::Validation("deadline_from must not be after deadline_to".into()));
            }
        }

        let text = query
            .q
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        Ok(TenderFilter {
            text,
            statuses,
            min_budget: query.min_budget,
            max_budget: query.max_budget,
            region_id: query.region_id,
            city_id: query.city_id,
            domain_id: query.domain_id,
            sub_domains,
            deadline_from: query.deadline_from,
            deadline_to: query.deadline_to,
        })
    }

    pub fn has_budget_range(&self) -> bool {
        self.min_budget.is_some() || self.max_budget.is_some()
    }

    fn matches_text(&self, l: &TenderListing) -> bool {
        let Some(needle) = &self.text else { return true };
        let t = &l.tender;
        [&t.title, &t.description, &t.reference_number]
            .iter()
            .any(|field| field.to_lowercase().contains(needle.as_str()))
    }

    fn matches_status(&self, l: &TenderListing) -> bool {
        self.statuses.is_empty() || self.statuses.contains(&l.tender.status_id)
    }

    fn matches_budget(&self, l: &TenderListing) -> bool {
        if !self.has_budget_range() {
            return true;
        }
        let Some(budget) = l.tender.expected_budget else { return false };
        self.min_budget.map_or(true, |min| budget >= min)
            && self.max_budget.map_or(true, |max| budget <= max)
    }

    fn matches_location(&self, l: &TenderListing) -> bool {
        self.city_id.map_or(true, |city| l.tender.city_id == city)
            && self.region_id.map_or(true, |region| l.region_id == Some(region))
    }

    fn matches_classification(&self, l: &TenderListing) -> bool {
        self.domain_id.map_or(true, |domain| l.tender.domain_id == domain)
            && (self.sub_domains.is_empty()
                || l.sub_domain_ids.iter().any(|id| self.sub_domains.contains(id)))
    }

    fn matches_deadline(&self, l: &TenderListing) -> bool {
        let deadline = l.tender.submit_deadline;
        self.deadline_from.map_or(true, |from| deadline >= from)
            && self.deadline_to.map_or(true, |to| deadline <= to)
    }

    pub fn matches(&self, l: &TenderListing) -> bool {
        self.matches_text(l)
            && self.matches_status(l)
            && self.matches_budget(l)
            && self.matches_location(l)
            && self.matches_classification(l)
            && self.matches_deadline(l)
    }

    pub fn apply(&self, listings: Vec<TenderListing>) -> Vec<TenderListing> {
        listings.into_iter().filter(|l| self.matches(l)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn listing(id: i32, title: &str, status: TenderStatus, budget: Option<f64>) -> TenderListing {
        let now = Utc::now();
        TenderListing {
            tender: entity::tender::Model {
                id,
                buyer_id: 1,
                domain_id: 1,
                city_id: 10,
                title: title.to_string(),
                description: "Supply and installation".to_string(),
                submit_deadline: now + Duration::days(id as i64),
                quires_deadline: now,
                expected_budget: budget,
                status_id: status,
                winner_id: None,
                reference_number: format!("TND-2025-0000000{id}"),
                finished_at: None,
                created_at: now,
                updated_at: now,
            },
            region_id: Some(100),
            sub_domain_ids: vec![7],
        }
    }

    fn sample() -> Vec<TenderListing> {
        vec![
            listing(1, "Laptops for schools", TenderStatus::Open, Some(10_000.0)),
            listing(2, "Road maintenance", TenderStatus::Awarding, Some(250_000.0)),
            listing(3, "Cleaning services", TenderStatus::Finished, None),
        ]
    }

    fn ids(v: Vec<TenderListing>) -> Vec<i32> {
        v.into_iter().map(|l| l.tender.id).collect()
    }

    #[test]
    fn empty_query_keeps_everything() {
        let f = TenderFilter::from_query(&TenderQuery::default()).unwrap();
        assert_eq!(ids(f.apply(sample())), vec![1, 2, 3]);
    }

    #[test]
    fn free_text_is_case_insensitive_over_title_and_reference() {
        let f = TenderFilter::from_query(&TenderQuery { q: Some("LAPTOP".into()), ..Default::default() }).unwrap();
        assert_eq!(ids(f.apply(sample())), vec![1]);

        let f = TenderFilter::from_query(&TenderQuery { q: Some("0000003".into()), ..Default::default() }).unwrap();
        assert_eq!(ids(f.apply(sample())), vec![3]);
    }

    #[test]
    fn status_membership() {
        let f = TenderFilter::from_query(&TenderQuery { status: Some("1, 3".into()), ..Default::default() }).unwrap();
        assert_eq!(ids(f.apply(sample())), vec![1, 3]);
    }

    #[test]
    fn unknown_status_is_a_validation_error() {
        assert!(TenderFilter::from_query(&TenderQuery { status: Some("9".into()), ..Default::default() }).is_err());
        assert!(TenderFilter::from_query(&TenderQuery { status: Some("open".into()), ..Default::default() }).is_err());
    }

    #[test]
    fn budget_range_drops_tenders_without_budget() {
        let f = TenderFilter::from_query(&TenderQuery {
            min_budget: Some(5_000.0),
            max_budget: Some(100_000.0),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(ids(f.apply(sample())), vec![1]);

        let f = TenderFilter::from_query(&TenderQuery { min_budget: Some(0.0), ..Default::default() }).unwrap();
        assert_eq!(ids(f.apply(sample())), vec![1, 2]);
    }

    #[test]
    fn inverted_ranges_are_rejected() {
        assert!(TenderFilter::from_query(&TenderQuery {
            min_budget: Some(10.0),
            max_budget: Some(1.0),
            ..Default::default()
        })
        .is_err());
    }

    #[test]
    fn location_and_classification() {
        let f = TenderFilter::from_query(&TenderQuery { region_id: Some(100), city_id: Some(10), ..Default::default() }).unwrap();
        assert_eq!(f.apply(sample()).len(), 3);

        let f = TenderFilter::from_query(&TenderQuery { region_id: Some(101), ..Default::default() }).unwrap();
        assert!(f.apply(sample()).is_empty());

        let f = TenderFilter::from_query(&TenderQuery { sub_domain: Some("3,7".into()), ..Default::default() }).unwrap();
        assert_eq!(f.apply(sample()).len(), 3);

        let f = TenderFilter::from_query(&TenderQuery { sub_domain: Some("3".into()), domain_id: Some(1), ..Default::default() }).unwrap();
        assert!(f.apply(sample()).is_empty());
    }

    #[test]
    fn predicates_combine_with_and() {
        let f = TenderFilter::from_query(&TenderQuery {
            q: Some("road".into()),
            status: Some("1".into()),
            ..Default::default()
        })
        .unwrap();
        assert!(f.apply(sample()).is_empty());
    }
}
