use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Tender lifecycle. Stored as its numeric id in `tender.status_id`.
///
/// The only moves are `Open -> Awarding -> Finished`; `Finished` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TenderStatus {
    #[sea_orm(num_value = 1)]
    Open,
    #[sea_orm(num_value = 2)]
    Awarding,
    #[sea_orm(num_value = 3)]
    Finished,
}

impl TenderStatus {
    pub fn id(self) -> i32 {
        self.to_value()
    }

    pub fn from_id(id: i32) -> Option<Self> {
        Self::try_from_value(&id).ok()
    }

    /// The state a tender may move to from here, if any.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Open => Some(Self::Awarding),
            Self::Awarding => Some(Self::Finished),
            Self::Finished => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self.next().is_none()
    }

    /// Proposals, inquiries and edits are only taken while the tender is open.
    pub fn is_open(self) -> bool {
        self == Self::Open
    }
}

#[derive(Debug, Clone, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tender")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub buyer_id: i32,
    pub domain_id: i32,
    pub city_id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub submit_deadline: DateTimeUtc,
    pub quires_deadline: DateTimeUtc,
    #[sea_orm(column_type = "Double", nullable)]
    pub expected_budget: Option<f64>,
    pub status_id: TenderStatus,
    pub winner_id: Option<i32>,
    #[sea_orm(unique)]
    pub reference_number: String,
    pub finished_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::buyer::Entity",
        from = "Column::BuyerId",
        to   = "super::buyer::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Buyer,
    #[sea_orm(
        belongs_to = "super::city::Entity",
        from = "Column::CityId",
        to   = "super::city::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    City,
    #[sea_orm(has_many = "super::proposal::Entity")]
    Proposal,
    #[sea_orm(has_many = "super::inquiry::Entity")]
    Inquiry,
    #[sea_orm(has_many = "super::tender_sub_domain::Entity")]
    TenderSubDomain,
}

impl Related<super::buyer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Buyer.def()
    }
}

impl Related<super::proposal::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Proposal.def()
    }
}

impl Related<super::inquiry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Inquiry.def()
    }
}

impl Related<super::tender_sub_domain::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TenderSubDomain.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
