use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "proposal")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub tender_id: i32,
    pub supplier_id: i32,
    #[sea_orm(column_type = "Double")]
    pub price: f64,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tender::Entity",
        from = "Column::TenderId",
        to   = "super::tender::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Tender,
    #[sea_orm(
        belongs_to = "super::supplier::Entity",
        from = "Column::SupplierId",
        to   = "super::supplier::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Supplier,
    #[sea_orm(has_many = "super::proposal_file::Entity")]
    ProposalFile,
}

impl Related<super::tender::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tender.def()
    }
}

impl Related<super::supplier::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Supplier.def()
    }
}

impl Related<super::proposal_file::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProposalFile.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
