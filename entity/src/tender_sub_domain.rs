use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tender_sub_domain")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub tender_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub sub_domain_id: i32,
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
        belongs_to = "super::sub_domain::Entity",
        from = "Column::SubDomainId",
        to   = "super::sub_domain::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    SubDomain,
}

impl Related<super::tender::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tender.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
