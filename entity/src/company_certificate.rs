use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

pub use super::company_license::Party;

#[derive(Debug, Clone, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "company_certificate")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub party: Party,
    pub company_id: i32,
    pub certificate_id: i32,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::certificate::Entity",
        from = "Column::CertificateId",
        to   = "super::certificate::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Certificate,
}

impl Related<super::certificate::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Certificate.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
