use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "buyer")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub company_name: String,
    pub commercial_record: String,
    #[sea_orm(unique)]
    pub email: String,
    pub phone: String,
    pub password_hash: String,
    pub session_hash: Option<String>,
    pub domain_id: i32,
    pub city_id: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::tender::Entity")]
    Tender,
    #[sea_orm(
        belongs_to = "super::domain::Entity",
        from = "Column::DomainId",
        to   = "super::domain::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Domain,
    #[sea_orm(
        belongs_to = "super::city::Entity",
        from = "Column::CityId",
        to   = "super::city::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    City,
}

impl Related<super::tender::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tender.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
