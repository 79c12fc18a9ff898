use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Which side of the marketplace a company row lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum Party {
    #[sea_orm(string_value = "buyer")]
    Buyer,
    #[sea_orm(string_value = "supplier")]
    Supplier,
}

// company_id points at buyer.id or supplier.id depending on party, so there is no FK on it.
#[derive(Debug, Clone, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "company_license")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub party: Party,
    pub company_id: i32,
    pub license_id: i32,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::license::Entity",
        from = "Column::LicenseId",
        to   = "super::license::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    License,
}

impl Related<super::license::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::License.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
