use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "domain")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name_ar: String,
    pub name_en: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::sub_domain::Entity")]
    SubDomain,
}

impl Related<super::sub_domain::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SubDomain.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
