use sea_orm::entity::prelude::*;
use sea_orm::Iterable;
use serde::{Deserialize, Serialize};

/// The four document slots a proposal form carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    #[sea_orm(string_value = "technical")]
    Technical,
    #[sea_orm(string_value = "financial")]
    Financial,
    #[sea_orm(string_value = "company")]
    Company,
    #[sea_orm(string_value = "extra")]
    Extra,
}

impl FileKind {
    pub const ALL: [FileKind; 4] = [Self::Technical, Self::Financial, Self::Company, Self::Extra];

    /// Multipart field name the file arrives under.
    pub fn form_field(self) -> &'static str {
        match self {
            Self::Technical => "technical_file",
            Self::Financial => "financial_file",
            Self::Company => "company_file",
            Self::Extra => "extra_file",
        }
    }

    pub fn from_form_field(name: &str) -> Option<Self> {
        Self::iter().find(|k| k.form_field() == name)
    }

    pub fn as_str(self) -> String {
        self.to_value()
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::try_from_value(&value.to_string()).ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "proposal_file")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub proposal_id: i32,
    pub kind: FileKind,
    pub file_name: String,
    pub content_type: String,
    pub size: i64,
    #[serde(skip)]
    pub data: Vec<u8>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::proposal::Entity",
        from = "Column::ProposalId",
        to   = "super::proposal::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Proposal,
}

impl Related<super::proposal::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Proposal.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
