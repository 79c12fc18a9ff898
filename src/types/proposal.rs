use chrono::{DateTime, Utc};
use entity::proposal_file::FileKind;
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};

/// An attachment as it came off the wire.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub kind: FileKind,
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// A validated proposal submission, ready to persist.
#[derive(Debug, Clone)]
pub struct NewProposal {
    pub tender_id: i32,
    pub supplier_id: i32,
    pub price: f64,
    pub files: Vec<UploadedFile>,
}

/// File metadata without the blob.
#[derive(Serialize, Deserialize, Debug, Clone, FromQueryResult)]
pub struct FileView {
    pub id: i32,
    pub proposal_id: i32,
    pub kind: FileKind,
    pub file_name: String,
    pub content_type: String,
    pub size: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ProposalView {
    pub id: i32,
    pub tender_id: i32,
    pub supplier_id: i32,
    pub price: f64,
    pub files: Vec<FileView>,
    pub created_at: DateTime<Utc>,
}

impl ProposalView {
    pub fn new(p: entity::proposal::Model, files: Vec<FileView>) -> Self {
        ProposalView {
            id: p.id,
            tender_id: p.tender_id,
            supplier_id: p.supplier_id,
            price: p.price,
            files,
            created_at: p.created_at,
        }
    }
}
