use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RInquiryCreate {
    pub question: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RInquiryAnswer {
    pub answer: String,
}

/// Answered inquiry as every supplier sees it: who asked stays hidden.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PublicInquiryView {
    pub id: i32,
    pub tender_id: i32,
    pub question: String,
    pub answer: Option<String>,
    pub answered_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<entity::inquiry::Model> for PublicInquiryView {
    fn from(m: entity::inquiry::Model) -> Self {
        PublicInquiryView {
            id: m.id,
            tender_id: m.tender_id,
            question: m.question,
            answer: m.answer,
            answered_at: m.answered_at,
            created_at: m.created_at,
        }
    }
}
