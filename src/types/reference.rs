use serde::{Deserialize, Serialize};

/// Body for every bilingual catalog row (domains, regions, licenses, ...).
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RNamed {
    pub name_ar: String,
    pub name_en: String,
}

impl RNamed {
    pub fn is_blank(&self) -> bool {
        self.name_ar.trim().is_empty() || self.name_en.trim().is_empty()
    }
}
