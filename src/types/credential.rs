use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RLicenseLink {
    pub license_id: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RCertificateLink {
    pub certificate_id: i32,
}
