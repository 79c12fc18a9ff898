pub mod companies;
pub mod credentials;
pub mod database_service;
pub mod inquiries;
pub mod lifecycle;
pub mod proposals;
pub mod reference;
pub mod sessions;
pub mod tenders;
