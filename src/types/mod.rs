pub mod auth;
pub mod company;
pub mod credential;
pub mod error;
pub mod inquiry;
pub mod proposal;
pub mod reference;
pub mod response;
pub mod tender;
