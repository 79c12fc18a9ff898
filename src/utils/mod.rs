pub mod filter;
pub mod multipart;
pub mod otp;
pub mod token;
pub mod webutils;
