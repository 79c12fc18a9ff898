pub mod crud;
pub mod lifecycle;
