pub mod config;
pub mod db;
pub mod routes;
pub mod scheduler;
pub mod types;
pub mod utils;
