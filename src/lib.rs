pub mod auth;
pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod transfer;

pub use db::create_pool;
