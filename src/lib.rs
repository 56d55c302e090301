pub mod config;
pub mod core;
pub mod error;
pub mod fetcher;
pub mod models;
pub mod payload;
pub mod views;

pub use fetcher::{fetch_dashboard, DataSource};
pub use payload::DashboardResponse;
