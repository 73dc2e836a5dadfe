//! DishHub admin dashboard: API client, metric aggregation and terminal UI

pub mod cli;
pub mod config;
pub mod logging;
pub mod services;
pub mod tui;
pub mod types;
