pub mod app;
pub mod auth;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod testing;
pub mod uploads;
pub mod validation;

pub use app::{app, AppState};
pub use error::ApiError;
