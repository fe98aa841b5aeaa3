pub mod config;
pub mod date;
pub mod error;
pub mod export;
pub mod listing;
pub mod models;
pub mod pipeline;
pub mod reference;
pub mod store;
pub mod ui;

pub use error::{AppError, Result};
