pub mod config;
pub mod error;
pub mod handlers;
pub mod identity;
pub mod logging;
pub mod models;
pub mod services;
pub mod state;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
