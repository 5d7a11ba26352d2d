pub mod config;
pub mod error;
pub mod handlers;
pub mod libraries;
pub mod models;
pub mod services;
pub mod state;

pub use config::Config;
pub use error::UpstreamError;
pub use state::AppState;
