pub mod config;
pub mod error;
pub mod format;
pub mod slug;

pub use config::{ApiConfig, AppConfig, PaginationConfig};
pub use error::{AppError, Result};
