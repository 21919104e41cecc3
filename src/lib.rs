pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod report;
pub mod services;

pub use error::AppError;
pub use services::file_processor::process_directory;
pub use services::registry::RunRegistry;
