pub mod analyzer;
pub mod headers;
pub mod html;
pub mod processor;
pub mod types;
pub mod utils;

pub use analyzer::SheetAnalyzer;
pub use processor::ResultFile;
