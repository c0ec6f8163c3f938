pub mod config;
pub mod source_detection;
pub mod types;

pub use config::{detect_project_root, ExcludeConfig, OUTPUT_FILENAME};
pub use source_detection::is_text;
pub use types::{Candidate, Extraction, RunSummary, SkipReason};
