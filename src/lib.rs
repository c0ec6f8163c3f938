pub mod archive;
pub mod core;
pub mod notebook;
pub mod walker;

pub use archive::{print_summary, ArchiveWriter};
pub use core::{
    detect_project_root, is_text, Candidate, ExcludeConfig, Extraction, RunSummary, SkipReason,
    OUTPUT_FILENAME,
};
pub use notebook::{render_notebook, render_notebook_bytes, try_render_notebook};
pub use walker::TreeWalker;
