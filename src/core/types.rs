use std::fmt;
use std::path::PathBuf;

/// A file yielded by the walker, before any content is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: PathBuf,
    pub relative_path: String,
    pub file_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Content(String),
    Skipped(SkipReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    ExcludedName,
    Binary,
    NoContent,
    ReadError(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::ExcludedName => write!(f, "excluded file name"),
            SkipReason::Binary => write!(f, "binary/excluded file"),
            SkipReason::NoContent => write!(f, "no content extracted"),
            SkipReason::ReadError(e) => write!(f, "read error: {e}"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub processed: usize,
    pub skipped: usize,
    pub output: PathBuf,
}
