use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::Context;

pub const OUTPUT_FILENAME: &str = "full_project_source.txt";

/// Fixed exclusion lists consulted by the walker and the archive writer.
#[derive(Debug, Clone)]
pub struct ExcludeConfig {
    pub dirs: HashSet<String>,
    pub dir_suffixes: Vec<String>,
    pub extensions: HashSet<String>,
    pub file_names: HashSet<String>,
    pub output_name: String,
    pub notebook_extension: String,
}

impl Default for ExcludeConfig {
    fn default() -> Self {
        let output_name = OUTPUT_FILENAME.to_string();
        let mut file_names = default_excluded_files();
        file_names.insert(output_name.clone());

        ExcludeConfig {
            dirs: default_excluded_dirs(),
            dir_suffixes: vec![".egg-info".to_string()],
            extensions: default_excluded_extensions(),
            file_names,
            output_name,
            notebook_extension: "ipynb".to_string(),
        }
    }
}

impl ExcludeConfig {
    pub fn is_excluded_dir(&self, name: &str) -> bool {
        self.dirs.contains(name) || self.dir_suffixes.iter().any(|s| name.ends_with(s.as_str()))
    }

    pub fn is_excluded_file(&self, name: &str) -> bool {
        self.file_names.contains(name)
    }

    pub fn is_excluded_extension(&self, path: &Path) -> bool {
        lowercase_extension(path)
            .map(|ext| self.extensions.contains(&ext))
            .unwrap_or(false)
    }

    pub fn is_notebook(&self, path: &Path) -> bool {
        lowercase_extension(path).is_some_and(|ext| ext == self.notebook_extension)
    }
}

fn lowercase_extension(path: &Path) -> Option<String> {
    path.extension().map(|ext| ext.to_string_lossy().to_lowercase())
}

fn default_excluded_dirs() -> HashSet<String> {
    [
        // Version control and editors
        ".git", ".vscode", ".idea",
        // Virtual environments
        "venv", ".venv", "env", "renv",
        // Caches and generated output
        "__pycache__", "cache", "output", "build", "dist", "logs", "data",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_excluded_extensions() -> HashSet<String> {
    [
        // Compiled objects
        "pyc", "pyo", "so", "dll", "exe",
        // Images
        "png", "jpg", "jpeg", "gif", "ico", "svg",
        // Data
        "parquet", "arrow", "feather", "csv", "db", "sqlite3",
        // Archives
        "zip", "gz", "tar", "rar", "7z",
        // Documents
        "pdf", "docx", "xlsx",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_excluded_files() -> HashSet<String> {
    [
        "full_code_text.txt",
        ".DS_Store",
        "Thumbs.db",
        ".env",
        "notebook.html",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Guesses the project root from the running executable, two levels up from
/// its canonical location. Falls back to the working directory.
pub fn detect_project_root() -> anyhow::Result<PathBuf> {
    let from_exe = std::env::current_exe()
        .and_then(|exe| exe.canonicalize())
        .ok()
        .and_then(|exe| exe.parent()?.parent().map(Path::to_path_buf));

    match from_exe {
        Some(root) => Ok(root),
        None => std::env::current_dir().context("Could not determine the current directory"),
    }
}
