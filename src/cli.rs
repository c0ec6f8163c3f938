use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "combine-code",
    about = "Flatten a project's source tree into a single archive file",
    version
)]
pub struct Cli {
    /// Project root to archive (defaults to two levels above the executable)
    #[arg(long, value_parser = validate_root)]
    pub root: Option<PathBuf>,
}

impl Cli {
    pub fn project_root(&self) -> anyhow::Result<PathBuf> {
        match &self.root {
            Some(root) => Ok(root.clone()),
            None => combine_code::detect_project_root(),
        }
    }
}

fn validate_root(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);
    if path.is_dir() {
        Ok(path)
    } else {
        Err(format!("Path '{}' is not a directory", s))
    }
}
