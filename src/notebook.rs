use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

#[derive(Debug, Deserialize)]
struct Notebook {
    #[serde(default)]
    cells: Vec<Cell>,
}

#[derive(Debug, Deserialize)]
struct Cell {
    #[serde(default)]
    cell_type: Option<String>,
    #[serde(default)]
    source: Source,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Source {
    Fragments(Vec<String>),
    Text(String),
    Other(Value),
}

impl Default for Source {
    fn default() -> Self {
        Source::Text(String::new())
    }
}

impl Source {
    fn normalize(self) -> Result<String> {
        match self {
            Source::Fragments(parts) => Ok(parts.concat()),
            Source::Text(text) => Ok(text),
            Source::Other(Value::Null) => Ok("None".to_string()),
            Source::Other(Value::Bool(true)) => Ok("True".to_string()),
            Source::Other(Value::Bool(false)) => Ok("False".to_string()),
            Source::Other(Value::Array(_)) => {
                Err(anyhow!("cell source contains a non-string fragment"))
            }
            Source::Other(value) => Ok(value.to_string()),
        }
    }
}

/// Renders the code and markdown cells of a notebook, dropping outputs.
///
/// Returns `None` (after logging a warning) when the file cannot be read or
/// is not a usable notebook.
pub fn render_notebook(path: &Path) -> Option<String> {
    match try_render_notebook(path) {
        Ok(text) => Some(text),
        Err(e) => {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            warn!("Could not parse notebook {name}: {e:#}");
            None
        }
    }
}

pub fn try_render_notebook(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    render_notebook_bytes(&bytes)
}

pub fn render_notebook_bytes(bytes: &[u8]) -> Result<String> {
    let notebook: Notebook = serde_json::from_slice(bytes).context("Invalid notebook document")?;

    let mut blocks = Vec::new();
    for (i, cell) in notebook.cells.into_iter().enumerate() {
        let source = cell.source.normalize()?;
        if source.trim().is_empty() {
            continue;
        }

        let label = match cell.cell_type.as_deref() {
            Some("code") => "Code",
            Some("markdown") => "Markdown",
            _ => continue,
        };
        blocks.push(format!("# --- {label} Cell {} ---\n{source}\n", i + 1));
    }

    Ok(blocks.join("\n"))
}
