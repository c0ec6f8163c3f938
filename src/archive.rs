use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use console::style;
use tracing::{error, info};

use crate::core::{is_text, Candidate, ExcludeConfig, Extraction, RunSummary, SkipReason};
use crate::notebook::render_notebook;
use crate::walker::TreeWalker;

pub const ARCHIVE_TITLE: &str = "--- Project Source Code Archive ---";
pub const ARCHIVE_PREAMBLE: &str = "This file contains the concatenated source code of the project, with each file wrapped in tags indicating its relative path.";

pub struct ArchiveWriter<'a> {
    root: PathBuf,
    config: &'a ExcludeConfig,
}

impl<'a> ArchiveWriter<'a> {
    pub fn new(root: impl Into<PathBuf>, config: &'a ExcludeConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    pub fn output_path(&self) -> PathBuf {
        self.root.join(&self.config.output_name)
    }

    /// Walks the project and writes the archive next to it, overwriting any
    /// previous one.
    pub fn run(&self) -> Result<RunSummary> {
        let output_path = self.output_path();
        info!("Project root identified as: {}", self.root.display());
        info!("Output will be saved to: {}", output_path.display());

        let file = File::create(&output_path)
            .with_context(|| format!("Could not create output file {}", output_path.display()))?;
        let mut writer = BufWriter::new(file);

        let mut summary = self.write_archive(&mut writer)?;
        writer
            .flush()
            .with_context(|| format!("Could not write to output file {}", output_path.display()))?;

        summary.output = output_path;
        Ok(summary)
    }

    /// Writes the whole archive to `out`. Per-file failures are counted as
    /// skips; excluded file names are logged but not counted. Only failures of
    /// `out` itself, or an unreadable root, are returned as errors.
    pub fn write_archive<W: Write>(&self, out: &mut W) -> Result<RunSummary> {
        fs::read_dir(&self.root)
            .with_context(|| format!("Could not read project root {}", self.root.display()))?;

        write!(out, "{ARCHIVE_TITLE}\n\n{ARCHIVE_PREAMBLE}\n\n")
            .context("Could not write archive header")?;

        let mut summary = RunSummary {
            output: self.output_path(),
            ..Default::default()
        };

        for candidate in TreeWalker::new(&self.root, self.config).candidates() {
            match self.extract(&candidate) {
                Extraction::Content(content) => {
                    write_section(out, &candidate.relative_path, &content).with_context(|| {
                        format!("Could not write section for {}", candidate.relative_path)
                    })?;
                    summary.processed += 1;
                }
                Extraction::Skipped(SkipReason::ExcludedName) => {
                    log_skip(&candidate.relative_path, &SkipReason::ExcludedName);
                }
                Extraction::Skipped(reason) => {
                    log_skip(&candidate.relative_path, &reason);
                    summary.skipped += 1;
                }
            }
        }

        Ok(summary)
    }

    /// Decides what, if anything, a single file contributes to the archive.
    pub fn extract(&self, candidate: &Candidate) -> Extraction {
        if self.config.is_excluded_file(&candidate.file_name) {
            return Extraction::Skipped(SkipReason::ExcludedName);
        }

        let content = if self.config.is_notebook(&candidate.path) {
            info!("+ Processing notebook: {}", candidate.relative_path);
            render_notebook(&candidate.path)
        } else if is_text(&candidate.path, self.config) {
            info!("+ Processing text file: {}", candidate.relative_path);
            match read_lossy(&candidate.path) {
                Ok(text) => Some(text),
                Err(e) => return Extraction::Skipped(SkipReason::ReadError(format!("{e:#}"))),
            }
        } else {
            return Extraction::Skipped(SkipReason::Binary);
        };

        match content {
            Some(text) if !text.trim().is_empty() => Extraction::Content(text),
            _ => Extraction::Skipped(SkipReason::NoContent),
        }
    }
}

fn read_lossy(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn write_section<W: Write>(
    out: &mut W,
    relative_path: &str,
    content: &str,
) -> std::io::Result<()> {
    writeln!(out, "<{relative_path}>")?;
    out.write_all(content.trim().as_bytes())?;
    write!(out, "\n</{relative_path}>\n\n")
}

fn log_skip(relative_path: &str, reason: &SkipReason) {
    match reason {
        SkipReason::ReadError(e) => error!("Could not read file {relative_path}: {e}"),
        SkipReason::NoContent => info!("No content extracted from {relative_path}"),
        SkipReason::ExcludedName | SkipReason::Binary => {
            info!("- Skipping {reason}: {relative_path}")
        }
    }
}

pub fn print_summary(summary: &RunSummary) {
    println!("\n{}", style("Summary:").green().bold());
    println!("Successfully processed {} files.", summary.processed);
    println!(
        "Skipped {} binary, excluded, or unreadable files.",
        summary.skipped
    );
    println!("Combined output saved to: {}", summary.output.display());
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{tempdir, TempDir};

    fn setup_test_directory(files: &[(&str, &[u8])]) -> TempDir {
        let dir = tempdir().unwrap();
        for (path, content) in files {
            let full_path = dir.path().join(path);
            if let Some(parent) = full_path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(&full_path, content).unwrap();
        }
        dir
    }

    fn candidate(root: &Path, relative: &str) -> Candidate {
        let path = root.join(relative);
        Candidate {
            file_name: path.file_name().unwrap().to_string_lossy().into_owned(),
            path,
            relative_path: relative.to_string(),
        }
    }

    #[test]
    fn test_extract_outcomes() {
        let dir = setup_test_directory(&[
            ("main.py", b"print(1)\n"),
            (".env", b"SECRET=1"),
            ("blank.txt", b"  \n\t\n"),
            ("blob.bin", b"\x00\x01\x02"),
            ("photo.JPG", b"not really a jpeg"),
            ("bad.ipynb", b"{"),
            ("empty.ipynb", br#"{"cells": [{"cell_type": "code", "source": " "}]}"#),
            ("latin1.txt", b"caf\xe9"),
        ]);
        let config = ExcludeConfig::default();
        let writer = ArchiveWriter::new(dir.path(), &config);
        let root = dir.path();

        let cases = vec![
            ("main.py", Extraction::Content("print(1)\n".to_string())),
            (".env", Extraction::Skipped(SkipReason::ExcludedName)),
            ("blank.txt", Extraction::Skipped(SkipReason::NoContent)),
            ("blob.bin", Extraction::Skipped(SkipReason::Binary)),
            ("photo.JPG", Extraction::Skipped(SkipReason::Binary)),
            ("bad.ipynb", Extraction::Skipped(SkipReason::NoContent)),
            ("empty.ipynb", Extraction::Skipped(SkipReason::NoContent)),
            ("latin1.txt", Extraction::Content("caf\u{FFFD}".to_string())),
        ];

        for (name, expected) in cases {
            assert_eq!(
                writer.extract(&candidate(root, name)),
                expected,
                "Failed for file: {name}"
            );
        }
    }

    #[test]
    fn test_write_archive_sections() {
        let dir = setup_test_directory(&[
            ("b.txt", b"\n\n  second  \n"),
            ("a.txt", b"first"),
            ("sub/c.md", b"# third"),
            ("sub/skip.png", b"\x89PNG"),
        ]);
        let config = ExcludeConfig::default();
        let writer = ArchiveWriter::new(dir.path(), &config);

        let mut out = Vec::new();
        let summary = writer.write_archive(&mut out).unwrap();

        let expected = format!(
            "{ARCHIVE_TITLE}\n\n{ARCHIVE_PREAMBLE}\n\n\
             <a.txt>\nfirst\n</a.txt>\n\n\
             <b.txt>\nsecond\n</b.txt>\n\n\
             <sub/c.md>\n# third\n</sub/c.md>\n\n"
        );
        assert_eq!(String::from_utf8(out).unwrap(), expected);
        assert_eq!(summary.processed, 3);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.output, dir.path().join(&config.output_name));
    }

    #[test]
    fn test_excluded_names_are_not_counted() {
        let dir = setup_test_directory(&[(".DS_Store", b"\x00\x00\x00\x01Bud1")]);
        let config = ExcludeConfig::default();
        let writer = ArchiveWriter::new(dir.path(), &config);

        let mut out = Vec::new();
        let summary = writer.write_archive(&mut out).unwrap();

        assert_eq!(summary.processed, 0);
        assert_eq!(summary.skipped, 0);
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let dir = tempdir().unwrap();
        let config = ExcludeConfig::default();
        let writer = ArchiveWriter::new(dir.path().join("nope"), &config);

        let mut out = Vec::new();
        assert!(writer.write_archive(&mut out).is_err());
        assert!(writer.run().is_err());
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_output_failure_is_fatal() {
        let dir = setup_test_directory(&[("a.txt", b"hello")]);
        let config = ExcludeConfig::default();
        let writer = ArchiveWriter::new(dir.path(), &config);

        let err = writer.write_archive(&mut FailingWriter).unwrap_err();
        assert!(format!("{err:#}").contains("disk full"));
    }
}
