use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::config::ExcludeConfig;

const SNIFF_LEN: u64 = 1024;

/// Checks if a given path should be archived as text.
///
/// Files with an excluded extension are rejected without being opened.
/// Anything else is text unless a NUL byte shows up in its first kilobyte.
/// Unreadable files count as not text.
pub fn is_text(path: &Path, config: &ExcludeConfig) -> bool {
    if config.is_excluded_extension(path) {
        return false;
    }

    sniff(path).map(|head| !head.contains(&0)).unwrap_or(false)
}

fn sniff(path: &Path) -> std::io::Result<Vec<u8>> {
    let mut head = Vec::with_capacity(SNIFF_LEN as usize);
    File::open(path)?.take(SNIFF_LEN).read_to_end(&mut head)?;
    Ok(head)
}
