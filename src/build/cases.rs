use anyhow::{Context, Result, bail};
use std::borrow::Cow;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// A smoke-test case: an example source file name with its extension removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Case {
    stem: OsString,
}

impl Case {
    pub fn new(stem: impl Into<OsString>) -> Self {
        Self { stem: stem.into() }
    }

    pub fn stem(&self) -> &OsStr {
        &self.stem
    }

    pub fn name(&self) -> Cow<'_, str> {
        self.stem.to_string_lossy()
    }
}

/// List `examples_dir` (non-recursive, listing order) and derive one case per entry.
///
/// Every entry counts, subdirectories included. A missing directory, or a
/// path that is not a directory, is an error.
pub fn discover_cases(examples_dir: &Path) -> Result<Vec<Case>> {
    let meta = fs::metadata(examples_dir)
        .with_context(|| format!("Failed to list {}", examples_dir.display()))?;
    if !meta.is_dir() {
        bail!("Failed to list {}: not a directory", examples_dir.display());
    }

    let mut cases = Vec::new();
    for entry in WalkDir::new(examples_dir).min_depth(1).max_depth(1) {
        let entry = entry
            .with_context(|| format!("Failed to list {}", examples_dir.display()))?;
        cases.push(Case::new(strip_extension(entry.file_name())));
    }
    Ok(cases)
}

/// Drop the last extension of a file name.
///
/// Leading dots never start an extension: `.hidden` and `..foo` stay whole,
/// `a.tar.gz` becomes `a.tar`.
pub fn strip_extension(file_name: &OsStr) -> OsString {
    match Path::new(file_name).file_stem() {
        Some(stem) if !stem.as_encoded_bytes().iter().all(|&b| b == b'.') => {
            stem.to_os_string()
        }
        _ => file_name.to_os_string(),
    }
}

/// Keep the cases whose name contains `filter`, preserving order.
pub fn filter_cases(cases: Vec<Case>, filter: Option<&str>) -> Vec<Case> {
    match filter {
        Some(f) => cases.into_iter().filter(|c| c.name().contains(f)).collect(),
        None => cases,
    }
}
