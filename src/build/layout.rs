//! Project layout and build directory setup.
//!
//! All paths are resolved against an explicit project root once, up front.
//! Nothing in the pipeline changes the process working directory.

use crate::config::LayoutConfig;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Layout {
    pub root: PathBuf,
    pub build_dir: PathBuf,
    pub examples_dir: PathBuf,
    pub binaries_dir: PathBuf,
}

impl Layout {
    pub fn new(root: &Path, cfg: &LayoutConfig) -> Self {
        let build_dir = root.join(&cfg.build_dir);
        let binaries_dir = match &cfg.binaries_dir {
            Some(dir) => root.join(dir),
            None => build_dir.join("examples"),
        };
        Self {
            root: root.to_path_buf(),
            examples_dir: root.join(&cfg.examples_dir),
            build_dir,
            binaries_dir,
        }
    }

    /// Path of the compiled binary for a case stem.
    pub fn binary_for(&self, stem: &std::ffi::OsStr) -> PathBuf {
        if cfg!(target_os = "windows") {
            let mut name = stem.to_os_string();
            name.push(".exe");
            self.binaries_dir.join(name)
        } else {
            self.binaries_dir.join(stem)
        }
    }
}

/// Create `path` (and parents) if nothing exists there yet.
///
/// An existing entry is left untouched, even if it is a regular file.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    fs::create_dir_all(path)
        .with_context(|| format!("Failed to create build directory {}", path.display()))
}
