//! Build artifact cleanup (`runbuild clean`).

use super::layout::Layout;
use anyhow::{Context, Result, bail};
use colored::*;
use std::fs;

/// Remove the build directory. Returns whether anything was removed.
pub fn clean(layout: &Layout) -> Result<bool> {
    let build_dir = &layout.build_dir;

    // Never delete the project itself through a misconfigured build_dir.
    if layout.root.starts_with(build_dir) {
        bail!(
            "Refusing to remove {}: it contains the project root",
            build_dir.display()
        );
    }

    if !build_dir.exists() {
        println!("{} Nothing to clean", "!".yellow());
        return Ok(false);
    }

    let removed = if build_dir.is_dir() {
        fs::remove_dir_all(build_dir)
    } else {
        fs::remove_file(build_dir)
    };
    removed.with_context(|| format!("Failed to remove {}", build_dir.display()))?;

    println!("{} Removed {}", "🗑️".red(), build_dir.display());
    println!("{} Clean complete.", "✓".green());
    Ok(true)
}
