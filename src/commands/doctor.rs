//! Doctor command handler
//!
//! Handles `runbuild doctor`: checks that the build tools can be started and
//! that the project layout looks the way the pipeline expects.

use anyhow::Result;
use colored::*;
use std::process::Command;

use crate::build::{Layout, default_jobs};
use crate::config::BuildConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Check {
    Ok(String),
    Warn(String),
    Missing(String),
}

impl Check {
    fn print(&self, label: &str) {
        print!("Checking {}... ", label);
        match self {
            Check::Ok(msg) => println!("{}", msg.green()),
            Check::Warn(msg) => println!("{}", msg.yellow()),
            Check::Missing(msg) => println!("{}", msg.red()),
        }
    }
}

/// Whether `tool --version` can be spawned, with the first line of its output.
pub fn check_tool(tool: &str) -> Check {
    match Command::new(tool).arg("--version").output() {
        Ok(out) => {
            let version = String::from_utf8_lossy(&out.stdout)
                .lines()
                .next()
                .unwrap_or("")
                .trim()
                .to_string();
            if version.is_empty() {
                Check::Ok("Found".to_string())
            } else {
                Check::Ok(format!("Found ({})", version))
            }
        }
        Err(_) => Check::Missing(format!("Not Found (install {})", tool)),
    }
}

pub fn check_layout(layout: &Layout) -> Vec<(&'static str, Check)> {
    let mut checks = Vec::new();

    checks.push((
        "CMakeLists.txt",
        if layout.root.join("CMakeLists.txt").is_file() {
            Check::Ok("Found".to_string())
        } else {
            Check::Warn("Not Found (configure will fail)".to_string())
        },
    ));

    checks.push((
        "examples dir",
        if layout.examples_dir.is_dir() {
            match std::fs::read_dir(&layout.examples_dir) {
                Ok(entries) => Check::Ok(format!("{} case(s)", entries.count())),
                Err(e) => Check::Missing(format!("Unreadable ({})", e)),
            }
        } else {
            Check::Missing(format!(
                "Not Found ({} is required)",
                layout.examples_dir.display()
            ))
        },
    ));

    checks.push((
        "build dir",
        if !layout.build_dir.exists() {
            Check::Ok("Absent (will be created)".to_string())
        } else if layout.build_dir.is_dir() {
            Check::Ok("Present".to_string())
        } else {
            Check::Missing("Exists but is not a directory".to_string())
        },
    ));

    checks
}

/// Run the `runbuild doctor` command to diagnose setup issues
pub fn run_doctor(layout: &Layout, build: &BuildConfig) -> Result<()> {
    println!("{} Running Doctor...", "🚑".red());
    println!("-------------------------------");

    print!("Checking OS... ");
    println!(
        "{} ({})",
        std::env::consts::OS.green(),
        std::env::consts::ARCH.cyan()
    );
    print!("Checking CPUs... ");
    println!("{}", default_jobs().to_string().green());

    check_tool(&build.configure).print(&build.configure);
    check_tool(&build.compile).print(&build.compile);

    for (label, check) in check_layout(layout) {
        check.print(label);
    }

    Ok(())
}
