//! Configure and compile through the external build tool.
//!
//! Each step is an explicit argv run with `current_dir(build_dir)`. The exit
//! status is captured and returned; it never aborts the pipeline.

use super::layout::Layout;
use crate::config::BuildConfig;
use colored::*;
use serde::Serialize;
use std::fmt;
use std::process::Command;

#[derive(Debug, Clone, Default)]
pub struct InvokeOptions {
    pub verbose: bool,
    pub dry_run: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepStatus {
    Succeeded,
    Failed { code: Option<i32> },
    /// The tool could not be spawned at all.
    NotStarted { reason: String },
    Skipped,
}

impl StepStatus {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. } | Self::NotStarted { .. })
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Succeeded => write!(f, "ok"),
            Self::Failed { code: Some(code) } => write!(f, "failed (exit {})", code),
            Self::Failed { code: None } => write!(f, "failed (terminated by signal)"),
            Self::NotStarted { reason } => write!(f, "not started ({})", reason),
            Self::Skipped => write!(f, "skipped"),
        }
    }
}

/// Logical CPU count, or 1 when it cannot be determined.
pub fn default_jobs() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// `cmake <root>` from inside the build directory.
pub fn configure(layout: &Layout, cfg: &BuildConfig, opts: &InvokeOptions) -> StepStatus {
    let mut cmd = Command::new(&cfg.configure);
    cmd.args(&cfg.configure_args)
        .arg(&layout.root)
        .current_dir(&layout.build_dir);
    run_step("Configuring", cmd, opts)
}

/// `make -j <jobs>` from inside the build directory.
pub fn compile(
    layout: &Layout,
    cfg: &BuildConfig,
    jobs: usize,
    opts: &InvokeOptions,
) -> StepStatus {
    let mut cmd = Command::new(&cfg.compile);
    cmd.arg("-j")
        .arg(jobs.to_string())
        .args(&cfg.compile_args)
        .current_dir(&layout.build_dir);
    run_step("Compiling", cmd, opts)
}

pub fn command_line(cmd: &Command) -> String {
    let mut parts = vec![cmd.get_program().to_string_lossy().into_owned()];
    parts.extend(cmd.get_args().map(|a| a.to_string_lossy().into_owned()));
    parts.join(" ")
}

fn run_step(label: &str, mut cmd: Command, opts: &InvokeOptions) -> StepStatus {
    let line = command_line(&cmd);

    if opts.dry_run {
        println!("   {} Would execute: {}", "~".dimmed(), line);
        return StepStatus::Skipped;
    }

    println!("{} {}...", "⚙".cyan(), label);
    if opts.verbose {
        let dir = cmd
            .get_current_dir()
            .map(|d| d.display().to_string())
            .unwrap_or_default();
        println!("   {} {} (in {})", "$".dimmed(), line, dir);
    }

    let status = match cmd.status() {
        Ok(status) if status.success() => StepStatus::Succeeded,
        Ok(status) => StepStatus::Failed {
            code: status.code(),
        },
        Err(e) => StepStatus::NotStarted {
            reason: e.to_string(),
        },
    };

    match &status {
        StepStatus::Succeeded => println!("   {} {} finished", "✓".green(), label),
        other => println!("   {} {} {}", "x".red(), label, other),
    }
    status
}
