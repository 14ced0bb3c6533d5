use super::cases::Case;
use super::layout::Layout;
use colored::*;
use serde::Serialize;
use std::io::{self, Write};
use std::process::Command;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CaseStatus {
    Passed,
    Failed { code: Option<i32> },
    /// No binary at the expected path.
    Missing,
    ExecError { reason: String },
}

impl CaseStatus {
    pub fn is_failure(&self) -> bool {
        !matches!(self, Self::Passed)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CaseOutcome {
    pub name: String,
    #[serde(flatten)]
    pub status: CaseStatus,
    #[serde(serialize_with = "as_millis")]
    pub elapsed: Duration,
}

fn as_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(d.as_millis() as u64)
}

/// Run every case binary in order. Failures are recorded, never fatal.
pub fn run_cases(layout: &Layout, cases: &[Case], dry_run: bool) -> Vec<CaseOutcome> {
    if cases.is_empty() {
        println!("{} No example cases found.", "!".yellow());
        return Vec::new();
    }

    println!("{} Running {} example(s)...", "▶".green(), cases.len());
    let mut outcomes = Vec::with_capacity(cases.len());

    for case in cases {
        let bin = layout.binary_for(case.stem());

        if dry_run {
            println!("   {} Would execute: {}", "~".dimmed(), bin.display());
            continue;
        }

        print!("   RUN {} ... ", case.name().bold());
        io::stdout().flush().ok();

        let start = Instant::now();
        let status = if !bin.is_file() {
            CaseStatus::Missing
        } else {
            match Command::new(&bin).current_dir(&layout.binaries_dir).status() {
                Ok(s) if s.success() => CaseStatus::Passed,
                Ok(s) => CaseStatus::Failed { code: s.code() },
                Err(e) => CaseStatus::ExecError {
                    reason: e.to_string(),
                },
            }
        };
        let elapsed = start.elapsed();

        match &status {
            CaseStatus::Passed => println!("{} ({:.2?})", "PASS".green(), elapsed),
            CaseStatus::Failed { code: Some(code) } => {
                println!("{} (exit {})", "FAIL".red(), code)
            }
            CaseStatus::Failed { code: None } => println!("{} (signal)", "FAIL".red()),
            CaseStatus::Missing => println!("{}", "MISSING".yellow()),
            CaseStatus::ExecError { reason } => println!("{} ({})", "EXEC FAIL".red(), reason),
        }

        outcomes.push(CaseOutcome {
            name: case.name().into_owned(),
            status,
            elapsed,
        });
    }

    outcomes
}
