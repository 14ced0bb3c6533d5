//! The fixed build-and-smoke-test pipeline.
//!
//! ensure build dir -> configure -> compile -> discover cases -> run cases
//!
//! Steps always run in this order. Failed configure, compile or case runs are
//! recorded in the [`RunReport`] and never stop the pipeline; whether they
//! affect the exit code is up to the caller (see `RunReport::has_failures`).

use super::cases::{self, Case};
use super::feedback::FeedbackAnalyzer;
use super::invoke::{self, InvokeOptions, StepStatus};
use super::layout::{self, Layout};
use super::runner::{self, CaseOutcome};
use crate::config::RunConfig;
use crate::ui;
use anyhow::{Context, Result};
use colored::*;
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::time::Instant;

#[derive(Debug, Clone, Default)]
pub struct PipelineOptions {
    /// Overrides `[build] jobs` and the CPU count.
    pub jobs: Option<usize>,
    /// Overrides `[run] filter`.
    pub filter: Option<String>,
    pub verbose: bool,
    pub dry_run: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub jobs: usize,
    pub configure: StepStatus,
    pub compile: StepStatus,
    pub cases: Vec<CaseOutcome>,
}

impl RunReport {
    pub fn passed(&self) -> usize {
        self.cases.iter().filter(|c| !c.status.is_failure()).count()
    }

    pub fn failed(&self) -> usize {
        self.cases.len() - self.passed()
    }

    /// Any failed build step or case.
    pub fn has_failures(&self) -> bool {
        self.configure.is_failure() || self.compile.is_failure() || self.failed() > 0
    }

    pub fn print_summary(&self) {
        println!();
        let mut table = ui::Table::new(&["Step", "Result"]);
        table.add_row(vec!["configure".to_string(), colorize(&self.configure)]);
        table.add_row(vec![
            format!("compile (-j {})", self.jobs),
            colorize(&self.compile),
        ]);
        let cases = format!("{}/{} passed", self.passed(), self.cases.len());
        let cases = if self.failed() > 0 {
            cases.red().to_string()
        } else {
            cases.green().to_string()
        };
        table.add_row(vec!["examples".to_string(), cases]);
        table.print();

        if self.cases.is_empty() {
            return;
        }
        if self.failed() == 0 {
            println!("{}", "ALL EXAMPLES PASSED ✨".green().bold());
        } else {
            println!("{}", "SOME EXAMPLES FAILED 💀".red().bold());
        }
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write report to {}", path.display()))
    }
}

fn colorize(status: &StepStatus) -> String {
    match status {
        StepStatus::Succeeded => status.to_string().green().to_string(),
        StepStatus::Skipped => status.to_string().dimmed().to_string(),
        _ => status.to_string().red().to_string(),
    }
}

pub struct Pipeline {
    layout: Layout,
    config: RunConfig,
    options: PipelineOptions,
}

impl Pipeline {
    pub fn new(root: &Path, config: RunConfig, options: PipelineOptions) -> Self {
        Self {
            layout: Layout::new(root, &config.layout),
            config,
            options,
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn jobs(&self) -> usize {
        self.options
            .jobs
            .or(self.config.build.jobs)
            .filter(|&n| n > 0)
            .unwrap_or_else(invoke::default_jobs)
    }

    fn filter(&self) -> Option<&str> {
        self.options
            .filter
            .as_deref()
            .or(self.config.run.filter.as_deref())
    }

    pub fn run(&self) -> Result<RunReport> {
        let start = Instant::now();
        let build = &self.config.build;
        let invoke_opts = InvokeOptions {
            verbose: self.options.verbose,
            dry_run: self.options.dry_run,
        };

        // 1. Build directory
        if self.options.dry_run {
            println!(
                "   {} Would create: {}",
                "~".dimmed(),
                self.layout.build_dir.display()
            );
        } else {
            layout::ensure_dir(&self.layout.build_dir)?;
        }

        // 2. Configure + compile
        let configure = invoke::configure(&self.layout, build, &invoke_opts);
        if let Some(hint) = FeedbackAnalyzer::configure(&configure, &self.layout, &build.configure)
        {
            println!("   {} {}", "💡".yellow(), hint);
        }

        let jobs = self.jobs();
        let compile = invoke::compile(&self.layout, build, jobs, &invoke_opts);
        if let Some(hint) = FeedbackAnalyzer::compile(&compile, &build.compile) {
            println!("   {} {}", "💡".yellow(), hint);
        }

        // 3. Discover
        let discovered = cases::discover_cases(&self.layout.examples_dir)?;
        let selected: Vec<Case> = cases::filter_cases(discovered, self.filter());

        // 4. Execute
        let outcomes = runner::run_cases(&self.layout, &selected, self.options.dry_run);
        let statuses: Vec<_> = outcomes.iter().map(|o| &o.status).collect();
        if let Some(hint) = FeedbackAnalyzer::cases(&statuses, &self.layout) {
            println!("   {} {}", "💡".yellow(), hint);
        }

        if self.options.verbose {
            println!("   Pipeline finished in {:.2?}", start.elapsed());
        }

        Ok(RunReport {
            jobs,
            configure,
            compile,
            cases: outcomes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::runner::CaseStatus;
    use crate::config::BuildConfig;
    use std::time::Duration;

    fn missing_tools() -> RunConfig {
        RunConfig {
            build: BuildConfig {
                configure: "runbuild-no-such-configure".into(),
                compile: "runbuild-no-such-compile".into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_examples_creates_build_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("examples")).unwrap();

        let pipeline = Pipeline::new(dir.path(), missing_tools(), PipelineOptions::default());
        let report = pipeline.run().unwrap();

        assert!(dir.path().join("build").is_dir());
        assert!(report.cases.is_empty());
        assert!(matches!(report.configure, StepStatus::NotStarted { .. }));
        assert!(report.has_failures());
    }

    #[test]
    fn test_missing_examples_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = Pipeline::new(dir.path(), missing_tools(), PipelineOptions::default());
        assert!(pipeline.run().is_err());
        // The build directory was still created before discovery failed.
        assert!(dir.path().join("build").is_dir());
    }

    #[test]
    fn test_missing_binaries_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("examples")).unwrap();
        fs::write(dir.path().join("examples").join("Basic.cxx"), "").unwrap();
        fs::write(dir.path().join("examples").join("Dijkstra.cxx"), "").unwrap();

        let report = Pipeline::new(dir.path(), missing_tools(), PipelineOptions::default())
            .run()
            .unwrap();
        assert_eq!(report.cases.len(), 2);
        assert!(report.cases.iter().all(|c| c.status == CaseStatus::Missing));
        assert_eq!(report.failed(), 2);
    }

    #[test]
    fn test_filter_option_wins_over_config() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("examples")).unwrap();
        fs::write(dir.path().join("examples").join("Basic.cxx"), "").unwrap();
        fs::write(dir.path().join("examples").join("Dijkstra.cxx"), "").unwrap();

        let mut config = missing_tools();
        config.run.filter = Some("Basic".into());
        let options = PipelineOptions {
            filter: Some("Dijk".into()),
            ..Default::default()
        };
        let report = Pipeline::new(dir.path(), config, options).run().unwrap();
        let names: Vec<&str> = report.cases.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Dijkstra"]);
    }

    #[test]
    fn test_dry_run_touches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("examples")).unwrap();
        fs::write(dir.path().join("examples").join("Basic.cxx"), "").unwrap();

        let options = PipelineOptions {
            dry_run: true,
            ..Default::default()
        };
        let report = Pipeline::new(dir.path(), missing_tools(), options)
            .run()
            .unwrap();
        assert!(!dir.path().join("build").exists());
        assert_eq!(report.configure, StepStatus::Skipped);
        assert_eq!(report.compile, StepStatus::Skipped);
        assert!(report.cases.is_empty());
        assert!(!report.has_failures());
    }

    #[test]
    fn test_jobs_precedence() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = RunConfig::default();
        config.build.jobs = Some(3);

        let pipeline = Pipeline::new(dir.path(), config.clone(), PipelineOptions::default());
        assert_eq!(pipeline.jobs(), 3);

        let options = PipelineOptions {
            jobs: Some(7),
            ..Default::default()
        };
        assert_eq!(Pipeline::new(dir.path(), config, options).jobs(), 7);

        let pipeline = Pipeline::new(dir.path(), RunConfig::default(), PipelineOptions::default());
        assert_eq!(pipeline.jobs(), invoke::default_jobs());
    }

    #[test]
    fn test_report_counts_and_json() {
        let dir = tempfile::tempdir().unwrap();
        let report = RunReport {
            jobs: 4,
            configure: StepStatus::Succeeded,
            compile: StepStatus::Succeeded,
            cases: vec![
                CaseOutcome {
                    name: "a".into(),
                    status: CaseStatus::Passed,
                    elapsed: Duration::from_millis(5),
                },
                CaseOutcome {
                    name: "b".into(),
                    status: CaseStatus::Failed { code: Some(1) },
                    elapsed: Duration::from_millis(7),
                },
            ],
        };
        assert_eq!(report.passed(), 1);
        assert_eq!(report.failed(), 1);
        assert!(report.has_failures());

        let path = dir.path().join("report.json");
        report.write_json(&path).unwrap();
        let v: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(v["jobs"], 4);
        assert_eq!(v["configure"]["status"], "succeeded");
        assert_eq!(v["cases"][1]["status"], "failed");
    }
}
