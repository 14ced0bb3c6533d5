//! # runbuild CLI Entry Point
//!
//! With no arguments, runs the whole pipeline from the current directory:
//! create `build/`, configure, compile, then run every example binary.
//!
//! By default the process exits 0 even when steps or examples fail; the
//! summary shows what went wrong. `--strict` turns any failure into exit 1.

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use colored::*;
use std::path::PathBuf;

use runbuild::build::{self, Pipeline, PipelineOptions};
use runbuild::commands;
use runbuild::config::{self, RunConfig};

#[derive(Parser)]
#[command(name = "runbuild")]
#[command(about = "Configure, compile and smoke-test a CMake project's examples", version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    run: RunArgs,

    /// Read configuration from this file instead of ./runbuild.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

/// Flags shared by a single run and `watch`.
#[derive(Args)]
struct PipelineArgs {
    /// Parallel compile jobs [default: logical CPU count]
    #[arg(short, long)]
    jobs: Option<usize>,
    /// Only run examples whose name contains this string
    #[arg(long)]
    filter: Option<String>,
    /// Print what would be executed without running anything
    #[arg(long)]
    dry_run: bool,
    /// Show full command lines
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Args)]
struct RunArgs {
    #[command(flatten)]
    pipeline: PipelineArgs,
    /// Exit with status 1 if any build step or example fails
    #[arg(long)]
    strict: bool,
    /// Write a JSON run report to this file
    #[arg(long)]
    report: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check build tools and project layout
    Doctor,
    /// Remove the build directory
    Clean,
    /// Rerun the pipeline whenever sources or examples change
    Watch {
        #[command(flatten)]
        run: PipelineArgs,
    },
    /// Generate shell completion scripts
    Completion { shell: Shell },
}

impl PipelineArgs {
    fn options(&self) -> PipelineOptions {
        PipelineOptions {
            jobs: self.jobs,
            filter: self.filter.clone(),
            verbose: self.verbose,
            dry_run: self.dry_run,
        }
    }
}

fn load(cli: &Cli, root: &std::path::Path) -> Result<RunConfig> {
    match &cli.config {
        Some(path) => config::load_config_file(path),
        None => config::load_config(root),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let root = std::env::current_dir()?;

    match &cli.command {
        None => {
            let config = load(&cli, &root)?;
            let strict = cli.run.strict || config.run.strict;
            let pipeline = Pipeline::new(&root, config, cli.run.pipeline.options());

            let report = pipeline.run()?;
            report.print_summary();

            if let Some(path) = &cli.run.report {
                report.write_json(path)?;
                println!("{} Report written to {}", "✓".green(), path.display());
            }

            if strict && report.has_failures() {
                std::process::exit(1);
            }
            Ok(())
        }

        Some(Commands::Doctor) => {
            let config = load(&cli, &root)?;
            let layout = build::Layout::new(&root, &config.layout);
            commands::doctor::run_doctor(&layout, &config.build)
        }

        Some(Commands::Clean) => {
            let config = load(&cli, &root)?;
            let layout = build::Layout::new(&root, &config.layout);
            build::clean(&layout).map(|_| ())
        }

        Some(Commands::Watch { run }) => {
            let config = load(&cli, &root)?;
            let paths = config.watch.paths.clone();
            let pipeline = Pipeline::new(&root, config, run.options());
            build::watch(&pipeline, &paths)
        }

        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let bin_name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, bin_name, &mut std::io::stdout());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_invocation_runs_pipeline() {
        let cli = Cli::try_parse_from(["runbuild"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.run.strict);
        assert!(cli.run.pipeline.jobs.is_none());
    }

    #[test]
    fn test_run_flags() {
        let cli =
            Cli::try_parse_from(["runbuild", "--strict", "-j", "4", "--report", "r.json"]).unwrap();
        assert!(cli.run.strict);
        assert_eq!(cli.run.pipeline.jobs, Some(4));
        assert_eq!(cli.run.report, Some(PathBuf::from("r.json")));
    }

    #[test]
    fn test_watch_accepts_pipeline_flags() {
        let cli = Cli::try_parse_from(["runbuild", "watch", "--filter", "Basic", "-j", "2"]).unwrap();
        match cli.command {
            Some(Commands::Watch { run }) => {
                assert_eq!(run.filter.as_deref(), Some("Basic"));
                assert_eq!(run.jobs, Some(2));
            }
            _ => panic!("expected watch"),
        }
    }

    #[test]
    fn test_watch_rejects_single_run_flags() {
        assert!(Cli::try_parse_from(["runbuild", "watch", "--strict"]).is_err());
        assert!(Cli::try_parse_from(["runbuild", "watch", "--report", "r.json"]).is_err());
    }
}
