use super::pipeline::Pipeline;
use anyhow::Result;
use colored::*;
use notify::{Config, RecursiveMode, Watcher};
use std::path::PathBuf;
use std::sync::mpsc::channel;
use std::time::Duration;

/// Rerun the pipeline whenever one of `paths` (relative to the project root) changes.
pub fn watch(pipeline: &Pipeline, paths: &[String]) -> Result<()> {
    let root = &pipeline.layout().root;
    let targets: Vec<PathBuf> = paths
        .iter()
        .map(|p| root.join(p))
        .filter(|p| p.exists())
        .collect();

    if targets.is_empty() {
        anyhow::bail!("Nothing to watch: none of {:?} exist", paths);
    }

    let (tx, rx) = channel();
    let config_notify = Config::default().with_poll_interval(Duration::from_secs(1));
    let mut watcher = notify::RecommendedWatcher::new(tx, config_notify)?;
    for target in &targets {
        watcher.watch(target, RecursiveMode::Recursive)?;
    }
    println!("{} Watching {} path(s) for changes...", "👀".cyan(), targets.len());

    run_and_clear(pipeline, false);

    while rx.recv().is_ok() {
        // Debounce
        std::thread::sleep(Duration::from_millis(100));
        while rx.try_recv().is_ok() {}
        run_and_clear(pipeline, true);
    }
    Ok(())
}

fn run_and_clear(pipeline: &Pipeline, changed: bool) {
    if changed {
        print!("\x1B[2J\x1B[1;1H");
        println!("{} File changed. Rebuilding...", "🔄".yellow());
    }

    match pipeline.run() {
        Ok(report) => report.print_summary(),
        Err(e) => println!("{} Error: {:#}", "x".red(), e),
    }
}
