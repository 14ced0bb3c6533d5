mod cases;
mod clean;
mod feedback;
mod invoke;
mod layout;
mod pipeline;
mod runner;
mod watcher;

pub use cases::{Case, discover_cases, filter_cases};
pub use clean::clean;
pub use feedback::FeedbackAnalyzer;
pub use invoke::{InvokeOptions, StepStatus, compile, configure, default_jobs};
pub use layout::{Layout, ensure_dir};
pub use pipeline::{Pipeline, PipelineOptions, RunReport};
pub use runner::{CaseOutcome, CaseStatus, run_cases};
pub use watcher::watch;
