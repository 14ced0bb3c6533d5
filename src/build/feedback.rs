use super::invoke::StepStatus;
use super::layout::Layout;
use super::runner::CaseStatus;
use colored::*;

pub struct FeedbackAnalyzer;

impl FeedbackAnalyzer {
    /// Hint for a failed configure step.
    pub fn configure(status: &StepStatus, layout: &Layout, tool: &str) -> Option<String> {
        match status {
            StepStatus::NotStarted { .. } if !layout.build_dir.is_dir() => Some(format!(
                "{} exists but is not a directory.\nRemove it or point {} somewhere else.",
                layout.build_dir.display().to_string().bold().yellow(),
                "[layout] build_dir".bold().green()
            )),
            StepStatus::NotStarted { .. } => Some(format!(
                "Could not start {}.\nInstall it or set {} in runbuild.toml. Run {} for details.",
                tool.bold().yellow(),
                "[build] configure".bold().green(),
                "runbuild doctor".bold().green()
            )),
            StepStatus::Failed { .. } if !layout.root.join("CMakeLists.txt").exists() => {
                Some(format!(
                    "No {} found in {}.",
                    "CMakeLists.txt".bold().yellow(),
                    layout.root.display()
                ))
            }
            _ => None,
        }
    }

    /// Hint for a failed compile step.
    pub fn compile(status: &StepStatus, tool: &str) -> Option<String> {
        match status {
            StepStatus::NotStarted { .. } => Some(format!(
                "Could not start {}.\nInstall it or set {} in runbuild.toml.",
                tool.bold().yellow(),
                "[build] compile".bold().green()
            )),
            _ => None,
        }
    }

    /// Hint when every case binary is missing.
    pub fn cases(statuses: &[&CaseStatus], layout: &Layout) -> Option<String> {
        if !statuses.is_empty() && statuses.iter().all(|s| **s == CaseStatus::Missing) {
            return Some(format!(
                "None of the example binaries were found in {}.\nCheck that the build produced them, or set {}.",
                layout.binaries_dir.display().to_string().bold().yellow(),
                "[layout] binaries_dir".bold().green()
            ));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use std::fs;

    fn layout() -> (tempfile::TempDir, Layout) {
        let dir = tempfile::tempdir().unwrap();
        let layout = Layout::new(dir.path(), &LayoutConfig::default());
        (dir, layout)
    }

    #[test]
    fn test_missing_tool() {
        let (_dir, layout) = layout();
        fs::create_dir_all(&layout.build_dir).unwrap();
        let status = StepStatus::NotStarted {
            reason: "No such file or directory".into(),
        };
        let msg = FeedbackAnalyzer::configure(&status, &layout, "cmake").unwrap();
        assert!(msg.contains("Could not start"));
        assert!(msg.contains("runbuild doctor"));
    }

    #[test]
    fn test_build_dir_is_a_file() {
        let (_dir, layout) = layout();
        fs::write(&layout.build_dir, "").unwrap();
        let status = StepStatus::NotStarted {
            reason: "Not a directory".into(),
        };
        let msg = FeedbackAnalyzer::configure(&status, &layout, "cmake").unwrap();
        assert!(msg.contains("not a directory"));
    }

    #[test]
    fn test_missing_cmakelists() {
        let (_dir, layout) = layout();
        let msg =
            FeedbackAnalyzer::configure(&StepStatus::Failed { code: Some(1) }, &layout, "cmake")
                .unwrap();
        assert!(msg.contains("CMakeLists.txt"));
    }

    #[test]
    fn test_no_hint_on_success() {
        let (_dir, layout) = layout();
        assert!(FeedbackAnalyzer::configure(&StepStatus::Succeeded, &layout, "cmake").is_none());
        assert!(FeedbackAnalyzer::compile(&StepStatus::Skipped, "make").is_none());
    }

    #[test]
    fn test_all_missing_cases() {
        let (_dir, layout) = layout();
        let missing = CaseStatus::Missing;
        let passed = CaseStatus::Passed;
        assert!(FeedbackAnalyzer::cases(&[&missing, &missing], &layout).is_some());
        assert!(FeedbackAnalyzer::cases(&[&missing, &passed], &layout).is_none());
        assert!(FeedbackAnalyzer::cases(&[], &layout).is_none());
    }
}
