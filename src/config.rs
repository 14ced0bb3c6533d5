use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const CONFIG_FILE: &str = "runbuild.toml";

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct RunConfig {
    pub layout: LayoutConfig,
    pub build: BuildConfig,
    pub run: RunOptions,
    pub watch: WatchConfig,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct LayoutConfig {
    pub build_dir: String,
    pub examples_dir: String,
    /// Defaults to `<build_dir>/examples`.
    pub binaries_dir: Option<String>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            build_dir: "build".to_string(),
            examples_dir: "examples".to_string(),
            binaries_dir: None,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct BuildConfig {
    pub configure: String,
    pub configure_args: Vec<String>,
    pub compile: String,
    pub compile_args: Vec<String>,
    pub jobs: Option<usize>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            configure: "cmake".to_string(),
            configure_args: Vec::new(),
            compile: "make".to_string(),
            compile_args: Vec::new(),
            jobs: None,
        }
    }
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct RunOptions {
    pub strict: bool,
    pub filter: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct WatchConfig {
    pub paths: Vec<String>,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            paths: default_watch_paths(),
        }
    }
}

fn default_watch_paths() -> Vec<String> {
    ["examples", "include", "src", "CMakeLists.txt"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Load `runbuild.toml` from `root`. A missing file yields the defaults.
pub fn load_config(root: &Path) -> Result<RunConfig> {
    let path = root.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(RunConfig::default());
    }
    load_config_file(&path)
}

/// Load an explicitly named config file. Unlike [`load_config`], a missing file is an error.
pub fn load_config_file(path: &Path) -> Result<RunConfig> {
    let config_str = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    toml::from_str(&config_str).with_context(|| {
        format!(
            "Failed to parse {} - check for syntax errors (missing quotes, brackets)",
            path.display()
        )
    })
}
