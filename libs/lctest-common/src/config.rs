// Runner configuration for lctest
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "config/lctest.json";
pub const DEFAULT_PROGRESS_CAPTION: &str = "Submitting to LeetCode...";

pub const ENV_RUNTIME: &str = "LCTEST_RUNTIME";
pub const ENV_CLI_PATH: &str = "LCTEST_CLI_PATH";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LcTestConfig {
    /// Interpreter that runs the judge CLI (e.g. node)
    pub runtime: String,
    /// Path to the judge CLI entry point
    pub cli_path: String,
    pub progress_caption: String,
    /// Where result files are written
    pub results_dir: PathBuf,
    /// Output channel log
    pub log_file: PathBuf,
    /// Judge CLI session file; when set, signed-out users are skipped
    pub session_file: Option<PathBuf>,
}

impl Default for LcTestConfig {
    fn default() -> Self {
        Self {
            runtime: "node".to_string(),
            cli_path: "vsc-leetcode-cli/bin/leetcode".to_string(),
            progress_caption: DEFAULT_PROGRESS_CAPTION.to_string(),
            results_dir: PathBuf::from(".lctest"),
            log_file: PathBuf::from(".lctest/output.log"),
            session_file: None,
        }
    }
}

impl LcTestConfig {
    /// Load configuration from a JSON file; a missing file yields defaults
    pub fn load(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))
    }

    /// Load with default path (config/lctest.json)
    pub fn load_default() -> Result<Self> {
        Self::load(Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Save configuration as pretty JSON, creating parent directories
    pub fn save(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json_content = serde_json::to_string_pretty(self)
            .context("Failed to serialize lctest.json")?;

        fs::write(config_path, json_content)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;

        Ok(())
    }

    /// Apply LCTEST_RUNTIME / LCTEST_CLI_PATH from the process environment
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup; blank values are ignored
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(runtime) = non_blank(ENV_RUNTIME) {
            self.runtime = runtime;
        }
        if let Some(cli_path) = non_blank(ENV_CLI_PATH) {
            self.cli_path = cli_path;
        }
        self
    }

    pub fn result_file(&self) -> PathBuf {
        self.results_dir.join("test-result.txt")
    }
}
