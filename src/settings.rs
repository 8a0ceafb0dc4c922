use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::cli::Cli;
use crate::consolidation::ConsolidationConfig;

const ENABLE_LOGS: bool = true;

use crate::log_info;

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_SETTINGS_FILE: &str = "homa-report.json";

/// What to do with a row whose subject id cannot be decoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedIdPolicy {
    /// Fail the whole run.
    #[default]
    Abort,
    /// Log the row and leave it out.
    Skip,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct Settings {
    pub input: PathBuf,
    pub output: PathBuf,
    pub worksheet: Option<String>,
    pub debug_dump: Option<PathBuf>,
    pub malformed_ids: MalformedIdPolicy,
    pub consolidation: ConsolidationConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input: PathBuf::from("./data.xlsx"),
            output: PathBuf::from("./consolidated-data.xlsx"),
            worksheet: None,
            debug_dump: None,
            malformed_ids: MalformedIdPolicy::Abort,
            consolidation: ConsolidationConfig::default(),
        }
    }
}

impl Settings {
    /// Loads settings from `path`. A missing file gives the defaults; a file
    /// that exists but does not parse is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        let settings: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse settings from {}", path.display()))?;

        log_info!("loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Resolves the settings file named on the command line (or the default
    /// one) and layers the remaining flags on top.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let path = cli
            .config
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE));
        let mut settings = Self::load(&path)?;
        settings.apply_overrides(cli);
        Ok(settings)
    }

    pub fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(input) = &cli.input {
            self.input = input.clone();
        }
        if let Some(output) = &cli.output {
            self.output = output.clone();
        }
        if let Some(worksheet) = &cli.worksheet {
            self.worksheet = Some(worksheet.clone());
        }
        if let Some(dump) = &cli.debug_dump {
            self.debug_dump = Some(dump.clone());
        }
        if cli.skip_malformed {
            self.malformed_ids = MalformedIdPolicy::Skip;
        }
    }
}
