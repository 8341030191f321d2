use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::{Result, TabulaError};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_REPORT_DELAY_MS: u64 = 2000;
const DEFAULT_LOGIN_DELAY_MS: u64 = 2000;
const DEFAULT_LINE_WIDTH: usize = 100;

/// Configuration for the console, stored as config.json in the platform
/// config directory (overridable with TABULA_CONFIG_DIR).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Simulated report generation time, in milliseconds
    #[serde(default = "default_report_delay_ms")]
    pub report_delay_ms: u64,

    /// Simulated login round-trip time, in milliseconds
    #[serde(default = "default_login_delay_ms")]
    pub login_delay_ms: u64,

    /// Width tables are fitted to
    #[serde(default = "default_line_width")]
    pub line_width: usize,
}

fn default_report_delay_ms() -> u64 {
    DEFAULT_REPORT_DELAY_MS
}

fn default_login_delay_ms() -> u64 {
    DEFAULT_LOGIN_DELAY_MS
}

fn default_line_width() -> usize {
    DEFAULT_LINE_WIDTH
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            report_delay_ms: DEFAULT_REPORT_DELAY_MS,
            login_delay_ms: DEFAULT_LOGIN_DELAY_MS,
            line_width: DEFAULT_LINE_WIDTH,
        }
    }
}

impl ConsoleConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(TabulaError::Io)?;
        let config: ConsoleConfig =
            serde_json::from_str(&content).map_err(TabulaError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(TabulaError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(TabulaError::Serialization)?;
        fs::write(config_path, content).map_err(TabulaError::Io)?;
        Ok(())
    }

    pub fn report_delay(&self) -> Duration {
        Duration::from_millis(self.report_delay_ms)
    }

    pub fn login_delay(&self) -> Duration {
        Duration::from_millis(self.login_delay_ms)
    }
}
