//! User settings for fintrack
//!
//! Manages user preferences such as the currency symbol, display date format
//! and the delimiter used for the data and report files.

use serde::{Deserialize, Serialize};

use super::paths::FinPaths;
use crate::error::FinError;

/// User settings for fintrack
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used in terminal output
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format for terminal output (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Field delimiter for the transactions file and report exports
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

/// Newest settings layout this build understands
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

fn default_schema_version() -> u32 {
    CURRENT_SCHEMA_VERSION
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_delimiter() -> char {
    ';'
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            delimiter: default_delimiter(),
        }
    }
}

impl Settings {
    /// The delimiter as a single byte, as the csv crate expects
    ///
    /// Tab or ASCII punctuation only. Quotes and characters that appear inside
    /// amounts and dates are rejected.
    pub fn delimiter_byte(&self) -> Result<u8, FinError> {
        let c = self.delimiter;
        let usable = c == '\t' || (c.is_ascii_punctuation() && !matches!(c, '"' | '.' | '-' | ':'));
        if usable {
            Ok(c as u8)
        } else {
            Err(FinError::Config(format!(
                "Unusable delimiter {:?}: use a tab or a punctuation character such as ';' or ','",
                c
            )))
        }
    }

    /// Check values that would otherwise fail later
    pub fn validate(&self) -> Result<(), FinError> {
        if self.schema_version > CURRENT_SCHEMA_VERSION {
            return Err(FinError::Config(format!(
                "Settings schema version {} is newer than supported version {}",
                self.schema_version, CURRENT_SCHEMA_VERSION
            )));
        }
        self.delimiter_byte()?;
        Ok(())
    }

    /// Load settings from disk, or use defaults if the file doesn't exist
    pub fn load_or_create(paths: &FinPaths) -> Result<Self, FinError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| FinError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents)
                .map_err(|e| FinError::Config(format!("Failed to parse settings file: {}", e)))?;
            settings.validate()?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FinPaths) -> Result<(), FinError> {
        self.validate()?;
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| FinError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| FinError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
