use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use crate::core::{Result, SourceError};

/// How far back a never-scheduled source starts collecting.
pub const DEFAULT_DAYS_TO_GO_BACK: i64 = 7;

/// Day-bucket index name layout (`yyyyMMdd`).
pub const DEFAULT_INDEX_DATE_FORMAT: &str = "%Y%m%d";

/// Tuning for index name derivation
///
/// Usually left at its defaults; pipelines that want a different catch-up
/// window can load it from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulingConfig {
    /// Days subtracted from "now" when a source has no cursor yet
    pub days_to_go_back: i64,

    /// strftime layout of one day bucket
    pub index_date_format: String,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            days_to_go_back: DEFAULT_DAYS_TO_GO_BACK,
            index_date_format: DEFAULT_INDEX_DATE_FORMAT.to_string(),
        }
    }
}

impl SchedulingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the catch-up window for uninitialised cursors
    pub fn days_to_go_back(mut self, days: i64) -> Self {
        self.days_to_go_back = days;
        self
    }

    /// Set the day bucket layout
    pub fn index_date_format(mut self, format: &str) -> Self {
        self.index_date_format = format.to_string();
        self
    }

    /// Parse and validate a JSON document such as `{"days_to_go_back": 3}`.
    ///
    /// Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.index_date_format.is_empty() {
            return Err(SourceError::Configuration(
                "index_date_format must not be empty".into(),
            ));
        }
        if StrftimeItems::new(&self.index_date_format).any(|item| matches!(item, Item::Error)) {
            return Err(SourceError::Configuration(format!(
                "index_date_format '{}' is not a valid strftime layout",
                self.index_date_format
            )));
        }
        Ok(())
    }
}
