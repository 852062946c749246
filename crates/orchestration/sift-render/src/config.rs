//! Configuration types for a render run.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Time zone used when printing event timestamps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayZone {
    /// The host's local time zone
    #[default]
    Local,
    /// Coordinated Universal Time
    Utc,
}

/// Configuration for a render run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Root of the persisted logs, laid out as `<userId>/<file>`
    pub logs_dir: PathBuf,

    /// Root of the per-log event text files
    pub events_dir: PathBuf,

    /// Directory holding one summary file per user
    pub out_dir: PathBuf,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            logs_dir: PathBuf::from("logs"),
            events_dir: PathBuf::from("events"),
            out_dir: PathBuf::from("out"),
        }
    }
}

impl RenderConfig {
    /// Create a new render configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_logs_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.logs_dir = dir.into();
        self
    }

    pub fn with_events_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.events_dir = dir.into();
        self
    }

    pub fn with_out_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.out_dir = dir.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_config_defaults() {
        let config = RenderConfig::new();

        assert_eq!(config.logs_dir, PathBuf::from("logs"));
        assert_eq!(config.events_dir, PathBuf::from("events"));
        assert_eq!(config.out_dir, PathBuf::from("out"));
        assert_eq!(DisplayZone::default(), DisplayZone::Local);
    }

    #[test]
    fn test_render_config_builder() {
        let config = RenderConfig::new()
            .with_logs_dir("/data/logs")
            .with_events_dir("/data/events")
            .with_out_dir("/data/out");

        assert_eq!(config.logs_dir, PathBuf::from("/data/logs"));
        assert_eq!(config.events_dir, PathBuf::from("/data/events"));
        assert_eq!(config.out_dir, PathBuf::from("/data/out"));
    }
}
