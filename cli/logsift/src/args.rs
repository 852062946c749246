//! CLI argument definitions for logsift.

use clap::{Parser, ValueEnum};
use sift_render::DisplayZone;

/// Keyword search over an S3 bucket, and rendering of matched logs.
///
/// Without a mode argument, or with `translate`, the logs previously saved
/// under the logs directory are rendered into event files. Any other mode
/// argument searches the bucket and saves every object containing a keyword.
///
/// ## Examples
///
/// Search a bucket:
///   logsift search -b audit-logs --keywords keywords.csv
///
/// Search LocalStack:
///   logsift search -b audit-logs --s3-endpoint http://localhost:4566
///
/// Render the saved logs:
///   logsift translate --actions actions.csv --timezone utc
#[derive(Parser, Debug)]
#[command(name = "logsift")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Run mode: omit or `translate` to render, anything else to search
    pub mode: Option<String>,

    // === S3 Configuration ===
    /// S3 bucket name (required when searching)
    #[arg(short, long, env = "SIFT_S3_BUCKET")]
    pub bucket: Option<String>,

    /// Only list keys under this prefix
    #[arg(short, long, env = "SIFT_S3_PREFIX")]
    pub prefix: Option<String>,

    /// Custom S3 endpoint URL (for LocalStack)
    #[arg(long, env = "SIFT_S3_ENDPOINT")]
    pub s3_endpoint: Option<String>,

    /// AWS region
    #[arg(long, env = "AWS_REGION", default_value = "us-east-1")]
    pub region: String,

    /// AWS profile name
    #[arg(long, env = "AWS_PROFILE")]
    pub profile: Option<String>,

    // === Search Options ===
    /// Keyword file, one keyword per line
    #[arg(short, long, default_value = "keywords.csv")]
    pub keywords: String,

    /// Number of concurrent workers (default: 4 per CPU)
    #[arg(long, value_parser = parse_positive_usize)]
    pub workers: Option<usize>,

    /// Per-worker channel capacity (must be >= 1)
    #[arg(long, default_value = "64", value_parser = parse_positive_usize)]
    pub channel_buffer: usize,

    /// Keys requested per listing call (1-1000)
    #[arg(long, default_value = "1000", value_parser = parse_page_size)]
    pub page_size: usize,

    // === Directories ===
    /// Directory where matched logs are saved
    #[arg(long, default_value = "logs")]
    pub logs_dir: String,

    /// Directory for per-log event files
    #[arg(long, default_value = "events")]
    pub events_dir: String,

    /// Directory for per-user summary files
    #[arg(long, default_value = "out")]
    pub out_dir: String,

    // === Render Options ===
    /// CSV file with `pattern,action` columns (default: built-in table)
    #[arg(long)]
    pub actions: Option<String>,

    /// Time zone for event timestamps
    #[arg(long, value_enum, default_value = "local")]
    pub timezone: Timezone,

    // === Logging Options ===
    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Cli {
    pub fn run_mode(&self) -> Mode {
        Mode::resolve(self.mode.as_deref())
    }
}

/// What a run does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Search the bucket and save matches
    Search,
    /// Render saved logs into events
    Translate,
}

impl Mode {
    pub fn resolve(arg: Option<&str>) -> Self {
        match arg {
            None | Some("translate") => Mode::Translate,
            Some(_) => Mode::Search,
        }
    }
}

/// Time zone argument.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Timezone {
    /// Host local time
    Local,
    /// UTC
    Utc,
}

impl From<Timezone> for DisplayZone {
    fn from(zone: Timezone) -> Self {
        match zone {
            Timezone::Local => DisplayZone::Local,
            Timezone::Utc => DisplayZone::Utc,
        }
    }
}

/// Log level argument.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    /// Trace level (most verbose)
    Trace,
    /// Debug level
    Debug,
    /// Info level (default)
    Info,
    /// Warning level
    Warn,
    /// Error level (least verbose)
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

/// Parse a positive usize (>= 1).
fn parse_positive_usize(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if value < 1 {
        return Err(format!("{} is not in 1..", value));
    }
    Ok(value)
}

/// Parse a listing page size (1-1000).
fn parse_page_size(s: &str) -> Result<usize, String> {
    let value = parse_positive_usize(s)?;
    if value > 1000 {
        return Err(format!("{} is not in 1..=1000", value));
    }
    Ok(value)
}
