//! Rendering a log record as one readable sentence.

use chrono::{DateTime, Local};
use sift_types::{LogRecord, NULL_USER};

use crate::actions::ActionTable;
use crate::config::DisplayZone;

/// Identity printed when neither an email nor a user id is available.
pub const IDENTITY_NOT_FOUND: &str = "<identification number/email not found>";

/// `MM-DD-YYYY, HH:MM:SS`
const TIMESTAMP_FORMAT: &str = "%m-%d-%Y, %H:%M:%S";

/// Formats log records into event lines.
#[derive(Debug, Clone, Default)]
pub struct LineFormatter {
    actions: ActionTable,
    zone: DisplayZone,
}

impl LineFormatter {
    pub fn new(actions: ActionTable) -> Self {
        Self {
            actions,
            zone: DisplayZone::default(),
        }
    }

    pub fn with_zone(mut self, zone: DisplayZone) -> Self {
        self.zone = zone;
        self
    }

    /// Render a record as a newline-terminated event line.
    pub fn render(&self, record: &LogRecord) -> String {
        format!(
            "User {}, has {} to {} at {}, from IP {}, OS {}, userAgent {}. Server Response: {}\n",
            resolve_identity(record),
            record.data.status,
            self.actions.resolve(&record.meta.resource),
            format_timestamp(record.timestamp, self.zone),
            record.meta.dest_ip,
            record.meta.os,
            record.meta.user_agent,
            record.data.response,
        )
    }
}

/// Who performed the logged action.
///
/// Prefers the request's email, then the user id, then a placeholder.
pub fn resolve_identity(record: &LogRecord) -> &str {
    if let Some(email) = record.request_email() {
        return email;
    }

    match record.data.user_id.as_str() {
        "" | NULL_USER => IDENTITY_NOT_FOUND,
        user_id => user_id,
    }
}

/// Format epoch milliseconds as `MM-DD-YYYY, HH:MM:SS`.
///
/// Sub-second precision is dropped. Timestamps outside the representable
/// range are printed as the raw number.
pub fn format_timestamp(millis: i64, zone: DisplayZone) -> String {
    let Some(utc) = DateTime::from_timestamp(millis / 1000, 0) else {
        return millis.to_string();
    };

    match zone {
        DisplayZone::Utc => utc.format(TIMESTAMP_FORMAT).to_string(),
        DisplayZone::Local => utc.with_timezone(&Local).format(TIMESTAMP_FORMAT).to_string(),
    }
}
