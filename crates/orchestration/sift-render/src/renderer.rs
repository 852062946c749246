//! Sequential rendering of the persisted log tree.

use sift_error::{Result, StorageError};
use sift_types::{LogRecord, user_dir_name};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::RenderConfig;
use crate::format::LineFormatter;
use crate::stats::RenderSummary;

/// Renders every log under `<logs>/<userId>/` into event files.
///
/// For each log file the rendered line is written to
/// `<events>/<userId>/<file>.txt`, replacing any previous content, and
/// appended to `<out>/<userId>.csv`. The user directory is taken from the
/// decoded record, not from the directory the file was found in. Despite
/// its extension the `.csv` file holds the same free-text lines.
///
/// Any read or write failure ends the run. Logs that fail to decode are
/// rendered with default fields and reported as warnings.
pub struct Renderer {
    config: RenderConfig,
    formatter: LineFormatter,
}

impl Renderer {
    pub fn new(config: RenderConfig, formatter: LineFormatter) -> Self {
        Self { config, formatter }
    }

    /// Render the whole tree. Files are visited in name order.
    pub fn run(&self) -> Result<RenderSummary> {
        let mut summary = RenderSummary::new();

        info!(
            logs = %self.config.logs_dir.display(),
            events = %self.config.events_dir.display(),
            out = %self.config.out_dir.display(),
            "Starting render"
        );

        fs::create_dir_all(&self.config.out_dir)
            .map_err(|e| StorageError::create_dir(&self.config.out_dir, e))?;

        for user_dir in sorted_entries(&self.config.logs_dir)? {
            if !user_dir.is_dir() {
                debug!(path = %user_dir.display(), "Skipping non-directory entry");
                summary.record_skipped();
                continue;
            }

            for log_file in sorted_entries(&user_dir)? {
                if !log_file.is_file() {
                    debug!(path = %log_file.display(), "Skipping non-file entry");
                    summary.record_skipped();
                    continue;
                }

                self.render_file(&log_file, &mut summary)?;
            }
        }

        summary.complete();

        info!(
            files = summary.files_rendered,
            users = summary.users,
            warnings = summary.warnings.len(),
            "Render completed"
        );

        Ok(summary)
    }

    fn render_file(&self, path: &Path, summary: &mut RenderSummary) -> Result<()> {
        let content = fs::read(path).map_err(|e| StorageError::read(path, e))?;

        let decoded = LogRecord::decode(&content);
        if let Some(warning) = &decoded.warning {
            warn!(path = %path.display(), warning = %warning, "Rendering log with default fields");
            summary.record_warning(path.display(), warning);
        }

        let line = self.formatter.render(&decoded.record);
        let user_dir = user_dir_name(decoded.record.user_id());

        let events_dir = self.config.events_dir.join(&user_dir);
        fs::create_dir_all(&events_dir).map_err(|e| StorageError::create_dir(&events_dir, e))?;

        let mut event_name = path.file_name().unwrap_or(path.as_os_str()).to_os_string();
        event_name.push(".txt");
        let event_path = events_dir.join(event_name);
        fs::write(&event_path, &line).map_err(|e| StorageError::write(&event_path, e))?;

        let summary_path = self.config.out_dir.join(format!("{user_dir}.csv"));
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&summary_path)
            .and_then(|mut file| file.write_all(line.as_bytes()))
            .map_err(|e| StorageError::write(&summary_path, e))?;

        summary.record_rendered(&user_dir);
        debug!(path = %path.display(), user = %user_dir, "Rendered log");

        Ok(())
    }
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir)
        .and_then(|entries| {
            entries
                .map(|entry| entry.map(|e| e.path()))
                .collect::<std::io::Result<Vec<_>>>()
        })
        .map_err(|e| StorageError::read_dir(dir, e))?;

    entries.sort();
    Ok(entries)
}
