//! sift-render - turns persisted logs into readable events.
//!
//! Walks the `<logs>/<userId>/<file>` tree written by a search run and, for
//! every log, writes one sentence describing it to
//! `<events>/<userId>/<file>.txt` and appends the same sentence to
//! `<out>/<userId>.csv`.
//!
//! # Example
//!
//! ```ignore
//! use sift_render::{ActionTable, LineFormatter, RenderConfig, Renderer};
//!
//! let formatter = LineFormatter::new(ActionTable::default());
//! let renderer = Renderer::new(RenderConfig::new(), formatter);
//! let summary = renderer.run()?;
//! eprintln!("Rendered {} logs for {} users", summary.files_rendered, summary.users);
//! ```

pub mod actions;
pub mod config;
pub mod format;
pub mod renderer;
pub mod stats;

pub use actions::{ActionTable, UNKNOWN_ACTION};
pub use config::{DisplayZone, RenderConfig};
pub use format::{IDENTITY_NOT_FOUND, LineFormatter, format_timestamp, resolve_identity};
pub use renderer::Renderer;
pub use stats::RenderSummary;
