//! Workspace domain: host triggers, watch runtime, and report formatting.

mod format;
mod watch;

pub use format::{format_generation_report_text, format_sanitize_text};
pub use watch::{
    requires_regeneration, AssetChangeSet, ChangeEvent, EditorHooks, WatchConfig, WatchDaemon,
};
