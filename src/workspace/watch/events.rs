//! Watch events, batching, and configuration.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Watch mode configuration
#[derive(Debug, Clone)]
pub struct WatchConfig {
    /// Directory being watched (the asset root)
    pub root: PathBuf,
    /// Generated file; changes to it never trigger a run
    pub output: PathBuf,
    /// Quiet period after the last event before a batch is processed
    pub debounce_ms: u64,
    /// Poll interval of the event loop
    pub batch_window_ms: u64,
    /// Batch is processed immediately once this many paths are pending
    pub max_batch_size: usize,
    /// File name suffixes whose events are dropped
    pub ignore_suffixes: Vec<String>,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("Assets/Resources"),
            output: PathBuf::from("Assets/_App/Scripts/Data/ResourcesData.cs"),
            debounce_ms: 100,
            batch_window_ms: 250,
            max_batch_size: 500,
            ignore_suffixes: vec![
                ".meta".to_string(),
                ".tmp".to_string(),
                ".swp".to_string(),
                "~".to_string(),
                ".DS_Store".to_string(),
            ],
        }
    }
}

/// Filesystem change event
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChangeEvent {
    Created(PathBuf),
    Modified(PathBuf),
    Removed(PathBuf),
    Renamed { from: PathBuf, to: PathBuf },
}

impl ChangeEvent {
    /// Path the event ends up at.
    pub fn path(&self) -> &Path {
        match self {
            ChangeEvent::Created(p) | ChangeEvent::Modified(p) | ChangeEvent::Removed(p) => p,
            ChangeEvent::Renamed { to, .. } => to,
        }
    }
}

/// Asset changes reported by the editor after an import pass.
///
/// Paths are project-relative (`Assets/Resources/...`), separated by `/`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetChangeSet {
    pub imported: Vec<String>,
    pub deleted: Vec<String>,
    pub moved: Vec<String>,
    pub moved_from: Vec<String>,
}

impl AssetChangeSet {
    pub fn is_empty(&self) -> bool {
        self.imported.is_empty()
            && self.deleted.is_empty()
            && self.moved.is_empty()
            && self.moved_from.is_empty()
    }
}

/// True when any imported, deleted or moved path lies under `watch_prefix`.
///
/// `moved_from` is not consulted: a move always lists its destination in `moved`.
pub fn requires_regeneration(changes: &AssetChangeSet, watch_prefix: &str) -> bool {
    let prefix = watch_prefix.replace('\\', "/");
    changes
        .imported
        .iter()
        .chain(&changes.deleted)
        .chain(&changes.moved)
        .any(|path| path.replace('\\', "/").starts_with(&prefix))
}

/// Event batcher for grouping and debouncing events
pub(crate) struct EventBatcher {
    config: WatchConfig,
    pending_events: BTreeMap<PathBuf, ChangeEvent>,
    last_event_time: Option<Instant>,
}

impl EventBatcher {
    pub(crate) fn new(config: WatchConfig) -> Self {
        Self {
            config,
            pending_events: BTreeMap::new(),
            last_event_time: None,
        }
    }

    /// Queue an event. Returns false when the event is ignored.
    pub(crate) fn add_event(&mut self, event: ChangeEvent, now: Instant) -> bool {
        if self.should_ignore(&event) {
            return false;
        }
        self.pending_events.insert(event.path().to_path_buf(), event);
        self.last_event_time = Some(now);
        true
    }

    /// A batch is ready once events stop arriving for the debounce window, or when the
    /// batch is full.
    pub(crate) fn is_ready(&self, now: Instant) -> bool {
        if self.pending_events.is_empty() {
            return false;
        }
        if self.pending_events.len() >= self.config.max_batch_size {
            return true;
        }
        let debounce_window = Duration::from_millis(self.config.debounce_ms);
        self.last_event_time
            .map(|last| now.duration_since(last) >= debounce_window)
            .unwrap_or(true)
    }

    pub(crate) fn take_batch(&mut self) -> Vec<ChangeEvent> {
        self.last_event_time = None;
        std::mem::take(&mut self.pending_events)
            .into_values()
            .collect()
    }

    fn should_ignore(&self, event: &ChangeEvent) -> bool {
        if let ChangeEvent::Renamed { from, to } = event {
            return self.ignores_path(from) && self.ignores_path(to);
        }
        self.ignores_path(event.path())
    }

    fn ignores_path(&self, path: &Path) -> bool {
        if path == self.config.output {
            return true;
        }
        let name = match path.file_name() {
            Some(name) => name.to_string_lossy(),
            None => return true,
        };
        if name.starts_with(".tmp") {
            return true;
        }
        self.config
            .ignore_suffixes
            .iter()
            .any(|suffix| name.ends_with(suffix.as_str()))
    }
}
