//! Watch daemon and runtime logic.

use super::events::{ChangeEvent, EventBatcher, WatchConfig};
use crate::error::GenError;
use crate::generator::{GenerationReport, Generator};
use notify::event::{ModifyKind, RenameMode};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use parking_lot::RwLock;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Watch mode daemon: regenerates once per settled batch of changes under the root.
pub struct WatchDaemon {
    generator: Generator,
    config: WatchConfig,
    running: Arc<RwLock<bool>>,
}

impl WatchDaemon {
    /// Create a new watch daemon
    pub fn new(generator: Generator, config: WatchConfig) -> Self {
        Self {
            generator,
            config,
            running: Arc::new(RwLock::new(false)),
        }
    }

    /// Shared flag; setting it to false makes `start` return after the current poll.
    pub fn running_handle(&self) -> Arc<RwLock<bool>> {
        Arc::clone(&self.running)
    }

    /// Run an initial generation, then watch until stopped or the watcher disconnects.
    pub fn start(&self) -> Result<(), GenError> {
        *self.running.write() = true;

        info!(root = %self.config.root.display(), "Running initial generation");
        self.generator.run()?;

        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            if let Err(e) = tx.send(res) {
                error!("Error sending watch event: {}", e);
            }
        })
        .map_err(|e| GenError::WatchError(format!("Failed to create watcher: {}", e)))?;

        watcher
            .watch(&self.config.root, RecursiveMode::Recursive)
            .map_err(|e| GenError::WatchError(format!("Failed to watch directory: {}", e)))?;

        info!(root = %self.config.root.display(), "Watching asset root");

        let mut batcher = EventBatcher::new(self.config.clone());
        let poll = Duration::from_millis(self.config.batch_window_ms.max(1));

        while *self.running.read() {
            match rx.recv_timeout(poll) {
                Ok(Ok(event)) => {
                    let now = Instant::now();
                    for change in convert_event(event) {
                        batcher.add_event(change, now);
                    }
                }
                Ok(Err(e)) => {
                    warn!("Watch error: {}", e);
                }
                Err(mpsc::RecvTimeoutError::Timeout) => {}
                Err(mpsc::RecvTimeoutError::Disconnected) => {
                    error!("Watcher channel disconnected");
                    break;
                }
            }

            if batcher.is_ready(Instant::now()) {
                self.process_events(batcher.take_batch())?;
            }
        }

        Ok(())
    }

    /// Stop the watch daemon
    pub fn stop(&self) {
        *self.running.write() = false;
    }

    /// Regenerate for one batch. Empty batches are a no-op.
    pub(crate) fn process_events(
        &self,
        events: Vec<ChangeEvent>,
    ) -> Result<Option<GenerationReport>, GenError> {
        if events.is_empty() {
            return Ok(None);
        }
        for event in &events {
            debug!(?event, "Asset change");
        }
        info!(changes = events.len(), "Regenerating after asset changes");
        self.generator.run().map(Some)
    }
}

/// Translate a notify event into change events, one per affected path.
pub(crate) fn convert_event(event: Event) -> Vec<ChangeEvent> {
    match event.kind {
        EventKind::Create(_) => event.paths.into_iter().map(ChangeEvent::Created).collect(),
        EventKind::Remove(_) => event.paths.into_iter().map(ChangeEvent::Removed).collect(),
        EventKind::Modify(ModifyKind::Name(RenameMode::Both)) if event.paths.len() == 2 => {
            let mut paths = event.paths.into_iter();
            match (paths.next(), paths.next()) {
                (Some(from), Some(to)) => vec![ChangeEvent::Renamed { from, to }],
                _ => Vec::new(),
            }
        }
        EventKind::Modify(ModifyKind::Name(RenameMode::From)) => {
            event.paths.into_iter().map(ChangeEvent::Removed).collect()
        }
        EventKind::Modify(ModifyKind::Name(RenameMode::To)) => {
            event.paths.into_iter().map(ChangeEvent::Created).collect()
        }
        EventKind::Modify(_) | EventKind::Any => {
            event.paths.into_iter().map(ChangeEvent::Modified).collect()
        }
        EventKind::Access(_) | EventKind::Other => Vec::new(),
    }
}
