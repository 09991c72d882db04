//! Host asset index refresh
//!
//! After the output file is written the host environment (the editor) has to re-import
//! it. The refresher is injected so the pipeline runs without an editor attached.

use crate::error::GenError;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

/// Environment variable carrying the written file's path to the refresh command.
pub const OUTPUT_ENV: &str = "RESGEN_OUTPUT";

/// Asks the host to refresh its index after a write.
pub trait HostRefresher {
    fn refresh(&self, written: &Path) -> Result<(), GenError>;
}

/// Does nothing; used when no refresh command is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRefresher;

impl HostRefresher for NoopRefresher {
    fn refresh(&self, written: &Path) -> Result<(), GenError> {
        debug!(output = %written.display(), "No host refresh configured");
        Ok(())
    }
}

/// Runs an external command, e.g. an editor CLI that triggers a re-import.
///
/// The command runs in `working_dir` with [`OUTPUT_ENV`] set to the written path.
#[derive(Debug, Clone)]
pub struct CommandRefresher {
    argv: Vec<String>,
    working_dir: PathBuf,
}

impl CommandRefresher {
    /// Build a refresher from an argv list. Returns `None` for an empty list.
    pub fn new(argv: Vec<String>, working_dir: PathBuf) -> Option<Self> {
        if argv.is_empty() {
            return None;
        }
        Some(Self { argv, working_dir })
    }
}

impl HostRefresher for CommandRefresher {
    fn refresh(&self, written: &Path) -> Result<(), GenError> {
        let (program, args) = self
            .argv
            .split_first()
            .ok_or_else(|| GenError::RefreshError("empty refresh command".to_string()))?;

        info!(command = %self.argv.join(" "), "Refreshing host asset index");
        let status = Command::new(program)
            .args(args)
            .current_dir(&self.working_dir)
            .env(OUTPUT_ENV, written)
            .status()
            .map_err(|e| GenError::RefreshError(format!("failed to run {}: {}", program, e)))?;

        if !status.success() {
            return Err(GenError::RefreshError(format!(
                "{} exited with {}",
                program, status
            )));
        }
        Ok(())
    }
}

/// Pick the refresher for a configured argv.
pub fn refresher_for(argv: &[String], working_dir: &Path) -> Box<dyn HostRefresher> {
    match CommandRefresher::new(argv.to_vec(), working_dir.to_path_buf()) {
        Some(command) => Box::new(command),
        None => Box::new(NoopRefresher),
    }
}
