//! Recursive scan of the asset root into a [`DirectoryNode`] tree.

use super::node::{DirectoryNode, ScanStats, ScannedTree};
use crate::error::GenError;
use crate::ident::sanitize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Scanner options
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Files whose name ends with this suffix are never surfaced as entries
    pub metadata_suffix: String,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            metadata_suffix: ".meta".to_string(),
        }
    }
}

/// Builds a directory tree snapshot rooted at a given path.
pub struct TreeScanner {
    options: ScanOptions,
}

impl TreeScanner {
    pub fn new(options: ScanOptions) -> Self {
        Self { options }
    }

    /// Scan `base` and return the full tree under a synthetic root named `root_name`.
    ///
    /// The directory must exist. Entries are enumerated in file-name order so repeated
    /// scans of an unchanged tree are identical. Any filesystem error aborts the scan.
    pub fn scan(&self, base: &Path, root_name: &str) -> Result<ScannedTree, GenError> {
        let mut stats = ScanStats::default();
        let mut root = DirectoryNode::new(root_name);
        let canonical = dunce::canonicalize(base).map_err(|e| GenError::io(base, e))?;
        let mut ancestors = vec![canonical];
        self.scan_directory(base, &mut root, &mut ancestors, &mut stats)?;

        debug!(
            base = %base.display(),
            directories = stats.directories,
            files = stats.files,
            "Scan complete"
        );

        Ok(ScannedTree {
            root,
            base: base.to_path_buf(),
            stats,
        })
    }

    /// `ancestors` holds the canonical path of `dir` and of every directory above it.
    fn scan_directory(
        &self,
        dir: &Path,
        node: &mut DirectoryNode,
        ancestors: &mut Vec<PathBuf>,
        stats: &mut ScanStats,
    ) -> Result<(), GenError> {
        // (path as seen under the root, canonical target)
        let mut subdirs: Vec<(PathBuf, PathBuf)> = Vec::new();
        let current = ancestors.last().cloned().unwrap_or_else(|| dir.to_path_buf());

        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry?;
            let path = entry.path();

            if entry.path_is_symlink() && path.is_dir() {
                let target = dunce::canonicalize(path).map_err(|e| GenError::io(path, e))?;
                if ancestors.contains(&target) {
                    stats.link_loops += 1;
                    warn!(
                        path = %path.display(),
                        target = %target.display(),
                        "Symlinked directory points back at one of its parents; not entering it"
                    );
                    continue;
                }
                node.children
                    .push(DirectoryNode::new(entry.file_name().to_string_lossy()));
                subdirs.push((path.to_path_buf(), target));
                continue;
            }

            if entry.file_type().is_dir() {
                node.children
                    .push(DirectoryNode::new(entry.file_name().to_string_lossy()));
                subdirs.push((path.to_path_buf(), current.join(entry.file_name())));
                continue;
            }

            let file_name = entry.file_name().to_string_lossy();
            let suffix = &self.options.metadata_suffix;
            if !suffix.is_empty() && file_name.ends_with(suffix.as_str()) {
                stats.skipped_metadata += 1;
                continue;
            }

            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| file_name.to_string());
            let identifier = sanitize(&stem);

            stats.files += 1;
            if let Some(previous) = node.files.insert(identifier.clone(), path.to_path_buf()) {
                stats.collisions += 1;
                warn!(
                    identifier = %identifier,
                    replaced = %previous.display(),
                    kept = %path.display(),
                    "Two files sanitize to the same identifier; keeping the later one"
                );
            }
        }

        stats.directories += subdirs.len();
        debug!(
            dir = %dir.display(),
            subdirectories = subdirs.len(),
            files = node.files.len(),
            "Scanned directory"
        );

        for (child, (path, canonical)) in node.children.iter_mut().zip(subdirs) {
            ancestors.push(canonical);
            let result = self.scan_directory(&path, child, ancestors, stats);
            ancestors.pop();
            result?;
        }

        Ok(())
    }
}

impl Default for TreeScanner {
    fn default() -> Self {
        Self::new(ScanOptions::default())
    }
}
