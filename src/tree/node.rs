//! Directory node types

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// One directory level of the scanned asset tree.
///
/// Each node owns its children exclusively; the tree is built once per run and only
/// read afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryNode {
    /// Raw directory name as seen on the filesystem (synthetic for the root)
    pub name: String,
    pub children: Vec<DirectoryNode>,
    /// Sanitized identifier -> absolute file path
    pub files: BTreeMap<String, PathBuf>,
}

impl DirectoryNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
            files: BTreeMap::new(),
        }
    }

    /// Number of directories below this node, not counting the node itself.
    pub fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| 1 + child.descendant_count())
            .sum()
    }

    /// Number of file entries in this node and every descendant.
    pub fn file_count(&self) -> usize {
        self.files.len()
            + self
                .children
                .iter()
                .map(DirectoryNode::file_count)
                .sum::<usize>()
    }

    /// Depth of the deepest directory below this node (0 for a leaf).
    pub fn depth(&self) -> usize {
        self.children
            .iter()
            .map(|child| 1 + child.depth())
            .max()
            .unwrap_or(0)
    }
}

/// Counters gathered while scanning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    /// Directories found below the root
    pub directories: usize,
    /// Files that became entries, including ones later replaced by a collision
    pub files: usize,
    /// Metadata sidecar files that were skipped
    pub skipped_metadata: usize,
    /// Entries replaced because two names sanitized to the same identifier
    pub collisions: usize,
    /// Symlinked directories skipped because they lead back to one of their parents
    pub link_loops: usize,
}

/// Result of a scan: the tree plus the absolute root it was taken from.
#[derive(Debug, Clone)]
pub struct ScannedTree {
    pub root: DirectoryNode,
    /// Absolute path of the scanned directory; asset paths are made relative to it
    pub base: PathBuf,
    pub stats: ScanStats,
}
