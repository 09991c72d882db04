//! Directory tree snapshot: node types and the scanner that builds them.

pub mod node;
pub mod scanner;

pub use node::{DirectoryNode, ScanStats, ScannedTree};
pub use scanner::{ScanOptions, TreeScanner};
