//! resgen: Typed Accessors for Asset Directories
//!
//! Scans an asset directory and generates one source file whose nested classes mirror
//! the directory tree, with a static accessor per asset so code references assets
//! through checked identifiers rather than string paths.

pub mod config;
pub mod emit;
pub mod error;
pub mod generator;
pub mod host;
pub mod ident;
pub mod logging;
pub mod resolver;
pub mod tooling;
pub mod tree;
pub mod workspace;

pub use error::GenError;
pub use generator::{generate, GenerateOptions, Generated, GenerationReport, Generator};
pub use ident::sanitize;
