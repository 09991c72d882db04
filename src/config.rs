//! Configuration
//!
//! Layered configuration for the generator: built-in defaults, a global file under the
//! XDG config home, `resgen.toml` in the workspace, then `RESGEN__*` environment
//! variables. Every field has a default matching the editor project layout, so an
//! empty configuration reproduces the stock behaviour.

mod facade;
mod merge;
pub mod paths;
mod sources;

pub use facade::ConfigLoader;

use crate::emit::EmitOptions;
use crate::logging::LoggingConfig;
use crate::tree::ScanOptions;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Name of the per-workspace configuration file.
pub const WORKSPACE_CONFIG_FILE: &str = "resgen.toml";

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResgenConfig {
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// Extension -> type name overrides for the built-in resolver
    #[serde(default)]
    pub types: BTreeMap<String, String>,

    #[serde(default)]
    pub host: HostConfig,

    #[serde(default)]
    pub watch: WatchSettings,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Generator paths and emitted-code settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Directory to scan, relative to the workspace unless absolute
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Directory the generated file is written to
    #[serde(default = "default_destination")]
    pub destination: PathBuf,

    /// Name of the outermost container; also the output file stem
    #[serde(default = "default_root_name")]
    pub root_name: String,

    #[serde(default = "default_metadata_suffix")]
    pub metadata_suffix: String,

    /// Project-relative path of the root, handed to the type resolver
    #[serde(default = "default_root_string")]
    pub asset_prefix: String,

    /// Changed paths starting with this prefix trigger regeneration
    #[serde(default = "default_watch_prefix")]
    pub watch_prefix: String,

    #[serde(default = "default_indent")]
    pub indent: String,

    #[serde(default = "default_loader")]
    pub loader: String,

    /// Output file extension, without the dot
    #[serde(default = "default_extension")]
    pub extension: String,
}

fn default_root() -> PathBuf {
    PathBuf::from("Assets/Resources")
}

fn default_root_string() -> String {
    "Assets/Resources".to_string()
}

fn default_destination() -> PathBuf {
    PathBuf::from("Assets/_App/Scripts/Data")
}

fn default_root_name() -> String {
    "ResourcesData".to_string()
}

fn default_metadata_suffix() -> String {
    ".meta".to_string()
}

fn default_watch_prefix() -> String {
    "Assets/Resources/".to_string()
}

fn default_indent() -> String {
    "\t".to_string()
}

fn default_loader() -> String {
    "UnityEngine.Resources.Load".to_string()
}

fn default_extension() -> String {
    "cs".to_string()
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            destination: default_destination(),
            root_name: default_root_name(),
            metadata_suffix: default_metadata_suffix(),
            asset_prefix: default_root_string(),
            watch_prefix: default_watch_prefix(),
            indent: default_indent(),
            loader: default_loader(),
            extension: default_extension(),
        }
    }
}

impl GeneratorConfig {
    /// Absolute directory to scan.
    pub fn root_path(&self, workspace_root: &Path) -> PathBuf {
        resolve_against(workspace_root, &self.root)
    }

    /// Absolute destination directory.
    pub fn destination_path(&self, workspace_root: &Path) -> PathBuf {
        resolve_against(workspace_root, &self.destination)
    }

    /// Absolute path of the generated file.
    pub fn output_file(&self, workspace_root: &Path) -> PathBuf {
        let file_name = if self.extension.is_empty() {
            self.root_name.clone()
        } else {
            format!("{}.{}", self.root_name, self.extension)
        };
        self.destination_path(workspace_root).join(file_name)
    }

    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            metadata_suffix: self.metadata_suffix.clone(),
        }
    }

    pub fn emit_options(&self) -> EmitOptions {
        EmitOptions {
            indent: self.indent.clone(),
            loader: self.loader.clone(),
            asset_prefix: self.asset_prefix.clone(),
        }
    }
}

fn resolve_against(workspace_root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        workspace_root.join(path)
    }
}

/// Host integration settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostConfig {
    /// Command run after each write, as an argv list; empty disables the refresh
    #[serde(default)]
    pub refresh_command: Vec<String>,
}

/// Watch daemon timing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchSettings {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_batch_window_ms")]
    pub batch_window_ms: u64,
}

fn default_debounce_ms() -> u64 {
    100
}

fn default_batch_window_ms() -> u64 {
    250
}

impl Default for WatchSettings {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            batch_window_ms: default_batch_window_ms(),
        }
    }
}
