//! CLI Tooling
//!
//! Command-line interface for the resource generator. Every command is idempotent:
//! a run always rebuilds the whole output from the current state of the asset root.

use crate::config::{ConfigLoader, ResgenConfig};
use crate::error::GenError;
use crate::generator::{GenerationReport, Generator};
use crate::ident::sanitize;
use crate::logging::LoggingConfig;
use crate::workspace::{
    format_generation_report_text, format_sanitize_text, AssetChangeSet, EditorHooks,
    WatchConfig, WatchDaemon,
};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// resgen - typed accessors for an asset directory
#[derive(Parser)]
#[command(name = "resgen")]
#[command(about = "Generate nested accessor classes mirroring an asset directory")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace (project) root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Logging config from the loaded file config with CLI flags applied on top.
    ///
    /// `--log-file` is not folded in here; it goes to `init_logging` directly so it
    /// outranks RESGEN_LOG_FILE.
    pub fn logging_config(&self, base: &LoggingConfig) -> LoggingConfig {
        let mut config = base.clone();
        if self.verbose {
            config.level = "debug".to_string();
        }
        if let Some(level) = &self.log_level {
            config.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            config.output = output.clone();
        }
        config
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan the asset root and rewrite the generated file
    Generate {
        /// Print the generated source instead of writing it
        #[arg(long)]
        dry_run: bool,
        /// Summary format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Regenerate if an editor change notification touches the asset root
    Changed {
        /// Imported asset paths (project-relative)
        #[arg(long, num_args = 0..)]
        imported: Vec<String>,
        /// Deleted asset paths
        #[arg(long, num_args = 0..)]
        deleted: Vec<String>,
        /// Moved asset paths (destinations)
        #[arg(long, num_args = 0..)]
        moved: Vec<String>,
        /// Original paths of moved assets
        #[arg(long, num_args = 0..)]
        moved_from: Vec<String>,
        /// Summary format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Watch the asset root and regenerate on changes
    Watch {
        /// Debounce window in milliseconds
        #[arg(long)]
        debounce_ms: Option<u64>,
        /// Batch window in milliseconds
        #[arg(long)]
        batch_window_ms: Option<u64>,
    },
    /// Print the identifier generated for each name
    Sanitize {
        /// Raw file or directory names
        #[arg(required = true)]
        names: Vec<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show the effective configuration as TOML
    Config,
}

/// CLI context holding the workspace and its resolved configuration
pub struct CliContext {
    workspace_root: PathBuf,
    config: ResgenConfig,
}

impl CliContext {
    /// Create a new CLI context
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, GenError> {
        let workspace_root =
            dunce::canonicalize(&workspace_root).map_err(|e| GenError::io(&workspace_root, e))?;
        let config = match &config_path {
            Some(cfg_path) => ConfigLoader::load_from_file(cfg_path)?,
            None => ConfigLoader::load(&workspace_root)?,
        };
        Ok(Self {
            workspace_root,
            config,
        })
    }

    pub fn config(&self) -> &ResgenConfig {
        &self.config
    }

    pub fn workspace_root(&self) -> &std::path::Path {
        &self.workspace_root
    }

    fn generator(&self) -> Generator {
        Generator::from_config(&self.workspace_root, &self.config)
    }

    /// Execute a CLI command
    pub fn execute(&self, command: &Commands) -> Result<String, GenError> {
        let started = Instant::now();
        let result = self.execute_inner(command);
        info!(
            command = command_name(command),
            ok = result.is_ok(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Command finished"
        );
        result
    }

    fn execute_inner(&self, command: &Commands) -> Result<String, GenError> {
        match command {
            Commands::Generate { dry_run, format } => {
                check_format(format)?;
                let generator = self.generator();
                if *dry_run {
                    let generated = generator.preview()?;
                    if format == "json" {
                        let report = GenerationReport {
                            root: generator.root().to_path_buf(),
                            output: generator.output().to_path_buf(),
                            containers: generated.containers,
                            accessors: generated.accessors,
                            bytes: generated.text.len(),
                            stats: generated.stats,
                            written: false,
                        };
                        return to_json(&json!({ "report": report, "text": generated.text }));
                    }
                    return Ok(generated.text);
                }
                let report = generator.run()?;
                format_report(&report, format)
            }
            Commands::Changed {
                imported,
                deleted,
                moved,
                moved_from,
                format,
            } => {
                check_format(format)?;
                let changes = AssetChangeSet {
                    imported: imported.clone(),
                    deleted: deleted.clone(),
                    moved: moved.clone(),
                    moved_from: moved_from.clone(),
                };
                let hooks = EditorHooks::new(
                    self.generator(),
                    self.config.generator.watch_prefix.clone(),
                );
                match hooks.on_assets_changed(&changes)? {
                    Some(report) => format_report(&report, format),
                    None if format == "json" => to_json(&json!({ "regenerated": false })),
                    None => Ok("No changes under the watched root; nothing to do.".to_string()),
                }
            }
            Commands::Watch {
                debounce_ms,
                batch_window_ms,
            } => {
                let generator = self.generator();
                let mut ignore_suffixes = WatchConfig::default().ignore_suffixes;
                let metadata_suffix = &self.config.generator.metadata_suffix;
                if !metadata_suffix.is_empty() && !ignore_suffixes.contains(metadata_suffix) {
                    ignore_suffixes.push(metadata_suffix.clone());
                }
                let watch_config = WatchConfig {
                    root: generator.root().to_path_buf(),
                    output: generator.output().to_path_buf(),
                    debounce_ms: debounce_ms.unwrap_or(self.config.watch.debounce_ms),
                    batch_window_ms: batch_window_ms.unwrap_or(self.config.watch.batch_window_ms),
                    ignore_suffixes,
                    ..WatchConfig::default()
                };
                let daemon = WatchDaemon::new(generator, watch_config);
                daemon.start()?;
                Ok("Watch stopped".to_string())
            }
            Commands::Sanitize { names, format } => {
                let pairs: Vec<(String, String)> = names
                    .iter()
                    .map(|name| (name.clone(), sanitize(name)))
                    .collect();
                if format == "json" {
                    let entries: Vec<_> = pairs
                        .iter()
                        .map(|(name, identifier)| json!({ "name": name, "identifier": identifier }))
                        .collect();
                    return to_json(&entries);
                }
                Ok(format_sanitize_text(&pairs))
            }
            Commands::Config => toml::to_string_pretty(&self.config).map_err(|e| {
                GenError::ConfigError(format!("Failed to serialize config: {}", e))
            }),
        }
    }
}

fn check_format(format: &str) -> Result<(), GenError> {
    match format {
        "json" | "text" => Ok(()),
        other => Err(GenError::ConfigError(format!(
            "Invalid format: {} (must be 'text' or 'json')",
            other
        ))),
    }
}

fn format_report(report: &GenerationReport, format: &str) -> Result<String, GenError> {
    check_format(format)?;
    if format == "json" {
        return to_json(report);
    }
    Ok(format_generation_report_text(report))
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, GenError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| GenError::ConfigError(format!("Failed to serialize output: {}", e)))
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Generate { .. } => "generate",
        Commands::Changed { .. } => "changed",
        Commands::Watch { .. } => "watch",
        Commands::Sanitize { .. } => "sanitize",
        Commands::Config => "config",
    }
}
