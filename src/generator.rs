//! Generation pipeline
//!
//! `generate` is the pure core: scan a directory and render it to text. `Generator`
//! wraps it with the side effects of a run: creating missing directories, replacing the
//! output file and asking the host to refresh.

use crate::config::ResgenConfig;
use crate::emit::{render, EmitOptions};
use crate::error::GenError;
use crate::host::{refresher_for, HostRefresher, NoopRefresher};
use crate::resolver::{AssetTypeResolver, ExtensionTypeResolver};
use crate::tree::{ScanOptions, ScanStats, TreeScanner};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Options for one `generate` call
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Synthetic name of the outermost container
    pub root_name: String,
    pub scan: ScanOptions,
    pub emit: EmitOptions,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            root_name: "ResourcesData".to_string(),
            scan: ScanOptions::default(),
            emit: EmitOptions::default(),
        }
    }
}

/// Rendered source plus counters describing it.
#[derive(Debug, Clone)]
pub struct Generated {
    pub text: String,
    pub stats: ScanStats,
    /// Container declarations, including the root
    pub containers: usize,
    /// Accessor declarations
    pub accessors: usize,
}

/// Scan `root` and render the generated source. `root` must exist.
pub fn generate(
    root: &Path,
    resolver: &dyn AssetTypeResolver,
    options: &GenerateOptions,
) -> Result<Generated, GenError> {
    let tree = TreeScanner::new(options.scan.clone()).scan(root, &options.root_name)?;
    let text = render(&tree, resolver, &options.emit);

    Ok(Generated {
        containers: 1 + tree.root.descendant_count(),
        accessors: tree.root.file_count(),
        stats: tree.stats,
        text,
    })
}

/// Summary of a completed run
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub root: PathBuf,
    pub output: PathBuf,
    pub containers: usize,
    pub accessors: usize,
    pub bytes: usize,
    pub stats: ScanStats,
    /// False for dry runs
    pub written: bool,
}

/// A configured generator bound to one workspace.
pub struct Generator {
    root: PathBuf,
    output: PathBuf,
    options: GenerateOptions,
    resolver: Box<dyn AssetTypeResolver>,
    refresher: Box<dyn HostRefresher>,
}

impl Generator {
    /// Generator with explicit paths, the built-in resolver and no host refresh.
    pub fn new(root: PathBuf, output: PathBuf, options: GenerateOptions) -> Self {
        Self {
            root,
            output,
            options,
            resolver: Box::new(ExtensionTypeResolver::with_builtin_types()),
            refresher: Box::new(NoopRefresher),
        }
    }

    /// Generator for a workspace as described by its configuration.
    pub fn from_config(workspace_root: &Path, config: &ResgenConfig) -> Self {
        let generator = &config.generator;
        let options = GenerateOptions {
            root_name: generator.root_name.clone(),
            scan: generator.scan_options(),
            emit: generator.emit_options(),
        };
        Self::new(
            generator.root_path(workspace_root),
            generator.output_file(workspace_root),
            options,
        )
        .with_resolver(ExtensionTypeResolver::with_builtin_types().with_overrides(&config.types))
        .with_boxed_refresher(refresher_for(&config.host.refresh_command, workspace_root))
    }

    pub fn with_resolver(mut self, resolver: impl AssetTypeResolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    pub fn with_refresher(self, refresher: impl HostRefresher + 'static) -> Self {
        self.with_boxed_refresher(Box::new(refresher))
    }

    fn with_boxed_refresher(mut self, refresher: Box<dyn HostRefresher>) -> Self {
        self.refresher = refresher;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Render without writing or refreshing. Creates the root if it is missing.
    pub fn preview(&self) -> Result<Generated, GenError> {
        let root = self.prepare_root()?;
        generate(&root, self.resolver.as_ref(), &self.options)
    }

    /// Full run: scan, render, replace the output file, refresh the host.
    pub fn run(&self) -> Result<GenerationReport, GenError> {
        let root = self.prepare_root()?;
        if let Some(destination) = self.output.parent() {
            ensure_dir(destination)?;
        }

        let generated = generate(&root, self.resolver.as_ref(), &self.options)?;
        write_atomic(&self.output, generated.text.as_bytes())?;
        self.refresher.refresh(&self.output)?;

        info!(
            output = %self.output.display(),
            containers = generated.containers,
            accessors = generated.accessors,
            collisions = generated.stats.collisions,
            "Generated resource accessors"
        );

        Ok(GenerationReport {
            root,
            output: self.output.clone(),
            containers: generated.containers,
            accessors: generated.accessors,
            bytes: generated.text.len(),
            stats: generated.stats,
            written: true,
        })
    }

    fn prepare_root(&self) -> Result<PathBuf, GenError> {
        ensure_dir(&self.root)?;
        dunce::canonicalize(&self.root).map_err(|e| GenError::io(&self.root, e))
    }
}

/// Create `path` and its parents if missing.
fn ensure_dir(path: &Path) -> Result<(), GenError> {
    if path.is_dir() {
        return Ok(());
    }
    debug!(path = %path.display(), "Creating missing directory");
    std::fs::create_dir_all(path).map_err(|e| GenError::io(path, e))
}

/// Replace `path` with `contents` through a temporary file in the same directory.
///
/// The replacement keeps the permissions of the file it overwrites; a new file is
/// readable by everyone (0644 on unix) rather than owner-only like the temp file.
fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), GenError> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut temp = tempfile::NamedTempFile::new_in(dir).map_err(|e| GenError::io(dir, e))?;
    temp.write_all(contents)
        .map_err(|e| GenError::io(temp.path(), e))?;

    let permissions = match std::fs::metadata(path) {
        Ok(existing) => Some(existing.permissions()),
        Err(_) => new_file_permissions(),
    };
    if let Some(permissions) = permissions {
        temp.as_file()
            .set_permissions(permissions)
            .map_err(|e| GenError::io(temp.path(), e))?;
    }

    temp.persist(path).map_err(|e| GenError::io(path, e.error))?;
    Ok(())
}

#[cfg(unix)]
fn new_file_permissions() -> Option<std::fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(std::fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<std::fs::Permissions> {
    None
}
