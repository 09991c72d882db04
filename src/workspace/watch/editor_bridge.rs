//! Editor integration hooks for asset post-processing notifications.

use super::events::{requires_regeneration, AssetChangeSet};
use crate::error::GenError;
use crate::generator::{GenerationReport, Generator};
use tracing::debug;

/// Bridges the editor's post-import callback to the generator.
pub struct EditorHooks {
    generator: Generator,
    watch_prefix: String,
}

impl EditorHooks {
    /// Create new editor hooks
    pub fn new(generator: Generator, watch_prefix: impl Into<String>) -> Self {
        Self {
            generator,
            watch_prefix: watch_prefix.into(),
        }
    }

    /// Handle one post-process notification.
    ///
    /// Regenerates when any imported, deleted or moved asset lies under the watch
    /// prefix; returns `None` when the change set does not concern the watched root.
    pub fn on_assets_changed(
        &self,
        changes: &AssetChangeSet,
    ) -> Result<Option<GenerationReport>, GenError> {
        if !requires_regeneration(changes, &self.watch_prefix) {
            debug!(
                prefix = %self.watch_prefix,
                imported = changes.imported.len(),
                deleted = changes.deleted.len(),
                moved = changes.moved.len(),
                "Change set outside watched root"
            );
            return Ok(None);
        }
        self.generator.run().map(Some)
    }

    /// Manual regeneration, independent of any change set.
    pub fn generate_now(&self) -> Result<GenerationReport, GenError> {
        self.generator.run()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::GenerateOptions;
    use std::fs;
    use tempfile::TempDir;

    fn hooks(temp: &TempDir) -> EditorHooks {
        let generator = Generator::new(
            temp.path().join("Assets/Resources"),
            temp.path().join("Assets/Data/ResourcesData.cs"),
            GenerateOptions::default(),
        );
        EditorHooks::new(generator, "Assets/Resources/")
    }

    #[test]
    fn test_unrelated_changes_do_not_write() {
        let temp = TempDir::new().unwrap();
        let hooks = hooks(&temp);
        let changes = AssetChangeSet {
            imported: vec!["Assets/Scripts/Player.cs".to_string()],
            ..AssetChangeSet::default()
        };

        assert!(hooks.on_assets_changed(&changes).unwrap().is_none());
        assert!(!temp.path().join("Assets/Data/ResourcesData.cs").exists());
    }

    #[test]
    fn test_deleted_asset_regenerates() {
        let temp = TempDir::new().unwrap();
        let hooks = hooks(&temp);
        fs::create_dir_all(temp.path().join("Assets/Resources")).unwrap();
        fs::write(temp.path().join("Assets/Resources/kept.png"), "").unwrap();
        let changes = AssetChangeSet {
            deleted: vec!["Assets/Resources/gone.png".to_string()],
            ..AssetChangeSet::default()
        };

        let report = hooks.on_assets_changed(&changes).unwrap().unwrap();
        assert_eq!(report.accessors, 1);
        let text = fs::read_to_string(report.output).unwrap();
        assert!(text.contains("Kept"));
        assert!(!text.contains("Gone"));
    }
}
