//! Asset type resolution
//!
//! The emitter asks a resolver for the concrete engine type of each asset. The engine
//! normally owns this lookup; the crate ships an extension-based table that covers the
//! common asset kinds and can be extended from configuration.

use std::collections::BTreeMap;

/// Type used when no mapping matches.
pub const FALLBACK_TYPE: &str = "UnityEngine.Object";

/// Maps a project asset path (e.g. `Assets/Resources/Sprites/hero.png`) to a type name.
pub trait AssetTypeResolver {
    fn resolve(&self, asset_path: &str) -> String;
}

impl<F> AssetTypeResolver for F
where
    F: Fn(&str) -> String,
{
    fn resolve(&self, asset_path: &str) -> String {
        self(asset_path)
    }
}

/// Resolves types from the file extension.
#[derive(Debug, Clone)]
pub struct ExtensionTypeResolver {
    /// Lowercase extension without the dot -> type name
    table: BTreeMap<String, String>,
    fallback: String,
}

impl ExtensionTypeResolver {
    /// Resolver with no mappings; everything resolves to the fallback.
    pub fn empty() -> Self {
        Self {
            table: BTreeMap::new(),
            fallback: FALLBACK_TYPE.to_string(),
        }
    }

    /// Resolver preloaded with the engine's built-in importers.
    pub fn with_builtin_types() -> Self {
        let mut resolver = Self::empty();
        let builtin: &[(&[&str], &str)] = &[
            (
                &["png", "jpg", "jpeg", "tga", "psd", "bmp", "gif", "tif", "tiff", "exr", "hdr"],
                "UnityEngine.Texture2D",
            ),
            (&["wav", "mp3", "ogg", "aif", "aiff"], "UnityEngine.AudioClip"),
            (
                &["txt", "json", "xml", "csv", "bytes", "html", "htm", "yaml", "md"],
                "UnityEngine.TextAsset",
            ),
            (&["prefab", "fbx", "obj", "blend", "dae"], "UnityEngine.GameObject"),
            (&["mat"], "UnityEngine.Material"),
            (&["anim"], "UnityEngine.AnimationClip"),
            (&["controller"], "UnityEngine.Animations.AnimatorController"),
            (&["shader"], "UnityEngine.Shader"),
            (&["ttf", "otf"], "UnityEngine.Font"),
            (&["physicmaterial"], "UnityEngine.PhysicMaterial"),
            (&["rendertexture"], "UnityEngine.RenderTexture"),
            (&["mixer"], "UnityEngine.Audio.AudioMixer"),
            (&["unity"], "UnityEditor.SceneAsset"),
            (&["asset"], "UnityEngine.ScriptableObject"),
            (&["mp4", "mov", "webm"], "UnityEngine.Video.VideoClip"),
        ];
        for (extensions, ty) in builtin {
            for ext in extensions.iter() {
                resolver.insert(ext, ty);
            }
        }
        resolver
    }

    /// Add or replace a mapping. Leading dots and case in `extension` are ignored.
    pub fn insert(&mut self, extension: &str, type_name: &str) {
        let key = extension.trim_start_matches('.').to_ascii_lowercase();
        self.table.insert(key, type_name.to_string());
    }

    /// Apply a set of overrides, typically from the `[types]` config table.
    pub fn with_overrides<'a, I>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        for (ext, ty) in overrides {
            self.insert(ext, ty);
        }
        self
    }

    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = fallback.into();
        self
    }
}

impl Default for ExtensionTypeResolver {
    fn default() -> Self {
        Self::with_builtin_types()
    }
}

impl AssetTypeResolver for ExtensionTypeResolver {
    fn resolve(&self, asset_path: &str) -> String {
        let file_name = asset_path.rsplit('/').next().unwrap_or(asset_path);
        file_name
            .rsplit_once('.')
            .and_then(|(_, ext)| self.table.get(&ext.to_ascii_lowercase()))
            .cloned()
            .unwrap_or_else(|| self.fallback.clone())
    }
}
