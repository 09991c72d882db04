//! C# code emitter
//!
//! Renders a scanned tree into one source file: a class per directory, nested the way
//! the directories are, and one static property per asset that loads it through the
//! engine's resource loader.

use crate::ident::sanitize;
use crate::resolver::AssetTypeResolver;
use crate::tree::{DirectoryNode, ScannedTree};
use std::path::{Component, Path};

/// Emitter options
#[derive(Debug, Clone)]
pub struct EmitOptions {
    /// One indentation level
    pub indent: String,
    /// Generic loader invoked by each accessor, called as `<loader><T>("path")`
    pub loader: String,
    /// Project-relative path of the scanned root, used when asking the resolver for types
    pub asset_prefix: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            indent: "\t".to_string(),
            loader: "UnityEngine.Resources.Load".to_string(),
            asset_prefix: "Assets/Resources".to_string(),
        }
    }
}

/// Render the whole tree. The result ends with a newline after the root container.
pub fn render(
    tree: &ScannedTree,
    resolver: &dyn AssetTypeResolver,
    options: &EmitOptions,
) -> String {
    let emitter = Emitter {
        base: &tree.base,
        resolver,
        options,
    };
    let mut out = emitter.render_node(&tree.root, 0);
    out.push('\n');
    out
}

struct Emitter<'a> {
    base: &'a Path,
    resolver: &'a dyn AssetTypeResolver,
    options: &'a EmitOptions,
}

impl Emitter<'_> {
    fn render_node(&self, node: &DirectoryNode, depth: usize) -> String {
        let tab = self.options.indent.repeat(depth);
        let inner_tab = self.options.indent.repeat(depth + 1);

        let mut out = String::new();
        out.push_str(&format!(
            "\n{tab}public class {}\n{tab}{{\n",
            sanitize(&node.name)
        ));

        for child in &node.children {
            out.push_str(&self.render_node(child, depth + 1));
            out.push('\n');
        }

        for (identifier, path) in &node.files {
            let relative = relative_asset_path(self.base, path);
            let asset_path = if self.options.asset_prefix.is_empty() {
                relative.clone()
            } else {
                format!(
                    "{}/{}",
                    self.options.asset_prefix.trim_end_matches('/'),
                    relative
                )
            };
            let ty = self.resolver.resolve(&asset_path);
            let load_path = escape_literal(strip_extension(&relative));

            out.push_str(&format!(
                "{inner_tab}public static {ty} {identifier} => {}<{ty}>(\"{load_path}\");\n",
                self.options.loader
            ));
        }

        out.push_str(&format!("{tab}}}"));
        out
    }
}

/// Path of `path` relative to `base`, joined with forward slashes.
pub fn relative_asset_path(base: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(base).unwrap_or(path);
    relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Drop the last extension of the final path segment, if any.
fn strip_extension(relative: &str) -> &str {
    let name_start = relative.rfind('/').map(|i| i + 1).unwrap_or(0);
    match relative[name_start..].rfind('.') {
        Some(dot) if dot > 0 => &relative[..name_start + dot],
        _ => relative,
    }
}

/// Escape `raw` for use inside a regular C# string literal.
fn escape_literal(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out
}
