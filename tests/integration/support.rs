use std::fs;
use std::path::Path;

/// Create `relative` under `root`, including parent directories.
pub fn touch(root: &Path, relative: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, "").unwrap();
}

pub fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

/// Lay out a small project: three nested directories, five assets, sidecars for all.
pub fn sample_project(workspace: &Path) {
    let root = workspace.join("Assets/Resources");
    for asset in [
        "Sprites/hero.png",
        "Sprites/UI/ok-button.png",
        "Sprites/UI/9slice_frame.png",
        "Audio/boss theme.ogg",
        "levels.json",
    ] {
        touch(&root, asset);
        touch(&root, &format!("{}.meta", asset));
    }
    fs::create_dir_all(root.join("Empty")).unwrap();
    touch(&root, "Empty.meta");
}
